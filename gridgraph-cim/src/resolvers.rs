//! Relationship roles of the catalogue.
//!
//! Every two-way relationship is a pair of resolvers that name each other as
//! reverse, so linking either side links both. The `bind_*` helpers pair a
//! source entity with its role and reverse, ready for
//! [`ObjectStore::resolve_or_defer`](gridgraph_store::ObjectStore::resolve_or_defer).

use crate::entities::{AcLineSegment, Clamp, Feeder, RemoteSource, Substation, Terminal};
use crate::facets::{
    ConductingEquipmentData, EquipmentContainerData, EquipmentData, MeasurementData,
    PowerSystemResourceData,
};
use crate::kinds::*;
use gridgraph_store::{BoundResolver, ReferenceResolver, StoreError, StoreResult};
use gridgraph_types::{Entity, EntityHandle, Identified};

fn concrete<T: Entity>(entity: &mut dyn Identified) -> StoreResult<&mut T> {
    let kind = entity.kind();
    entity
        .downcast_mut::<T>()
        .ok_or_else(|| StoreError::Link(format!("expected {}, got {kind}", T::KIND)))
}

fn layer<F: 'static>(entity: &mut dyn Identified) -> StoreResult<&mut F> {
    Ok(entity.require_facet_mut::<F>()?)
}

fn push_unique(list: &mut Vec<String>, mrid: &str) {
    if !list.iter().any(|m| m == mrid) {
        list.push(mrid.to_string());
    }
}

// ── Link functions ──────────────────────────────────────────────

fn link_psr_location(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    layer::<PowerSystemResourceData>(from)?.location = Some(to.mrid().to_string());
    Ok(())
}

fn link_equipment_container(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    layer::<EquipmentData>(from)?
        .containers
        .insert(to.mrid().to_string());
    Ok(())
}

fn link_container_equipment(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    layer::<EquipmentContainerData>(from)?
        .equipment
        .insert(to.mrid().to_string());
    Ok(())
}

fn link_ce_terminal(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    push_unique(&mut layer::<ConductingEquipmentData>(from)?.terminals, to.mrid());
    Ok(())
}

fn link_terminal_ce(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    concrete::<Terminal>(from)?.conducting_equipment = Some(to.mrid().to_string());
    Ok(())
}

fn link_feeder_substation(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    concrete::<Feeder>(from)?.normal_energizing_substation = Some(to.mrid().to_string());
    Ok(())
}

fn link_substation_feeder(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    concrete::<Substation>(from)?
        .normal_energized_feeders
        .insert(to.mrid().to_string());
    Ok(())
}

fn link_segment_clamp(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    concrete::<AcLineSegment>(from)?
        .clamps
        .insert(to.mrid().to_string());
    Ok(())
}

fn link_clamp_segment(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    concrete::<Clamp>(from)?.ac_line_segment = Some(to.mrid().to_string());
    Ok(())
}

fn link_measurement_remote_source(
    from: &mut dyn Identified,
    to: &dyn Identified,
) -> StoreResult<()> {
    layer::<MeasurementData>(from)?.remote_source = Some(to.mrid().to_string());
    Ok(())
}

fn link_remote_source_measurement(
    from: &mut dyn Identified,
    to: &dyn Identified,
) -> StoreResult<()> {
    concrete::<RemoteSource>(from)?.measurement = Some(to.mrid().to_string());
    Ok(())
}

fn link_measurement_psr(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    layer::<MeasurementData>(from)?.power_system_resource = Some(to.mrid().to_string());
    Ok(())
}

// ── Resolvers ───────────────────────────────────────────────────

pub static PSR_LOCATION: ReferenceResolver = ReferenceResolver::new(
    "PowerSystemResource.location",
    POWER_SYSTEM_RESOURCE,
    LOCATION,
    link_psr_location,
);
pub static EQUIPMENT_CONTAINERS: ReferenceResolver = ReferenceResolver::new(
    "Equipment.containers",
    EQUIPMENT,
    EQUIPMENT_CONTAINER,
    link_equipment_container,
);
pub static CONTAINER_EQUIPMENT: ReferenceResolver = ReferenceResolver::new(
    "EquipmentContainer.equipment",
    EQUIPMENT_CONTAINER,
    EQUIPMENT,
    link_container_equipment,
);
pub static CE_TERMINALS: ReferenceResolver = ReferenceResolver::new(
    "ConductingEquipment.terminals",
    CONDUCTING_EQUIPMENT,
    TERMINAL,
    link_ce_terminal,
);
pub static TERMINAL_CE: ReferenceResolver = ReferenceResolver::new(
    "Terminal.conductingEquipment",
    TERMINAL,
    CONDUCTING_EQUIPMENT,
    link_terminal_ce,
);
pub static FEEDER_SUBSTATION: ReferenceResolver = ReferenceResolver::new(
    "Feeder.normalEnergizingSubstation",
    FEEDER,
    SUBSTATION,
    link_feeder_substation,
);
pub static SUBSTATION_FEEDERS: ReferenceResolver = ReferenceResolver::new(
    "Substation.normalEnergizedFeeders",
    SUBSTATION,
    FEEDER,
    link_substation_feeder,
);
pub static SEGMENT_CLAMPS: ReferenceResolver = ReferenceResolver::new(
    "AcLineSegment.clamps",
    AC_LINE_SEGMENT,
    CLAMP,
    link_segment_clamp,
);
pub static CLAMP_SEGMENT: ReferenceResolver = ReferenceResolver::new(
    "Clamp.acLineSegment",
    CLAMP,
    AC_LINE_SEGMENT,
    link_clamp_segment,
);
pub static MEASUREMENT_REMOTE_SOURCE: ReferenceResolver = ReferenceResolver::new(
    "Measurement.remoteSource",
    MEASUREMENT,
    REMOTE_SOURCE,
    link_measurement_remote_source,
);
pub static REMOTE_SOURCE_MEASUREMENT: ReferenceResolver = ReferenceResolver::new(
    "RemoteSource.measurement",
    REMOTE_SOURCE,
    MEASUREMENT,
    link_remote_source_measurement,
);
pub static MEASUREMENT_PSR: ReferenceResolver = ReferenceResolver::new(
    "Measurement.powerSystemResource",
    MEASUREMENT,
    POWER_SYSTEM_RESOURCE,
    link_measurement_psr,
);

// ── Bound helpers ───────────────────────────────────────────────

fn paired(
    from: &EntityHandle,
    forward: &'static ReferenceResolver,
    reverse: &'static ReferenceResolver,
) -> BoundResolver {
    forward.bind(from).with_reverse(reverse)
}

pub fn bind_location(psr: &EntityHandle) -> BoundResolver {
    PSR_LOCATION.bind(psr)
}

pub fn bind_container(equipment: &EntityHandle) -> BoundResolver {
    paired(equipment, &EQUIPMENT_CONTAINERS, &CONTAINER_EQUIPMENT)
}

pub fn bind_equipment(container: &EntityHandle) -> BoundResolver {
    paired(container, &CONTAINER_EQUIPMENT, &EQUIPMENT_CONTAINERS)
}

pub fn bind_terminal(ce: &EntityHandle) -> BoundResolver {
    paired(ce, &CE_TERMINALS, &TERMINAL_CE)
}

pub fn bind_conducting_equipment(terminal: &EntityHandle) -> BoundResolver {
    paired(terminal, &TERMINAL_CE, &CE_TERMINALS)
}

pub fn bind_energizing_substation(feeder: &EntityHandle) -> BoundResolver {
    paired(feeder, &FEEDER_SUBSTATION, &SUBSTATION_FEEDERS)
}

pub fn bind_energized_feeder(substation: &EntityHandle) -> BoundResolver {
    paired(substation, &SUBSTATION_FEEDERS, &FEEDER_SUBSTATION)
}

pub fn bind_clamp(segment: &EntityHandle) -> BoundResolver {
    paired(segment, &SEGMENT_CLAMPS, &CLAMP_SEGMENT)
}

pub fn bind_line_segment(clamp: &EntityHandle) -> BoundResolver {
    paired(clamp, &CLAMP_SEGMENT, &SEGMENT_CLAMPS)
}

pub fn bind_remote_source(measurement: &EntityHandle) -> BoundResolver {
    paired(measurement, &MEASUREMENT_REMOTE_SOURCE, &REMOTE_SOURCE_MEASUREMENT)
}

pub fn bind_measurement(remote_source: &EntityHandle) -> BoundResolver {
    paired(remote_source, &REMOTE_SOURCE_MEASUREMENT, &MEASUREMENT_REMOTE_SOURCE)
}

pub fn bind_power_system_resource(measurement: &EntityHandle) -> BoundResolver {
    MEASUREMENT_PSR.bind(measurement)
}
