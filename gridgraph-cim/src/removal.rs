//! Removal policies of the catalogue.
//!
//! Each policy unlinks the entity from everything that points back at it,
//! handles its owned children, then delegates to the next more general layer.

use crate::entities::{AcLineSegment, Clamp, Feeder, RemoteSource, Substation, Terminal};
use crate::facets::{
    ConductingEquipmentData, EquipmentContainerData, EquipmentData, MeasurementData,
    PowerSystemResourceData,
};
use crate::kinds::*;
use gridgraph_store::{Removal, StoreResult};
use gridgraph_types::{Entity, EntityHandle, Identified};
use tracing::debug;

/// Makes [`remove_ac_line_segment`] remove its clamps instead of detaching them.
pub const REMOVE_CLAMPS: &str = "remove-clamps";

/// Reads a value from the entity's `F` layer.
fn read<F: 'static, R: Default>(entity: &EntityHandle, get: impl FnOnce(&F) -> R) -> R {
    entity.borrow().facet_of::<F>().map(get).unwrap_or_default()
}

/// Updates the entity's `F` layer, if it has one.
fn update<F: 'static>(entity: &EntityHandle, apply: impl FnOnce(&mut F)) {
    if let Some(layer) = entity.borrow_mut().facet_of_mut::<F>() {
        apply(layer);
    }
}

fn update_concrete<T: Entity>(entity: &EntityHandle, apply: impl FnOnce(&mut T)) {
    if let Some(concrete) = entity.borrow_mut().downcast_mut::<T>() {
        apply(concrete);
    }
}

fn lookup(removal: &mut Removal<'_>, mrid: &str) -> Option<EntityHandle> {
    removal.store().lookup(mrid).cloned()
}

/// The stored entities among `mrids`.
fn lookup_all<'m>(
    removal: &mut Removal<'_>,
    mrids: impl IntoIterator<Item = &'m String>,
) -> Vec<EntityHandle> {
    mrids
        .into_iter()
        .filter_map(|mrid| lookup(removal, mrid))
        .collect()
}

/// Entities of `kind` whose `F` layer satisfies `pred`.
fn referencing<F: 'static>(
    removal: &mut Removal<'_>,
    kind: gridgraph_types::Kind,
    pred: impl Fn(&F) -> bool,
) -> Vec<EntityHandle> {
    removal
        .store()
        .list_of(kind, |e: &dyn Identified| e.facet_of::<F>().is_some_and(&pred))
}

// ── Capability layers ───────────────────────────────────────────

/// Clears measurements that observe the resource.
pub fn remove_power_system_resource(
    removal: &mut Removal<'_>,
    entity: &EntityHandle,
) -> StoreResult<()> {
    let mrid = entity.mrid();
    let observers = referencing::<MeasurementData>(removal, MEASUREMENT, |m| {
        m.power_system_resource.as_deref() == Some(mrid.as_str())
    });
    for measurement in observers {
        update::<MeasurementData>(&measurement, |m| m.power_system_resource = None);
    }
    update::<PowerSystemResourceData>(entity, |psr| psr.location = None);
    removal.delegate(entity, POWER_SYSTEM_RESOURCE)
}

/// Leaves every container the equipment belongs to.
pub fn remove_equipment(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let containers = read::<EquipmentData, _>(entity, |e| e.containers.clone());
    for container in lookup_all(removal, &containers) {
        update::<EquipmentContainerData>(&container, |c| {
            c.equipment.remove(&mrid);
        });
    }
    update::<EquipmentData>(entity, |e| e.containers.clear());
    removal.delegate(entity, EQUIPMENT)
}

/// Removes the equipment's terminals when cascading, detaches them otherwise.
pub fn remove_conducting_equipment(
    removal: &mut Removal<'_>,
    entity: &EntityHandle,
) -> StoreResult<()> {
    let terminals = read::<ConductingEquipmentData, _>(entity, |ce| ce.terminals.clone());
    for terminal in lookup_all(removal, &terminals) {
        if removal.cascade() {
            removal.remove_child(&terminal)?;
        } else {
            update_concrete::<Terminal>(&terminal, |t| t.conducting_equipment = None);
        }
    }
    update::<ConductingEquipmentData>(entity, |ce| ce.terminals.clear());
    removal.delegate(entity, CONDUCTING_EQUIPMENT)
}

/// Releases the container's members.
///
/// When cascading, a member is removed only if this was its sole container.
pub fn remove_equipment_container(
    removal: &mut Removal<'_>,
    entity: &EntityHandle,
) -> StoreResult<()> {
    let mrid = entity.mrid();
    let members = read::<EquipmentContainerData, _>(entity, |c| c.equipment.clone());
    for member in lookup_all(removal, &members) {
        let mut sole = false;
        update::<EquipmentData>(&member, |e| {
            sole = e.containers.len() == 1 && e.containers.contains(&mrid);
            e.containers.remove(&mrid);
        });
        if removal.cascade() && sole {
            debug!(container = %mrid, member = %member.mrid(), "removing solely contained equipment");
            removal.remove_child(&member)?;
        }
    }
    update::<EquipmentContainerData>(entity, |c| c.equipment.clear());
    removal.delegate(entity, EQUIPMENT_CONTAINER)
}

/// Removes the measurement's remote source when cascading, detaches it otherwise.
pub fn remove_measurement(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let source = read::<MeasurementData, _>(entity, |m| m.remote_source.clone());
    if let Some(source) = source.and_then(|s| lookup(removal, &s)) {
        let sole = source
            .borrow()
            .downcast_ref::<RemoteSource>()
            .is_some_and(|r| r.measurement.as_deref() == Some(mrid.as_str()));
        if removal.cascade() && sole {
            removal.remove_child(&source)?;
        } else {
            update_concrete::<RemoteSource>(&source, |r| {
                if r.measurement.as_deref() == Some(mrid.as_str()) {
                    r.measurement = None;
                }
            });
        }
    }
    update::<MeasurementData>(entity, |m| {
        m.remote_source = None;
        m.power_system_resource = None;
    });
    removal.delegate(entity, MEASUREMENT)
}

// ── Concrete types ──────────────────────────────────────────────

/// Clears the location from every resource placed at it.
pub fn remove_location(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let placed = referencing::<PowerSystemResourceData>(removal, POWER_SYSTEM_RESOURCE, |psr| {
        psr.location.as_deref() == Some(mrid.as_str())
    });
    for psr in placed {
        update::<PowerSystemResourceData>(&psr, |p| p.location = None);
    }
    removal.delegate(entity, LOCATION)
}

pub fn remove_terminal(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let owner = entity
        .borrow()
        .downcast_ref::<Terminal>()
        .and_then(|t| t.conducting_equipment.clone());
    if let Some(ce) = owner.and_then(|ce| lookup(removal, &ce)) {
        update::<ConductingEquipmentData>(&ce, |ce| ce.terminals.retain(|t| *t != mrid));
    }
    update_concrete::<Terminal>(entity, |t| t.conducting_equipment = None);
    removal.delegate(entity, TERMINAL)
}

pub fn remove_remote_source(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let measurement = entity
        .borrow()
        .downcast_ref::<RemoteSource>()
        .and_then(|r| r.measurement.clone());
    if let Some(measurement) = measurement.and_then(|m| lookup(removal, &m)) {
        update::<MeasurementData>(&measurement, |m| {
            if m.remote_source.as_deref() == Some(mrid.as_str()) {
                m.remote_source = None;
            }
        });
    }
    update_concrete::<RemoteSource>(entity, |r| r.measurement = None);
    removal.delegate(entity, REMOTE_SOURCE)
}

pub fn remove_substation(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let feeders = entity
        .borrow()
        .downcast_ref::<Substation>()
        .map(|s| s.normal_energized_feeders.clone())
        .unwrap_or_default();
    for feeder in lookup_all(removal, &feeders) {
        update_concrete::<Feeder>(&feeder, |f| f.normal_energizing_substation = None);
    }
    update_concrete::<Substation>(entity, |s| s.normal_energized_feeders.clear());
    removal.delegate(entity, SUBSTATION)
}

pub fn remove_feeder(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let substation = entity
        .borrow()
        .downcast_ref::<Feeder>()
        .and_then(|f| f.normal_energizing_substation.clone());
    if let Some(substation) = substation.and_then(|s| lookup(removal, &s)) {
        update_concrete::<Substation>(&substation, |s| {
            s.normal_energized_feeders.remove(&mrid);
        });
    }
    update_concrete::<Feeder>(entity, |f| f.normal_energizing_substation = None);
    removal.delegate(entity, FEEDER)
}

/// Detaches the segment's clamps, or removes them with [`REMOVE_CLAMPS`].
pub fn remove_ac_line_segment(
    removal: &mut Removal<'_>,
    entity: &EntityHandle,
) -> StoreResult<()> {
    let clamps = entity
        .borrow()
        .downcast_ref::<AcLineSegment>()
        .map(|s| s.clamps.clone())
        .unwrap_or_default();
    let remove_clamps = removal.options().has_flag(REMOVE_CLAMPS);
    for clamp in lookup_all(removal, &clamps) {
        if remove_clamps {
            removal.remove_child(&clamp)?;
        } else {
            update_concrete::<Clamp>(&clamp, |c| c.ac_line_segment = None);
        }
    }
    update_concrete::<AcLineSegment>(entity, |s| s.clamps.clear());
    removal.delegate(entity, AC_LINE_SEGMENT)
}

pub fn remove_clamp(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let segment = entity
        .borrow()
        .downcast_ref::<Clamp>()
        .and_then(|c| c.ac_line_segment.clone());
    if let Some(segment) = segment.and_then(|s| lookup(removal, &s)) {
        update_concrete::<AcLineSegment>(&segment, |s| {
            s.clamps.remove(&mrid);
        });
    }
    update_concrete::<Clamp>(entity, |c| c.ac_line_segment = None);
    removal.delegate(entity, CLAMP)
}
