//! A small radial network shared by the catalogue tests.
//!
//! ```text
//! loc1 ── sub1 ──(energizes)── fdr1
//!          │                    │
//!         br1 ── t1            acls1 ── t2
//!          │                    │
//!         an1 ── rs1            c1
//! ```

#![allow(dead_code)]

use gridgraph_cim::*;
use gridgraph_diff::ComparatorOptions;
use gridgraph_store::{ObjectStore, StoreResult};
use gridgraph_types::{shared, Entity, EntityHandle, Shared};
use std::rc::Rc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalogue() -> Catalogue {
    Catalogue::new(ComparatorOptions::default()).expect("catalogue is consistent")
}

pub fn handle<T: Entity>(entity: &Shared<T>) -> EntityHandle {
    EntityHandle::from_shared(Rc::clone(entity))
}

/// One entity of the sample network, added together with the references it
/// declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Location,
    Substation,
    Feeder,
    Breaker,
    BreakerTerminal,
    Segment,
    SegmentTerminal,
    Clamp,
    Analog,
    RemoteSource,
}

pub const STEPS: [Step; 10] = [
    Step::Location,
    Step::Substation,
    Step::Feeder,
    Step::Breaker,
    Step::BreakerTerminal,
    Step::Segment,
    Step::SegmentTerminal,
    Step::Clamp,
    Step::Analog,
    Step::RemoteSource,
];

pub fn apply(store: &mut ObjectStore, step: Step) -> StoreResult<()> {
    match step {
        Step::Location => {
            let mut location = Location::new("loc1");
            location.points = vec![
                PositionPoint { x: 1.0, y: 2.0 },
                PositionPoint { x: 3.0, y: 4.0 },
            ];
            store.add(&shared(location))?;
        }
        Step::Substation => {
            let mut substation = Substation::new("sub1");
            substation.container.psr.io.name = "North".to_string();
            let substation = handle(&shared(substation));
            store.add_handle(substation.clone())?;
            store.resolve_or_defer(&bind_location(&substation), Some("loc1"))?;
            store.resolve_or_defer(&bind_energized_feeder(&substation), Some("fdr1"))?;
        }
        Step::Feeder => {
            let feeder = handle(&shared(Feeder::new("fdr1")));
            store.add_handle(feeder.clone())?;
            store.resolve_or_defer(&bind_energizing_substation(&feeder), Some("sub1"))?;
        }
        Step::Breaker => {
            let mut breaker = Breaker::new("br1");
            breaker.normal_open = true;
            breaker.in_transit_time = 0.05;
            let breaker = handle(&shared(breaker));
            store.add_handle(breaker.clone())?;
            store.resolve_or_defer(&bind_container(&breaker), Some("sub1"))?;
            store.resolve_or_defer(&bind_location(&breaker), Some("loc1"))?;
        }
        Step::BreakerTerminal => terminal(store, "t1", "br1")?,
        Step::Segment => {
            let mut segment = AcLineSegment::new("acls1");
            segment.length = 120.5;
            let segment = handle(&shared(segment));
            store.add_handle(segment.clone())?;
            store.resolve_or_defer(&bind_container(&segment), Some("fdr1"))?;
        }
        Step::SegmentTerminal => terminal(store, "t2", "acls1")?,
        Step::Clamp => {
            let mut clamp = Clamp::new("c1");
            clamp.length_from_terminal1 = 10.0;
            let clamp = handle(&shared(clamp));
            store.add_handle(clamp.clone())?;
            store.resolve_or_defer(&bind_line_segment(&clamp), Some("acls1"))?;
        }
        Step::Analog => {
            let mut analog = Analog::new("an1");
            analog.measurement.unit = "A".to_string();
            analog.positive_flow_in = true;
            let analog = handle(&shared(analog));
            store.add_handle(analog.clone())?;
            store.resolve_or_defer(&bind_power_system_resource(&analog), Some("br1"))?;
            store.resolve_or_defer(&bind_remote_source(&analog), Some("rs1"))?;
        }
        Step::RemoteSource => {
            store.add(&shared(RemoteSource::new("rs1")))?;
        }
    }
    Ok(())
}

fn terminal(store: &mut ObjectStore, mrid: &str, equipment: &str) -> StoreResult<()> {
    let mut terminal = Terminal::new(mrid);
    terminal.sequence_number = 1;
    let terminal = handle(&shared(terminal));
    store.add_handle(terminal.clone())?;
    store.resolve_or_defer(&bind_conducting_equipment(&terminal), Some(equipment))?;
    Ok(())
}

pub fn load(catalogue: &Catalogue, steps: &[Step]) -> ObjectStore {
    let mut store = catalogue.new_store();
    for step in steps {
        apply(&mut store, *step).expect("sample network loads");
    }
    store
}

/// The sample network, loaded parents first.
pub fn network(catalogue: &Catalogue) -> ObjectStore {
    load(catalogue, &STEPS)
}

pub fn get<T: Entity>(store: &ObjectStore, mrid: &str) -> Shared<T> {
    store
        .get_or_err::<T>(mrid)
        .unwrap_or_else(|err| panic!("{err}"))
}

/// Every stored mRID that appears in any relationship field.
pub fn referenced_mrids(store: &ObjectStore) -> Vec<String> {
    let mut out = Vec::new();
    for entity in store.all_of(gridgraph_types::IDENTIFIED_OBJECT) {
        let entity = entity.borrow();
        if let Some(psr) = entity.facet_of::<PowerSystemResourceData>() {
            out.extend(psr.location.clone());
        }
        if let Some(equipment) = entity.facet_of::<EquipmentData>() {
            out.extend(equipment.containers.iter().cloned());
        }
        if let Some(ce) = entity.facet_of::<ConductingEquipmentData>() {
            out.extend(ce.terminals.iter().cloned());
        }
        if let Some(container) = entity.facet_of::<EquipmentContainerData>() {
            out.extend(container.equipment.iter().cloned());
        }
        if let Some(measurement) = entity.facet_of::<MeasurementData>() {
            out.extend(measurement.power_system_resource.clone());
            out.extend(measurement.remote_source.clone());
        }
        if let Some(terminal) = entity.downcast_ref::<Terminal>() {
            out.extend(terminal.conducting_equipment.clone());
        }
        if let Some(source) = entity.downcast_ref::<RemoteSource>() {
            out.extend(source.measurement.clone());
        }
        if let Some(substation) = entity.downcast_ref::<Substation>() {
            out.extend(substation.normal_energized_feeders.iter().cloned());
        }
        if let Some(feeder) = entity.downcast_ref::<Feeder>() {
            out.extend(feeder.normal_energizing_substation.clone());
        }
        if let Some(segment) = entity.downcast_ref::<AcLineSegment>() {
            out.extend(segment.clamps.iter().cloned());
        }
        if let Some(clamp) = entity.downcast_ref::<Clamp>() {
            out.extend(clamp.ac_line_segment.clone());
        }
    }
    out
}

/// Referenced mRIDs no longer held by the store.
pub fn dangling(store: &ObjectStore) -> Vec<String> {
    referenced_mrids(store)
        .into_iter()
        .filter(|mrid| !store.contains(mrid))
        .collect()
}
