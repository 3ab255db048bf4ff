//! A small catalogue for exercising comparisons.

#![allow(dead_code)]

use gridgraph_diff::{Comparator, ComparatorOptions, ObjectDiff};
use gridgraph_store::{ObjectStore, StoreSchema};
use gridgraph_types::{impl_entity, shared, Kind, Shared, IDENTIFIED_OBJECT};
use std::collections::BTreeSet;
use std::rc::Rc;

pub const NAMED: Kind = Kind::capability("Named", &IDENTIFIED_OBJECT);
pub const SENSOR: Kind = Kind::concrete("Sensor", &NAMED);
pub const PANEL: Kind = Kind::concrete("Panel", &NAMED);
pub const BEACON: Kind = Kind::concrete("Beacon", &NAMED);

#[derive(Debug, Default, Clone)]
pub struct NamedData {
    pub mrid: String,
    pub name: String,
}

#[derive(Debug, Default, Clone)]
pub struct Sensor {
    pub named: NamedData,
    pub enabled: bool,
    pub gain: f64,
    pub panel: Option<String>,
    pub readings: Vec<f64>,
}

#[derive(Debug, Default, Clone)]
pub struct Panel {
    pub named: NamedData,
    pub sensors: BTreeSet<String>,
}

/// Stored by the schema, but no comparison function is registered for it.
#[derive(Debug, Default, Clone)]
pub struct Beacon {
    pub named: NamedData,
}

impl_entity!(Sensor, SENSOR, named.mrid, { NamedData => named });
impl_entity!(Panel, PANEL, named.mrid, { NamedData => named });
impl_entity!(Beacon, BEACON, named.mrid, { NamedData => named });

fn named(mrid: &str) -> NamedData {
    NamedData {
        mrid: mrid.to_string(),
        name: format!("{mrid} name"),
    }
}

pub fn sensor(mrid: &str) -> Shared<Sensor> {
    shared(Sensor {
        named: named(mrid),
        enabled: true,
        gain: 1.0,
        ..Default::default()
    })
}

pub fn panel(mrid: &str) -> Shared<Panel> {
    shared(Panel {
        named: named(mrid),
        ..Default::default()
    })
}

pub fn beacon(mrid: &str) -> Shared<Beacon> {
    shared(Beacon { named: named(mrid) })
}

// ── Comparison functions ────────────────────────────────────────

pub fn compare_named(diff: &mut ObjectDiff<'_, NamedData>) {
    diff.value("name", |n| n.name.clone());
}

pub fn compare_sensor(diff: &mut ObjectDiff<'_, Sensor>) {
    diff.facet(|s| &s.named, compare_named)
        .value("enabled", |s| s.enabled)
        .float("gain", |s| s.gain)
        .reference("panel", |s| s.panel.as_deref())
        .ordered("readings", |s| s.readings.as_slice());
}

pub fn compare_panel(diff: &mut ObjectDiff<'_, Panel>) {
    diff.facet(|p| &p.named, compare_named);
    if diff.options().compare_container_membership {
        diff.unordered("sensors", |p| &p.sensors);
    }
}

pub fn schema() -> Rc<StoreSchema> {
    let schema = StoreSchema::builder("sensors")
        .entity::<Sensor>()
        .entity::<Panel>()
        .entity::<Beacon>()
        .build()
        .expect("test schema is consistent");
    Rc::new(schema)
}

pub fn comparator(options: ComparatorOptions) -> Comparator {
    Comparator::builder()
        .options(options)
        .register::<Sensor>(compare_sensor)
        .register::<Panel>(compare_panel)
        .build()
        .expect("test comparator is consistent")
}

pub fn store() -> ObjectStore {
    ObjectStore::new(schema())
}

/// A sensor mounted on a panel, with a few readings.
pub fn populated() -> ObjectStore {
    let mut store = store();
    let p = panel("p1");
    p.borrow_mut().sensors.insert("s1".into());
    let s = sensor("s1");
    {
        let mut s = s.borrow_mut();
        s.panel = Some("p1".into());
        s.readings = vec![1.0, 2.0, 3.0];
    }
    store.add(&p).unwrap();
    store.add(&s).unwrap();
    store
}
