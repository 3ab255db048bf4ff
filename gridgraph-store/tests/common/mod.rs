//! A miniature catalogue shared by the store tests.
//!
//! Widgets sit at a place and own parts; a part may be shared by several
//! widgets. Places are only referenced, never owned.

#![allow(dead_code)]

use gridgraph_store::{
    BoundResolver, ObjectStore, ReferenceResolver, Removal, StoreError, StoreResult, StoreSchema,
};
use gridgraph_types::{
    impl_entity, shared, EntityHandle, Identified, Kind, Shared, IDENTIFIED_OBJECT,
};
use std::rc::Rc;

pub const THING: Kind = Kind::capability("Thing", &IDENTIFIED_OBJECT);
pub const PLACE: Kind = Kind::concrete("Place", &IDENTIFIED_OBJECT);
pub const WIDGET: Kind = Kind::concrete("Widget", &THING);
pub const PART: Kind = Kind::concrete("Part", &THING);
pub const GIZMO: Kind = Kind::concrete("Gizmo", &THING);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ThingData {
    pub mrid: String,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct Place {
    pub mrid: String,
}

#[derive(Debug, Default)]
pub struct Widget {
    pub thing: ThingData,
    pub place: Option<String>,
    pub parts: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Part {
    pub thing: ThingData,
    pub widgets: Vec<String>,
}

/// Registered nowhere; used to exercise unsupported-type errors.
#[derive(Debug, Default)]
pub struct Gizmo {
    pub thing: ThingData,
}

impl_entity!(Place, PLACE, mrid, {});
impl_entity!(Widget, WIDGET, thing.mrid, { ThingData => thing });
impl_entity!(Part, PART, thing.mrid, { ThingData => thing });
impl_entity!(Gizmo, GIZMO, thing.mrid, { ThingData => thing });

pub fn place(mrid: &str) -> Shared<Place> {
    shared(Place {
        mrid: mrid.to_string(),
    })
}

pub fn widget(mrid: &str) -> Shared<Widget> {
    shared(Widget {
        thing: ThingData {
            mrid: mrid.to_string(),
            label: mrid.to_uppercase(),
        },
        ..Default::default()
    })
}

pub fn part(mrid: &str) -> Shared<Part> {
    shared(Part {
        thing: ThingData {
            mrid: mrid.to_string(),
            label: mrid.to_uppercase(),
        },
        ..Default::default()
    })
}

pub fn gizmo(mrid: &str) -> Shared<Gizmo> {
    shared(Gizmo {
        thing: ThingData {
            mrid: mrid.to_string(),
            label: String::new(),
        },
    })
}

// ── Resolvers ───────────────────────────────────────────────────

fn link_error(what: &str) -> StoreError {
    StoreError::Link(what.to_string())
}

fn link_widget_place(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    let widget = from.downcast_mut::<Widget>().ok_or_else(|| link_error("not a widget"))?;
    widget.place = Some(to.mrid().to_string());
    Ok(())
}

fn link_widget_part(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    let widget = from.downcast_mut::<Widget>().ok_or_else(|| link_error("not a widget"))?;
    if !widget.parts.iter().any(|p| p == to.mrid()) {
        widget.parts.push(to.mrid().to_string());
    }
    Ok(())
}

fn link_part_widget(from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
    let part = from.downcast_mut::<Part>().ok_or_else(|| link_error("not a part"))?;
    if !part.widgets.iter().any(|w| w == to.mrid()) {
        part.widgets.push(to.mrid().to_string());
    }
    Ok(())
}

pub static WIDGET_PLACE: ReferenceResolver =
    ReferenceResolver::new("Widget.place", WIDGET, PLACE, link_widget_place);
pub static WIDGET_PARTS: ReferenceResolver =
    ReferenceResolver::new("Widget.parts", WIDGET, PART, link_widget_part);
pub static PART_WIDGETS: ReferenceResolver =
    ReferenceResolver::new("Part.widgets", PART, WIDGET, link_part_widget);

pub fn handle<T: gridgraph_types::Entity>(entity: &Shared<T>) -> EntityHandle {
    EntityHandle::from_shared(Rc::clone(entity))
}

pub fn widget_place(widget: &Shared<Widget>) -> BoundResolver {
    WIDGET_PLACE.bind(&handle(widget))
}

pub fn widget_part(widget: &Shared<Widget>) -> BoundResolver {
    WIDGET_PARTS.bind(&handle(widget)).with_reverse(&PART_WIDGETS)
}

pub fn part_widget(part: &Shared<Part>) -> BoundResolver {
    PART_WIDGETS.bind(&handle(part)).with_reverse(&WIDGET_PARTS)
}

// ── Removal policies ────────────────────────────────────────────

fn remove_widget(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let parts: Vec<String> = entity
        .borrow()
        .downcast_ref::<Widget>()
        .map(|w| w.parts.clone())
        .unwrap_or_default();

    for part_mrid in parts {
        let Some(part) = removal.store().lookup(&part_mrid).cloned() else {
            continue;
        };
        let sole_owner = {
            let mut guard = part.borrow_mut();
            let data = guard.downcast_mut::<Part>().ok_or_else(|| link_error("not a part"))?;
            let sole = data.widgets.len() == 1;
            data.widgets.retain(|w| *w != mrid);
            sole
        };
        if removal.cascade() && sole_owner {
            removal.remove_child(&part)?;
        }
    }
    if let Some(w) = entity.borrow_mut().downcast_mut::<Widget>() {
        w.parts.clear();
    }
    removal.delegate(entity, WIDGET)
}

fn remove_part(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let widgets: Vec<String> = entity
        .borrow()
        .downcast_ref::<Part>()
        .map(|p| p.widgets.clone())
        .unwrap_or_default();

    for widget_mrid in widgets {
        if let Some(widget) = removal.store().lookup(&widget_mrid).cloned() {
            if let Some(w) = widget.borrow_mut().downcast_mut::<Widget>() {
                w.parts.retain(|p| *p != mrid);
            }
        }
    }
    if let Some(p) = entity.borrow_mut().downcast_mut::<Part>() {
        p.widgets.clear();
    }
    removal.delegate(entity, PART)
}

/// Clears a removed place from every widget sitting at it.
fn remove_place(removal: &mut Removal<'_>, entity: &EntityHandle) -> StoreResult<()> {
    let mrid = entity.mrid();
    let at_place = removal.store().list_of(WIDGET, |w| {
        w.downcast_ref::<Widget>()
            .is_some_and(|w| w.place.as_deref() == Some(mrid.as_str()))
    });
    for widget in at_place {
        if let Some(w) = widget.borrow_mut().downcast_mut::<Widget>() {
            w.place = None;
        }
    }
    removal.delegate(entity, PLACE)
}

pub fn schema() -> Rc<StoreSchema> {
    let schema = StoreSchema::builder("widgets")
        .entity::<Place>()
        .entity::<Widget>()
        .entity::<Part>()
        .removal_policy(PLACE, remove_place)
        .removal_policy(WIDGET, remove_widget)
        .removal_policy(PART, remove_part)
        .build()
        .expect("test schema is consistent");
    Rc::new(schema)
}

pub fn store() -> ObjectStore {
    ObjectStore::new(schema())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
