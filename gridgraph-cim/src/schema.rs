//! Registration of the catalogue with the store and the comparator.

use crate::compare::*;
use crate::entities::*;
use crate::error::CimResult;
use crate::kinds::*;
use crate::removal::*;
use gridgraph_diff::{Comparator, ComparatorOptions, DiffResult, DifferenceReport};
use gridgraph_store::{ObjectStore, StoreError, StoreResult, StoreSchema};
use gridgraph_types::EntityHandle;
use std::rc::Rc;
use tracing::debug;

/// Rejects clamps placed before the start of their segment.
fn add_clamp(store: &mut ObjectStore, entity: EntityHandle) -> StoreResult<bool> {
    let offset = entity
        .borrow()
        .downcast_ref::<Clamp>()
        .map(|c| c.length_from_terminal1);
    if let Some(offset) = offset.filter(|o| *o < 0.0) {
        return Err(StoreError::InvalidInput(format!(
            "clamp {} has negative length from terminal 1: {offset}",
            entity.mrid()
        )));
    }
    store.add_base(entity)
}

/// The store schema accepting every catalogue type.
pub fn network_schema() -> StoreResult<StoreSchema> {
    StoreSchema::builder("network")
        .entity::<Location>()
        .entity::<Terminal>()
        .entity::<RemoteSource>()
        .entity::<Analog>()
        .entity::<Substation>()
        .entity::<Feeder>()
        .entity::<Breaker>()
        .entity::<AcLineSegment>()
        .entity_with::<Clamp>(add_clamp)
        .removal_policy(POWER_SYSTEM_RESOURCE, remove_power_system_resource)
        .removal_policy(EQUIPMENT, remove_equipment)
        .removal_policy(CONDUCTING_EQUIPMENT, remove_conducting_equipment)
        .removal_policy(EQUIPMENT_CONTAINER, remove_equipment_container)
        .removal_policy(MEASUREMENT, remove_measurement)
        .removal_policy(LOCATION, remove_location)
        .removal_policy(TERMINAL, remove_terminal)
        .removal_policy(REMOTE_SOURCE, remove_remote_source)
        .removal_policy(SUBSTATION, remove_substation)
        .removal_policy(FEEDER, remove_feeder)
        .removal_policy(AC_LINE_SEGMENT, remove_ac_line_segment)
        .removal_policy(CLAMP, remove_clamp)
        .build()
}

/// A comparator covering every catalogue type.
pub fn network_comparator(options: ComparatorOptions) -> DiffResult<Comparator> {
    Comparator::builder()
        .options(options)
        .register::<Location>(compare_location)
        .register::<Terminal>(compare_terminal)
        .register::<RemoteSource>(compare_remote_source)
        .register::<Analog>(compare_analog)
        .register::<Substation>(compare_substation)
        .register::<Feeder>(compare_feeder)
        .register::<Breaker>(compare_breaker)
        .register::<AcLineSegment>(compare_ac_line_segment)
        .register::<Clamp>(compare_clamp)
        .build()
}

/// The catalogue's schema and comparator, checked against each other.
pub struct Catalogue {
    schema: Rc<StoreSchema>,
    comparator: Comparator,
}

impl Catalogue {
    pub fn new(options: ComparatorOptions) -> CimResult<Self> {
        let schema = network_schema()?;
        let comparator = network_comparator(options)?;
        comparator.validate_against(&schema)?;
        debug!(
            schema = schema.name(),
            kinds = schema.kinds().count(),
            "catalogue ready"
        );
        Ok(Self {
            schema: Rc::new(schema),
            comparator,
        })
    }

    /// An empty store sharing the catalogue's schema.
    pub fn new_store(&self) -> ObjectStore {
        ObjectStore::new(Rc::clone(&self.schema))
    }

    pub fn compare(&self, source: &ObjectStore, target: &ObjectStore) -> CimResult<DifferenceReport> {
        Ok(self.comparator.compare(source, target)?)
    }

    pub fn schema(&self) -> &StoreSchema {
        &self.schema
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }
}
