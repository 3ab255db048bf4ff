//! Cascading removal.
//!
//! Removal is policy driven. The policy registered for an entity's kind (or
//! its nearest ancestor) unlinks every back-pointer and membership the entity
//! participates in, optionally removes strictly owned children, and then
//! delegates to the next more general policy. The chain ends at the
//! identified-object policy. Only after the whole chain has run is the entity
//! dropped from the store, so children always leave before their parent.

use crate::{ObjectStore, StoreResult};
use gridgraph_types::{EntityHandle, Kind};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Options controlling a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Also remove children owned solely by the removed entity.
    pub cascade: bool,
    flags: BTreeSet<&'static str>,
}

impl RemoveOptions {
    /// Options that cascade into solely owned children.
    pub fn cascading() -> Self {
        Self {
            cascade: true,
            ..Default::default()
        }
    }

    /// Sets a policy-specific switch.
    #[must_use]
    pub fn with_flag(mut self, flag: &'static str) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

/// State of one removal pass, handed to every policy it runs.
pub struct Removal<'s> {
    store: &'s mut ObjectStore,
    options: RemoveOptions,
    visited: HashSet<String>,
    removed: Vec<String>,
}

impl<'s> Removal<'s> {
    pub(crate) fn new(store: &'s mut ObjectStore, options: RemoveOptions) -> Self {
        Self {
            store,
            options,
            visited: HashSet::new(),
            removed: Vec::new(),
        }
    }

    pub fn store(&mut self) -> &mut ObjectStore {
        self.store
    }

    pub fn options(&self) -> &RemoveOptions {
        &self.options
    }

    /// Shorthand for `options().cascade`.
    pub fn cascade(&self) -> bool {
        self.options.cascade
    }

    /// mRIDs dropped so far, in removal order.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Fully removes an owned child: runs its policies, then drops it.
    ///
    /// Returns false if the child was already handled in this pass or is not
    /// held by the store.
    pub fn remove_child(&mut self, child: &EntityHandle) -> StoreResult<bool> {
        debug!(mrid = %child.mrid(), kind = %child.kind(), "cascading into owned child");
        self.run(child)
    }

    /// Runs the next policy more general than `from` on `entity`.
    pub fn delegate(&mut self, entity: &EntityHandle, from: Kind) -> StoreResult<()> {
        let next = self.store.schema().policy_above(from);
        match next {
            Some(policy) => policy(self, entity),
            None => Ok(()),
        }
    }

    pub(crate) fn run(&mut self, entity: &EntityHandle) -> StoreResult<bool> {
        let mrid = entity.mrid();
        if !self.store.holds(entity) || !self.visited.insert(mrid.clone()) {
            return Ok(false);
        }

        let policy = self.store.schema().removal_policy(entity.kind())?;
        policy(self, entity)?;

        if self.store.remove(entity) {
            self.removed.push(mrid);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn into_removed(self) -> Vec<String> {
        self.removed
    }
}

/// The root policy: strips the entity's names and drops the references it is
/// still waiting on.
pub(crate) fn remove_identified_object(
    removal: &mut Removal<'_>,
    entity: &EntityHandle,
) -> StoreResult<()> {
    let mrid = entity.mrid();
    let store = removal.store();
    let dropped = store.pending.remove_from(&mrid);
    let names: usize = store
        .name_types
        .values_mut()
        .map(|name_type| name_type.remove_names_for(&mrid))
        .sum();
    if dropped > 0 || names > 0 {
        debug!(%mrid, dropped, names, "cleared pending references and names");
    }
    Ok(())
}
