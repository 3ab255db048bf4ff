//! Deferred reference index.
//!
//! Holds relationships declared before their target exists. Every pending
//! reference is reachable both by target mRID (so the target's arrival can
//! resolve it) and by source mRID (so a loader can ask what an entity is still
//! waiting on). Both indexes are maintained together; a reference is never in
//! one without the other.

use crate::ReferenceResolver;
use gridgraph_types::EntityHandle;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A relationship whose target has not been added yet.
#[derive(Clone, Debug)]
pub struct UnresolvedReference {
    from: EntityHandle,
    from_mrid: String,
    to_mrid: String,
    resolver: &'static ReferenceResolver,
    reverse: Option<&'static ReferenceResolver>,
}

impl UnresolvedReference {
    pub(crate) fn new(
        from: EntityHandle,
        to_mrid: String,
        resolver: &'static ReferenceResolver,
        reverse: Option<&'static ReferenceResolver>,
    ) -> Self {
        let from_mrid = from.mrid();
        Self {
            from,
            from_mrid,
            to_mrid,
            resolver,
            reverse,
        }
    }

    /// The entity that declared the reference.
    pub fn from(&self) -> &EntityHandle {
        &self.from
    }

    /// mRID of the declaring entity, as it was when the reference was deferred.
    pub fn from_mrid(&self) -> &str {
        &self.from_mrid
    }

    /// mRID of the missing target.
    pub fn to_mrid(&self) -> &str {
        &self.to_mrid
    }

    pub fn resolver(&self) -> &'static ReferenceResolver {
        self.resolver
    }

    pub fn reverse(&self) -> Option<&'static ReferenceResolver> {
        self.reverse
    }

    fn same_edge(&self, other: &Self) -> bool {
        self.from.ptr_eq(&other.from)
            && self.to_mrid == other.to_mrid
            && self.resolver == other.resolver
            && self.reverse == other.reverse
    }
}

type Slot = u64;

/// The two-way multi-index of pending references.
#[derive(Debug, Default)]
pub(crate) struct PendingReferences {
    next_slot: Slot,
    refs: BTreeMap<Slot, UnresolvedReference>,
    by_target: HashMap<String, BTreeSet<Slot>>,
    by_source: HashMap<String, BTreeSet<Slot>>,
}

impl PendingReferences {
    /// Records a pending reference. Returns false if the identical edge is
    /// already pending.
    pub(crate) fn insert(&mut self, reference: UnresolvedReference) -> bool {
        let duplicate = self
            .slots_to(&reference.to_mrid)
            .any(|slot| self.refs[&slot].same_edge(&reference));
        if duplicate {
            return false;
        }

        let slot = self.next_slot;
        self.next_slot += 1;
        self.by_target
            .entry(reference.to_mrid.clone())
            .or_default()
            .insert(slot);
        self.by_source
            .entry(reference.from_mrid.clone())
            .or_default()
            .insert(slot);
        self.refs.insert(slot, reference);
        true
    }

    /// Removes and returns every reference waiting on `to_mrid`, oldest first.
    pub(crate) fn take_to(&mut self, to_mrid: &str) -> Vec<UnresolvedReference> {
        let slots = self.by_target.remove(to_mrid).unwrap_or_default();
        slots
            .into_iter()
            .filter_map(|slot| self.detach_source(slot))
            .collect()
    }

    /// Removes the references from `from_mrid` to `to_mrid` using `resolver`.
    pub(crate) fn remove_edge(
        &mut self,
        from_mrid: &str,
        to_mrid: &str,
        resolver: &ReferenceResolver,
    ) -> usize {
        let matching: Vec<Slot> = self
            .slots_from(from_mrid)
            .filter(|slot| {
                let r = &self.refs[slot];
                r.to_mrid == to_mrid && r.resolver == resolver
            })
            .collect();
        matching.iter().filter(|slot| self.remove_slot(**slot)).count()
    }

    /// Removes every reference declared by `from_mrid`.
    pub(crate) fn remove_from(&mut self, from_mrid: &str) -> usize {
        let slots = self.by_source.remove(from_mrid).unwrap_or_default();
        slots
            .into_iter()
            .filter(|slot| self.detach_target(*slot).is_some())
            .count()
    }

    pub(crate) fn to(&self, to_mrid: &str) -> impl Iterator<Item = &UnresolvedReference> {
        self.slots_to(to_mrid).map(|slot| &self.refs[&slot])
    }

    pub(crate) fn from(&self, from_mrid: &str) -> impl Iterator<Item = &UnresolvedReference> {
        self.slots_from(from_mrid).map(|slot| &self.refs[&slot])
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &UnresolvedReference> {
        self.refs.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.refs.len()
    }

    pub(crate) fn count_to(&self, to_mrid: &str) -> usize {
        self.by_target.get(to_mrid).map_or(0, BTreeSet::len)
    }

    fn slots_to(&self, to_mrid: &str) -> impl Iterator<Item = Slot> + '_ {
        self.by_target.get(to_mrid).into_iter().flatten().copied()
    }

    fn slots_from(&self, from_mrid: &str) -> impl Iterator<Item = Slot> + '_ {
        self.by_source.get(from_mrid).into_iter().flatten().copied()
    }

    fn remove_slot(&mut self, slot: Slot) -> bool {
        let Some(reference) = self.refs.remove(&slot) else {
            return false;
        };
        Self::unindex(&mut self.by_target, &reference.to_mrid, slot);
        Self::unindex(&mut self.by_source, &reference.from_mrid, slot);
        true
    }

    /// Drops `slot` whose target index entry has already been removed.
    fn detach_source(&mut self, slot: Slot) -> Option<UnresolvedReference> {
        let reference = self.refs.remove(&slot)?;
        Self::unindex(&mut self.by_source, &reference.from_mrid, slot);
        Some(reference)
    }

    /// Drops `slot` whose source index entry has already been removed.
    fn detach_target(&mut self, slot: Slot) -> Option<UnresolvedReference> {
        let reference = self.refs.remove(&slot)?;
        Self::unindex(&mut self.by_target, &reference.to_mrid, slot);
        Some(reference)
    }

    fn unindex(index: &mut HashMap<String, BTreeSet<Slot>>, mrid: &str, slot: Slot) {
        if let Some(slots) = index.get_mut(mrid) {
            slots.remove(&slot);
            if slots.is_empty() {
                index.remove(mrid);
            }
        }
    }
}
