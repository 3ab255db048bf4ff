//! The object store.
//!
//! Entities are bucketed by concrete kind and indexed by mRID. An mRID is
//! unique across every bucket at once. Relationships are declared through
//! [`ObjectStore::resolve_or_defer`]; a relationship whose target is missing
//! is parked in the deferred reference index and linked as soon as the target
//! is added.

use crate::pending::{PendingReferences, UnresolvedReference};
use crate::removal::{Removal, RemoveOptions};
use crate::{BoundResolver, NameType, ReferenceResolver, StoreError, StoreResult, StoreSchema};
use gridgraph_types::{validate_mrid, Entity, EntityHandle, Identified, Kind, Shared};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// An in-memory, single-writer store of identified entities.
#[derive(Debug)]
pub struct ObjectStore {
    schema: Rc<StoreSchema>,
    buckets: BTreeMap<Kind, BTreeMap<String, EntityHandle>>,
    index: HashMap<String, Kind>,
    pub(crate) pending: PendingReferences,
    pub(crate) name_types: BTreeMap<String, NameType>,
}

impl ObjectStore {
    /// Creates an empty store accepting the kinds `schema` registers.
    pub fn new(schema: Rc<StoreSchema>) -> Self {
        Self {
            schema,
            buckets: BTreeMap::new(),
            index: HashMap::new(),
            pending: PendingReferences::default(),
            name_types: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &StoreSchema {
        &self.schema
    }

    /// A shared pointer to the schema, for creating sibling stores.
    pub fn shared_schema(&self) -> Rc<StoreSchema> {
        Rc::clone(&self.schema)
    }

    // ── Adding ──────────────────────────────────────────────────────

    /// Adds a typed entity.
    ///
    /// Returns `Ok(false)` if a different entity already uses the mRID,
    /// `Ok(true)` on success or when this exact instance is already stored.
    pub fn add<T: Entity>(&mut self, entity: &Shared<T>) -> StoreResult<bool> {
        self.try_dispatch_add(EntityHandle::from_shared(Rc::clone(entity)))
    }

    /// Adds an already type-erased entity, e.g. one produced by a decoder.
    pub fn add_handle(&mut self, entity: EntityHandle) -> StoreResult<bool> {
        self.try_dispatch_add(entity)
    }

    /// Routes `entity` to the add handler registered for its kind.
    pub fn try_dispatch_add(&mut self, entity: EntityHandle) -> StoreResult<bool> {
        validate_mrid(&entity.mrid())?;
        let add = self.schema.add_handler(entity.kind())?;
        add(self, entity)
    }

    /// The generic add every handler builds on.
    ///
    /// Inserts the entity and resolves every pending reference to it. Fails
    /// before mutating anything if the mRID is empty, the kind unsupported, or
    /// a pending reference expects a different kind.
    pub fn add_base(&mut self, entity: EntityHandle) -> StoreResult<bool> {
        let mrid = entity.mrid();
        validate_mrid(&mrid)?;
        let kind = entity.kind();
        if !self.schema.supports(kind) {
            return Err(StoreError::UnsupportedType(kind));
        }

        if let Some(existing) = self.lookup(&mrid) {
            if existing.ptr_eq(&entity) {
                return Ok(true);
            }
            warn!(%mrid, %kind, existing = %existing.kind(), "rejecting duplicate mRID");
            return Ok(false);
        }

        let mismatch = self
            .pending
            .to(&mrid)
            .map(UnresolvedReference::resolver)
            .find(|resolver| !kind.is_a(resolver.to));
        if let Some(resolver) = mismatch {
            return Err(StoreError::ReferenceTypeMismatch {
                resolver: resolver.role,
                mrid,
                expected: resolver.to,
                actual: kind,
            });
        }

        self.buckets
            .entry(kind)
            .or_default()
            .insert(mrid.clone(), entity.clone());
        self.index.insert(mrid.clone(), kind);
        trace!(%mrid, %kind, "added");

        self.resolve_waiting_on(&entity, &mrid)
            .map(|()| true)
    }

    /// Links everything waiting on the newly stored `target`.
    ///
    /// If any link fails the add is undone: `target` leaves the store and
    /// every reference taken for it goes back to the pending index.
    fn resolve_waiting_on(&mut self, target: &EntityHandle, mrid: &str) -> StoreResult<()> {
        let waiting = self.pending.take_to(mrid);
        let mut failure = None;
        for reference in &waiting {
            let linked = self.link(
                reference.from(),
                target,
                reference.resolver(),
                reference.reverse(),
            );
            if let Err(err) = linked {
                failure = Some(err);
                break;
            }
            debug!(
                from = %reference.from_mrid(),
                to = %mrid,
                role = reference.resolver().role,
                "resolved deferred reference"
            );
        }

        let Some(err) = failure else {
            return Ok(());
        };
        self.remove(target);
        for reference in waiting {
            self.pending.insert(reference);
        }
        warn!(%mrid, %err, "add undone after a deferred reference failed to link");
        Err(err)
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// Returns true if any entity uses `mrid`.
    pub fn contains(&self, mrid: &str) -> bool {
        self.index.contains_key(mrid)
    }

    /// Returns true if this exact instance is stored.
    pub fn holds(&self, entity: &EntityHandle) -> bool {
        self.lookup(&entity.mrid())
            .is_some_and(|stored| stored.ptr_eq(entity))
    }

    /// The entity using `mrid`, whatever its kind.
    pub fn lookup(&self, mrid: &str) -> Option<&EntityHandle> {
        let kind = self.index.get(mrid)?;
        self.buckets.get(kind)?.get(mrid)
    }

    /// The entity using `mrid` if it is a `kind`. `kind` may be abstract.
    pub fn get_kind(&self, kind: Kind, mrid: &str) -> Option<&EntityHandle> {
        self.lookup(mrid).filter(|entity| entity.kind().is_a(kind))
    }

    /// The `T` using `mrid`.
    pub fn get<T: Entity>(&self, mrid: &str) -> Option<Shared<T>> {
        self.buckets.get(&T::KIND)?.get(mrid)?.downcast()
    }

    /// Like [`get`](Self::get), failing with [`StoreError::NotFound`].
    pub fn get_or_err<T: Entity>(&self, mrid: &str) -> StoreResult<Shared<T>> {
        self.get(mrid).ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            mrid: mrid.to_string(),
        })
    }

    /// Number of stored entities that are a `kind`.
    pub fn count(&self, kind: Kind) -> usize {
        self.buckets
            .iter()
            .filter(|(bucket, _)| bucket.is_a(kind))
            .map(|(_, entities)| entities.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every stored mRID.
    pub fn ids(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Iterates the entities that are a `kind`, bucket by bucket.
    pub fn all_of(&self, kind: Kind) -> impl Iterator<Item = &EntityHandle> {
        self.buckets
            .iter()
            .filter(move |(bucket, _)| bucket.is_a(kind))
            .flat_map(|(_, entities)| entities.values())
    }

    /// Every stored `T`, ordered by mRID.
    pub fn all<T: Entity>(&self) -> Vec<Shared<T>> {
        self.buckets
            .get(&T::KIND)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter_map(EntityHandle::downcast::<T>)
            .collect()
    }

    /// The entities of `kind` matching `predicate`.
    pub fn list_of(
        &self,
        kind: Kind,
        predicate: impl Fn(&dyn Identified) -> bool,
    ) -> Vec<EntityHandle> {
        self.all_of(kind)
            .filter(|entity| predicate(&*entity.borrow()))
            .cloned()
            .collect()
    }

    /// mRIDs of the entities of `kind` matching `predicate`.
    pub fn ids_of(
        &self,
        kind: Kind,
        predicate: impl Fn(&dyn Identified) -> bool,
    ) -> BTreeSet<String> {
        self.all_of(kind)
            .filter(|entity| predicate(&*entity.borrow()))
            .map(EntityHandle::mrid)
            .collect()
    }

    /// The entities of `kind` matching `predicate`, keyed by mRID.
    pub fn map_of(
        &self,
        kind: Kind,
        predicate: impl Fn(&dyn Identified) -> bool,
    ) -> BTreeMap<String, EntityHandle> {
        self.all_of(kind)
            .filter(|entity| predicate(&*entity.borrow()))
            .map(|entity| (entity.mrid(), entity.clone()))
            .collect()
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Drops `entity` from its kind's bucket without touching relationships.
    ///
    /// Returns false unless this exact instance was stored.
    pub fn remove(&mut self, entity: &EntityHandle) -> bool {
        let kind = entity.kind();
        let mrid = entity.mrid();
        let Some(bucket) = self.buckets.get_mut(&kind) else {
            return false;
        };
        if !bucket.get(&mrid).is_some_and(|stored| stored.ptr_eq(entity)) {
            return false;
        }
        bucket.remove(&mrid);
        if bucket.is_empty() {
            self.buckets.remove(&kind);
        }
        self.index.remove(&mrid);
        trace!(%mrid, %kind, "removed");
        true
    }

    /// Runs the removal policies for `entity` and drops it.
    ///
    /// Returns false if the entity was not stored.
    pub fn try_dispatch_remove(
        &mut self,
        entity: &EntityHandle,
        options: &RemoveOptions,
    ) -> StoreResult<bool> {
        self.remove_tree(entity, options)
            .map(|removed| !removed.is_empty())
    }

    /// Like [`try_dispatch_remove`](Self::try_dispatch_remove), returning the
    /// mRIDs dropped, children first.
    pub fn remove_tree(
        &mut self,
        entity: &EntityHandle,
        options: &RemoveOptions,
    ) -> StoreResult<Vec<String>> {
        self.schema.removal_policy(entity.kind())?;
        let mut removal = Removal::new(self, options.clone());
        removal.run(entity)?;
        let removed = removal.into_removed();
        debug!(
            mrid = %entity.mrid(),
            cascade = options.cascade,
            removed = removed.len(),
            "removal finished"
        );
        Ok(removed)
    }

    // ── References ──────────────────────────────────────────────────

    /// Links `bound` to the entity `to_mrid`, or defers until it is added.
    ///
    /// A missing or empty `to_mrid` means there is nothing to resolve and
    /// returns `Ok(true)`. Returns `Ok(false)` when the reference was deferred.
    pub fn resolve_or_defer(
        &mut self,
        bound: &BoundResolver,
        to_mrid: Option<&str>,
    ) -> StoreResult<bool> {
        let Some(to_mrid) = to_mrid.filter(|mrid| !mrid.is_empty()) else {
            return Ok(true);
        };
        let resolver = bound.resolver();
        let from = bound.from();
        if !from.kind().is_a(resolver.from) {
            return Err(StoreError::InvalidInput(format!(
                "{} cannot resolve {}, which starts from {}",
                from.kind(),
                resolver.role,
                resolver.from
            )));
        }

        match self.lookup(to_mrid).cloned() {
            Some(target) => {
                if !target.kind().is_a(resolver.to) {
                    return Err(StoreError::ReferenceTypeMismatch {
                        resolver: resolver.role,
                        mrid: to_mrid.to_string(),
                        expected: resolver.to,
                        actual: target.kind(),
                    });
                }
                self.link(from, &target, resolver, bound.reverse())?;
                Ok(true)
            }
            None => {
                let reference = UnresolvedReference::new(
                    from.clone(),
                    to_mrid.to_string(),
                    resolver,
                    bound.reverse(),
                );
                if self.pending.insert(reference) {
                    debug!(
                        from = %from.mrid(),
                        to = %to_mrid,
                        role = resolver.role,
                        "deferred reference"
                    );
                }
                Ok(false)
            }
        }
    }

    /// Links both directions of a resolved pair and scrubs the now redundant
    /// inverse edge from the pending index.
    fn link(
        &mut self,
        from: &EntityHandle,
        to: &EntityHandle,
        resolver: &ReferenceResolver,
        reverse: Option<&'static ReferenceResolver>,
    ) -> StoreResult<()> {
        check_pair(from, to, resolver)?;
        if let Some(reverse) = reverse {
            check_pair(to, from, reverse)?;
        }
        link_one(from, to, resolver)?;
        if let Some(reverse) = reverse {
            link_one(to, from, reverse)?;
            self.pending.remove_edge(&to.mrid(), &from.mrid(), reverse);
        }
        Ok(())
    }

    /// With `Some(mrid)`, whether anything is waiting on `mrid`; with `None`,
    /// whether anything is waiting at all.
    pub fn has_unresolved(&self, mrid: Option<&str>) -> bool {
        self.count_unresolved(mrid) > 0
    }

    /// With `Some(mrid)`, how many references wait on `mrid`; with `None`,
    /// how many are pending in total.
    pub fn count_unresolved(&self, mrid: Option<&str>) -> usize {
        match mrid {
            Some(mrid) => self.pending.count_to(mrid),
            None => self.pending.len(),
        }
    }

    /// Target mRIDs still missing for `resolver`, across all sources.
    pub fn unresolved_mrids_for(&self, resolver: &ReferenceResolver) -> BTreeSet<String> {
        self.pending
            .iter()
            .filter(|r| r.resolver() == resolver)
            .map(|r| r.to_mrid().to_string())
            .collect()
    }

    /// Target mRIDs still missing for one bound source and resolver.
    pub fn unresolved_mrids_for_bound(&self, bound: &BoundResolver) -> BTreeSet<String> {
        self.pending
            .from(&bound.from().mrid())
            .filter(|r| r.resolver() == bound.resolver() && r.from().ptr_eq(bound.from()))
            .map(|r| r.to_mrid().to_string())
            .collect()
    }

    /// References declared by `mrid` that are still pending.
    pub fn pending_from(&self, mrid: &str) -> impl Iterator<Item = &UnresolvedReference> {
        self.pending.from(mrid)
    }

    /// References waiting on `mrid`.
    pub fn pending_to(&self, mrid: &str) -> impl Iterator<Item = &UnresolvedReference> {
        self.pending.to(mrid)
    }

    /// Every pending reference.
    pub fn all_unresolved(&self) -> impl Iterator<Item = &UnresolvedReference> {
        self.pending.iter()
    }

    // ── Name types ──────────────────────────────────────────────────

    /// Adds a name type. Returns false if one with the same name exists.
    pub fn add_name_type(&mut self, name_type: NameType) -> bool {
        if self.name_types.contains_key(name_type.name()) {
            return false;
        }
        self.name_types
            .insert(name_type.name().to_string(), name_type);
        true
    }

    pub fn get_name_type(&self, name: &str) -> Option<&NameType> {
        self.name_types.get(name)
    }

    pub fn get_name_type_mut(&mut self, name: &str) -> Option<&mut NameType> {
        self.name_types.get_mut(name)
    }

    /// Every name type, ordered by name.
    pub fn name_types(&self) -> impl Iterator<Item = &NameType> {
        self.name_types.values()
    }
}

fn link_one(
    from: &EntityHandle,
    to: &EntityHandle,
    resolver: &ReferenceResolver,
) -> StoreResult<()> {
    let target = to.try_borrow().map_err(|_| busy(to))?;
    let mut source = from.try_borrow_mut().map_err(|_| busy(from))?;
    trace!(from = %source.mrid(), to = %target.mrid(), role = resolver.role, "linking");
    resolver.apply(&mut *source, &*target)
}

/// Fails where `link_one` would fail before calling the link function.
fn check_pair(
    from: &EntityHandle,
    to: &EntityHandle,
    resolver: &ReferenceResolver,
) -> StoreResult<()> {
    if !from.kind().is_a(resolver.from) {
        return Err(StoreError::InvalidInput(format!(
            "{} cannot resolve {}, which starts from {}",
            from.kind(),
            resolver.role,
            resolver.from
        )));
    }
    if !to.kind().is_a(resolver.to) {
        return Err(StoreError::ReferenceTypeMismatch {
            resolver: resolver.role,
            mrid: to.mrid(),
            expected: resolver.to,
            actual: to.kind(),
        });
    }
    drop(from.try_borrow_mut().map_err(|_| busy(from))?);
    drop(to.try_borrow().map_err(|_| busy(to))?);
    Ok(())
}

fn busy(entity: &EntityHandle) -> StoreError {
    StoreError::InvalidInput(format!(
        "{} is borrowed elsewhere and cannot be linked",
        entity.kind()
    ))
}
