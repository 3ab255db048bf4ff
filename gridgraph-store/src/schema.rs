//! Per-kind handler registry.
//!
//! A [`StoreSchema`] declares which concrete kinds a store accepts, how each
//! is added, and which removal policy applies at each level of the kind
//! lineage. It is built once, validated eagerly, and shared by every store
//! created from it.

use crate::removal::{remove_identified_object, Removal};
use crate::{ObjectStore, StoreError, StoreResult};
use gridgraph_types::{Entity, EntityHandle, Kind, IDENTIFIED_OBJECT};
use std::collections::{BTreeMap, BTreeSet};

/// Adds a type-erased entity to a store.
pub type AddHandler = fn(&mut ObjectStore, EntityHandle) -> StoreResult<bool>;

/// Unlinks an entity (and, when cascading, its owned children) before the
/// store drops it. Policies finish by calling [`Removal::delegate`].
pub type RemovalPolicy = fn(&mut Removal<'_>, &EntityHandle) -> StoreResult<()>;

/// The validated handler registry of a store variant.
#[derive(Debug, Clone)]
pub struct StoreSchema {
    name: String,
    adders: BTreeMap<Kind, AddHandler>,
    policies: BTreeMap<Kind, RemovalPolicy>,
}

impl StoreSchema {
    pub fn builder(name: impl Into<String>) -> StoreSchemaBuilder {
        StoreSchemaBuilder {
            name: name.into(),
            adders: BTreeMap::new(),
            policies: BTreeMap::new(),
            problems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if entities of `kind` may be stored.
    pub fn supports(&self, kind: Kind) -> bool {
        self.adders.contains_key(&kind)
    }

    /// The concrete kinds this schema accepts, ordered by name.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.adders.keys().copied()
    }

    /// The add handler registered for `kind`.
    pub fn add_handler(&self, kind: Kind) -> StoreResult<AddHandler> {
        self.adders
            .get(&kind)
            .copied()
            .ok_or(StoreError::UnsupportedType(kind))
    }

    /// The most specific removal policy applying to `kind`.
    pub fn removal_policy(&self, kind: Kind) -> StoreResult<RemovalPolicy> {
        if !self.supports(kind) {
            return Err(StoreError::UnsupportedType(kind));
        }
        kind.lineage()
            .find_map(|k| self.policies.get(&k).copied())
            .ok_or(StoreError::UnsupportedType(kind))
    }

    /// The nearest policy strictly more general than `kind`.
    pub(crate) fn policy_above(&self, kind: Kind) -> Option<RemovalPolicy> {
        kind.lineage()
            .skip(1)
            .find_map(|k| self.policies.get(&k).copied())
    }
}

/// Collects registrations; [`StoreSchemaBuilder::build`] validates them.
pub struct StoreSchemaBuilder {
    name: String,
    adders: BTreeMap<Kind, AddHandler>,
    policies: BTreeMap<Kind, RemovalPolicy>,
    problems: Vec<String>,
}

impl StoreSchemaBuilder {
    /// Accepts `T` using the store's base add.
    #[must_use]
    pub fn entity<T: Entity>(self) -> Self {
        self.entity_with::<T>(ObjectStore::add_base)
    }

    /// Accepts `T` using a custom add handler.
    #[must_use]
    pub fn entity_with<T: Entity>(mut self, add: AddHandler) -> Self {
        if !T::KIND.is_concrete() {
            self.problems
                .push(format!("{} is abstract and cannot be stored", T::KIND));
        }
        if self.adders.insert(T::KIND, add).is_some() {
            self.problems
                .push(format!("{} registered more than once", T::KIND));
        }
        self
    }

    /// Registers the removal policy for `kind`, concrete or abstract.
    #[must_use]
    pub fn removal_policy(mut self, kind: Kind, policy: RemovalPolicy) -> Self {
        if self.policies.insert(kind, policy).is_some() {
            self.problems
                .push(format!("removal policy for {kind} registered more than once"));
        }
        self
    }

    /// Validates the registrations.
    ///
    /// Fails if a kind was registered twice, a registered kind is abstract or
    /// does not descend from IdentifiedObject, or a removal policy applies to
    /// no storable kind.
    pub fn build(mut self) -> StoreResult<StoreSchema> {
        self.policies
            .entry(IDENTIFIED_OBJECT)
            .or_insert(remove_identified_object);

        for kind in self.adders.keys() {
            if !kind.is_a(IDENTIFIED_OBJECT) {
                self.problems
                    .push(format!("{kind} does not descend from {IDENTIFIED_OBJECT}"));
            }
        }

        let reachable: BTreeSet<Kind> = self.adders.keys().flat_map(Kind::lineage).collect();
        for kind in self.policies.keys() {
            if *kind != IDENTIFIED_OBJECT && !reachable.contains(kind) {
                self.problems
                    .push(format!("removal policy for {kind} applies to no registered kind"));
            }
        }

        if !self.problems.is_empty() {
            return Err(StoreError::Schema(self.problems.join("; ")));
        }
        Ok(StoreSchema {
            name: self.name,
            adders: self.adders,
            policies: self.policies,
        })
    }
}
