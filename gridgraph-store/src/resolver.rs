//! Reference resolvers.
//!
//! A [`ReferenceResolver`] describes one directed relationship role between
//! two kinds, e.g. "a terminal's conducting equipment". Resolvers are
//! declared once as `static` items and shared by every entity of the source
//! kind. Binding a resolver to a concrete source entity gives a
//! [`BoundResolver`], the unit of work handed to
//! [`ObjectStore::resolve_or_defer`](crate::ObjectStore::resolve_or_defer).

use crate::{StoreError, StoreResult};
use gridgraph_types::{EntityHandle, Identified, Kind};
use std::fmt;

/// Links a resolved target into its source.
///
/// The first argument is the source entity, the second the target. Link
/// functions only ever mutate the source.
pub type LinkFn = fn(&mut dyn Identified, &dyn Identified) -> StoreResult<()>;

/// Immutable descriptor of one relationship role.
pub struct ReferenceResolver {
    /// Human readable role name, unique within a catalogue.
    pub role: &'static str,
    /// Kind the relationship starts from.
    pub from: Kind,
    /// Kind the relationship points at.
    pub to: Kind,
    /// Connects a resolved target into the source.
    pub link: LinkFn,
}

impl ReferenceResolver {
    /// Declares a resolver.
    pub const fn new(role: &'static str, from: Kind, to: Kind, link: LinkFn) -> Self {
        Self {
            role,
            from,
            to,
            link,
        }
    }

    /// Binds this resolver to a source entity.
    pub fn bind(&'static self, from: &EntityHandle) -> BoundResolver {
        BoundResolver::new(from, self)
    }

    pub(crate) fn apply(&self, from: &mut dyn Identified, to: &dyn Identified) -> StoreResult<()> {
        if !to.kind().is_a(self.to) {
            return Err(StoreError::ReferenceTypeMismatch {
                resolver: self.role,
                mrid: to.mrid().to_string(),
                expected: self.to,
                actual: to.kind(),
            });
        }
        (self.link)(from, to)
    }
}

// Resolvers are identified by role and endpoints; the link function is not compared.
impl PartialEq for ReferenceResolver {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role && self.from == other.from && self.to == other.to
    }
}

impl Eq for ReferenceResolver {}

impl fmt::Debug for ReferenceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceResolver")
            .field("role", &self.role)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// A resolver bound to a source instance, plus an optional inverse.
#[derive(Clone, Debug)]
pub struct BoundResolver {
    from: EntityHandle,
    resolver: &'static ReferenceResolver,
    reverse: Option<&'static ReferenceResolver>,
}

impl BoundResolver {
    /// Binds `resolver` to `from` with no inverse.
    pub fn new(from: &EntityHandle, resolver: &'static ReferenceResolver) -> Self {
        Self {
            from: from.clone(),
            resolver,
            reverse: None,
        }
    }

    /// Adds the resolver for the opposite direction of the relationship.
    #[must_use]
    pub fn with_reverse(mut self, reverse: &'static ReferenceResolver) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// The bound source entity.
    pub fn from(&self) -> &EntityHandle {
        &self.from
    }

    /// The forward resolver.
    pub fn resolver(&self) -> &'static ReferenceResolver {
        self.resolver
    }

    /// The inverse resolver, if any.
    pub fn reverse(&self) -> Option<&'static ReferenceResolver> {
        self.reverse
    }
}
