//! Type tags for stored entities.
//!
//! Every concrete entity type carries a [`Kind`]. Kinds form a single-parent
//! lineage ending at [`IDENTIFIED_OBJECT`]; abstract kinds (capabilities such
//! as "equipment") are never stored directly but can be used for polymorphic
//! lookup and iteration.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The root capability every stored entity satisfies.
pub const IDENTIFIED_OBJECT: Kind = Kind::root("IdentifiedObject");

/// A type tag used for dispatch, bucketing and capability checks.
///
/// Kinds are compared by name. Two kinds with the same name are the same
/// kind, so names must be unique within a catalogue.
#[derive(Clone, Copy)]
pub struct Kind {
    name: &'static str,
    parent: Option<&'static Kind>,
    concrete: bool,
}

impl Kind {
    /// The root of a kind lineage.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            concrete: false,
        }
    }

    /// An abstract capability refining `parent`.
    #[must_use]
    pub const fn capability(name: &'static str, parent: &'static Kind) -> Self {
        Self {
            name,
            parent: Some(parent),
            concrete: false,
        }
    }

    /// A concrete, storable kind refining `parent`.
    #[must_use]
    pub const fn concrete(name: &'static str, parent: &'static Kind) -> Self {
        Self {
            name,
            parent: Some(parent),
            concrete: true,
        }
    }

    /// Returns the kind's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the nearest more general kind, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Kind> {
        self.parent.copied()
    }

    /// Returns true if instances of this kind can be stored.
    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        self.concrete
    }

    /// Returns true if `self` is `other` or refines it.
    #[must_use]
    pub fn is_a(&self, other: Kind) -> bool {
        self.lineage().any(|k| k == other)
    }

    /// Iterates from this kind up to the root, inclusive.
    pub fn lineage(&self) -> impl Iterator<Item = Kind> + use<> {
        std::iter::successors(Some(*self), Kind::parent)
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Kind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
