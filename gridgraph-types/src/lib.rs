//! Entity identity contract for gridgraph.
//!
//! This crate defines the minimal surface every stored object exposes:
//! - [`Kind`] type tags with a single-parent capability lineage
//! - [`Identified`] (object safe) and [`Entity`] (statically typed) traits
//! - [`EntityHandle`], the shared, type-erased handle stores hold
//! - mRID generation and validation
//!
//! Concrete entity catalogues live elsewhere; nothing here knows about
//! equipment, terminals or any other domain type.

mod handle;
mod identified;
mod ids;
mod kind;

pub use handle::{shared, EntityHandle, Shared};
pub use identified::{Entity, Identified};
pub use ids::{generate_mrid, validate_mrid};
pub use kind::{Kind, IDENTIFIED_OBJECT};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors raised by identity checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    #[error("mRID must not be empty")]
    EmptyMrid,

    #[error("{kind} has no {facet} facet")]
    FacetMissing { kind: Kind, facet: &'static str },
}
