//! Error types for the object store.

use gridgraph_types::{Kind, TypesError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// A duplicate mRID is not an error: `add` reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The request itself is malformed (empty mRID, self-reference, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No handler is registered for this kind.
    #[error("unsupported type: {0}")]
    UnsupportedType(Kind),

    /// A reference target does not have the kind its resolver declares.
    #[error(
        "reference type mismatch resolving {resolver}: {mrid} is a {actual}, expected {expected}"
    )]
    ReferenceTypeMismatch {
        resolver: &'static str,
        mrid: String,
        expected: Kind,
        actual: Kind,
    },

    /// No entity of the requested kind has this mRID.
    #[error("{kind} not found: {mrid}")]
    NotFound { kind: Kind, mrid: String },

    /// A link function could not connect a resolved pair.
    #[error("link error: {0}")]
    Link(String),

    /// The handler registry is inconsistent.
    #[error("schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Types(#[from] TypesError),
}
