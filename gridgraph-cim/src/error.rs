//! Error types for the catalogue.

use gridgraph_diff::DiffError;
use gridgraph_store::StoreError;
use thiserror::Error;

/// Result type for catalogue operations.
pub type CimResult<T> = Result<T, CimError>;

/// Errors raised while assembling or using the catalogue.
#[derive(Debug, Error)]
pub enum CimError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Diff(#[from] DiffError),
}
