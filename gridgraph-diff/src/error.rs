//! Error types for store comparison.

use gridgraph_types::Kind;
use thiserror::Error;

/// Result type for comparison operations.
pub type DiffResult<T> = Result<T, DiffError>;

/// Errors that can occur while configuring or running a comparison.
#[derive(Debug, Error)]
pub enum DiffError {
    /// An entity of this kind was met but no comparison function handles it.
    #[error("no comparator registered for {0}")]
    MissingComparator(Kind),

    #[error("comparator for {0} registered more than once")]
    DuplicateComparator(Kind),

    /// Kinds a store schema accepts that the comparator cannot compare.
    #[error("comparator does not cover: {}", format_kinds(.0))]
    UncoveredKinds(Vec<Kind>),

    #[error("invalid comparator options: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("options parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_kinds(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(Kind::name)
        .collect::<Vec<_>>()
        .join(", ")
}
