//! Structural comparison of gridgraph object stores.
//!
//! A [`Comparator`] walks a source and a target [`ObjectStore`], matches
//! entities by mRID, and reports what is missing on either side and which
//! fields differ on entities present in both. Each concrete kind has exactly
//! one registered comparison function built from the [`ObjectDiff`]
//! primitives.
//!
//! [`ObjectStore`]: gridgraph_store::ObjectStore

mod comparator;
mod error;
mod options;
mod report;
mod value;

pub use comparator::{compare_name_type, CompareFn, Comparator, ComparatorBuilder, ObjectDiff};
pub use error::{DiffError, DiffResult};
pub use options::ComparatorOptions;
pub use report::{
    Difference, DifferenceReport, IndexChange, NameTypeDifferences, ObjectDifference,
};
pub use value::{floats_match, FieldValue};
