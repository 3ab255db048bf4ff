//! Master resource identifiers (mRIDs).
//!
//! mRIDs are opaque strings. Catalogue builders that are not given one fall
//! back to a random UUID so every entity is addressable on creation.

use crate::{Result, TypesError};
use uuid::Uuid;

/// Generates a fresh random mRID.
#[must_use]
pub fn generate_mrid() -> String {
    Uuid::new_v4().to_string()
}

/// Checks that `mrid` can identify a stored entity.
pub fn validate_mrid(mrid: &str) -> Result<()> {
    if mrid.is_empty() {
        return Err(TypesError::EmptyMrid);
    }
    Ok(())
}
