//! Comparator options.
//!
//! Options may be read from a TOML file with a `[comparator]` section:
//!
//! ```toml
//! [comparator]
//! compare_terminals = false
//! float_tolerance = 1e-9
//! ```
//!
//! A missing section or field keeps its default.

use crate::{DiffError, DiffResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Switches for the optional parts of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparatorOptions {
    /// Compare the terminal lists of conducting equipment.
    pub compare_terminals: bool,
    /// Compare which containers equipment belongs to, and what containers hold.
    pub compare_container_membership: bool,
    /// Compare name types and the names filed under them.
    pub compare_names: bool,
    /// Absolute tolerance for float fields. NaN always equals NaN.
    pub float_tolerance: f64,
}

impl Default for ComparatorOptions {
    fn default() -> Self {
        Self {
            compare_terminals: true,
            compare_container_membership: true,
            compare_names: true,
            float_tolerance: 0.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OptionsFile {
    comparator: ComparatorOptions,
}

impl ComparatorOptions {
    /// Parses options from TOML, failing on unknown fields or a bad tolerance.
    pub fn from_toml_str(content: &str) -> DiffResult<Self> {
        let file: OptionsFile = toml::from_str(content)?;
        file.comparator.validated()
    }

    /// Reads and parses the options file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> DiffResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads options from `path`, falling back to defaults when the file is
    /// missing, unreadable or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No comparator options at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(options) => {
                info!("Loaded comparator options from {:?}", path);
                options
            }
            Err(DiffError::Io(e)) => {
                warn!("Failed to read comparator options {:?}: {}", path, e);
                Self::default()
            }
            Err(e) => {
                warn!(
                    "Failed to parse comparator options {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Options that skip every optional comparison group.
    pub fn minimal() -> Self {
        Self {
            compare_terminals: false,
            compare_container_membership: false,
            compare_names: false,
            float_tolerance: 0.0,
        }
    }

    fn validated(self) -> DiffResult<Self> {
        if !self.float_tolerance.is_finite() || self.float_tolerance < 0.0 {
            return Err(DiffError::Config(format!(
                "float_tolerance must be a finite, non-negative number, got {}",
                self.float_tolerance
            )));
        }
        Ok(self)
    }
}
