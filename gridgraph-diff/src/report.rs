//! Comparison results.

use crate::{DiffResult, FieldValue};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One differing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Difference {
    /// A scalar field holds different values.
    Value { source: FieldValue, target: FieldValue },

    /// A single-valued reference points at different entities.
    Reference {
        source: Option<String>,
        target: Option<String>,
    },

    /// An unordered reference collection holds different members.
    Collection {
        missing_from_target: BTreeSet<String>,
        missing_from_source: BTreeSet<String>,
    },

    /// An ordered list differs at one or more indexes.
    Indexed { changes: Vec<IndexChange> },
}

/// The state of one index of an ordered list.
///
/// Both sides present means the element was modified; one side absent means
/// the element is missing from that side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexChange {
    pub index: usize,
    pub source: Option<FieldValue>,
    pub target: Option<FieldValue>,
}

impl IndexChange {
    pub fn is_modification(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }

    pub fn is_missing_from_target(&self) -> bool {
        self.source.is_some() && self.target.is_none()
    }

    pub fn is_missing_from_source(&self) -> bool {
        self.source.is_none() && self.target.is_some()
    }
}

/// The differing fields of one object present on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObjectDifference {
    fields: BTreeMap<String, Difference>,
}

impl ObjectDifference {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&Difference> {
        self.fields.get(field)
    }

    /// Names of the differing fields, ordered.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Difference)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn fields_mut(&mut self) -> &mut BTreeMap<String, Difference> {
        &mut self.fields
    }
}

/// Differences between the name types of two stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NameTypeDifferences {
    pub missing_from_target: BTreeSet<String>,
    pub missing_from_source: BTreeSet<String>,
    pub modifications: BTreeMap<String, ObjectDifference>,
}

impl NameTypeDifferences {
    pub fn is_empty(&self) -> bool {
        self.missing_from_target.is_empty()
            && self.missing_from_source.is_empty()
            && self.modifications.is_empty()
    }
}

/// The result of comparing a source store with a target store.
///
/// Entities are keyed by mRID, name types by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DifferenceReport {
    /// In the source but not in the target, or in the target under another kind.
    pub missing_from_target: BTreeSet<String>,
    /// In the target but not in the source.
    pub missing_from_source: BTreeSet<String>,
    /// Present on both sides with at least one differing field.
    pub modifications: BTreeMap<String, ObjectDifference>,
    pub name_types: NameTypeDifferences,
}

impl DifferenceReport {
    /// Returns true if the stores compared equal.
    pub fn is_empty(&self) -> bool {
        self.missing_from_target.is_empty()
            && self.missing_from_source.is_empty()
            && self.modifications.is_empty()
            && self.name_types.is_empty()
    }

    pub fn modification(&self, mrid: &str) -> Option<&ObjectDifference> {
        self.modifications.get(mrid)
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> DiffResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DifferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no differences");
        }
        writeln!(
            f,
            "{} missing from target, {} missing from source, {} modified",
            self.missing_from_target.len(),
            self.missing_from_source.len(),
            self.modifications.len()
        )?;
        for mrid in &self.missing_from_target {
            writeln!(f, "  - {mrid}")?;
        }
        for mrid in &self.missing_from_source {
            writeln!(f, "  + {mrid}")?;
        }
        for (mrid, diff) in &self.modifications {
            let fields: Vec<&str> = diff.field_names().collect();
            writeln!(f, "  ~ {mrid}: {}", fields.join(", "))?;
        }
        let names = &self.name_types;
        if !names.is_empty() {
            writeln!(
                f,
                "name types: {} missing from target, {} missing from source, {} modified",
                names.missing_from_target.len(),
                names.missing_from_source.len(),
                names.modifications.len()
            )?;
        }
        Ok(())
    }
}
