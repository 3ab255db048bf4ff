//! Name-type tags.
//!
//! A [`NameType`] groups alternative names ("asset tag", "SCADA point",
//! ...) given to entities. Names live beside the object graph rather than in
//! it: a name is a `(name, mRID)` pair filed under its type, and two names are
//! the same name when their text and type name match.

use std::collections::{BTreeMap, BTreeSet};

/// A named category of alternative names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameType {
    name: String,
    description: String,
    names: BTreeMap<String, BTreeSet<String>>,
}

impl NameType {
    /// Creates an empty name type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Gives `name` to the entity `mrid`. Returns false if it already had it.
    pub fn add_name(&mut self, name: impl Into<String>, mrid: impl Into<String>) -> bool {
        self.names.entry(name.into()).or_default().insert(mrid.into())
    }

    /// Returns true if any entity carries `name` under this type.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// mRIDs of the entities carrying `name`.
    pub fn entities_named(&self, name: &str) -> impl Iterator<Item = &str> {
        self.names.get(name).into_iter().flatten().map(String::as_str)
    }

    /// Names given to `mrid` under this type.
    pub fn names_for<'a>(&'a self, mrid: &'a str) -> impl Iterator<Item = &'a str> {
        self.names
            .iter()
            .filter(move |(_, owners)| owners.contains(mrid))
            .map(|(name, _)| name.as_str())
    }

    /// Every `(name, mRID)` pair, ordered by name then mRID.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .flat_map(|(name, owners)| owners.iter().map(move |mrid| (name.as_str(), mrid.as_str())))
    }

    /// Removes `name` from `mrid`. Returns false if it was not present.
    pub fn remove_name(&mut self, name: &str, mrid: &str) -> bool {
        let Some(owners) = self.names.get_mut(name) else {
            return false;
        };
        let removed = owners.remove(mrid);
        if owners.is_empty() {
            self.names.remove(name);
        }
        removed
    }

    /// Strips every name given to `mrid`. Returns how many were removed.
    pub fn remove_names_for(&mut self, mrid: &str) -> usize {
        let mut removed = 0;
        self.names.retain(|_, owners| {
            if owners.remove(mrid) {
                removed += 1;
            }
            !owners.is_empty()
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.names.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
