//! Capability layers shared by the concrete entities.
//!
//! Each layer embeds the layer below it, so a breaker holds a
//! [`ConductingEquipmentData`], which holds an [`EquipmentData`], and so on
//! down to [`IdentifiedObjectData`]. Relationship fields hold mRIDs.

use gridgraph_types::generate_mrid;
use std::collections::BTreeSet;

/// Identity and naming.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedObjectData {
    pub mrid: String,
    pub name: String,
    pub description: String,
}

impl IdentifiedObjectData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            mrid: mrid.into(),
            name: String::new(),
            description: String::new(),
        }
    }
}

/// A fresh random mRID.
impl Default for IdentifiedObjectData {
    fn default() -> Self {
        Self::new(generate_mrid())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerSystemResourceData {
    pub io: IdentifiedObjectData,
    pub location: Option<String>,
}

impl PowerSystemResourceData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            io: IdentifiedObjectData::new(mrid),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentData {
    pub psr: PowerSystemResourceData,
    pub in_service: bool,
    pub normally_in_service: bool,
    pub containers: BTreeSet<String>,
}

impl EquipmentData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            psr: PowerSystemResourceData::new(mrid),
            in_service: true,
            normally_in_service: true,
            containers: BTreeSet::new(),
        }
    }
}

impl Default for EquipmentData {
    fn default() -> Self {
        Self::new(generate_mrid())
    }
}

/// Equipment with terminals, kept in connection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConductingEquipmentData {
    pub equipment: EquipmentData,
    pub terminals: Vec<String>,
}

impl ConductingEquipmentData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            equipment: EquipmentData::new(mrid),
            terminals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentContainerData {
    pub psr: PowerSystemResourceData,
    pub equipment: BTreeSet<String>,
}

impl EquipmentContainerData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            psr: PowerSystemResourceData::new(mrid),
            equipment: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementData {
    pub io: IdentifiedObjectData,
    pub power_system_resource: Option<String>,
    pub remote_source: Option<String>,
    pub unit: String,
}

impl MeasurementData {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            io: IdentifiedObjectData::new(mrid),
            power_system_resource: None,
            remote_source: None,
            unit: String::new(),
        }
    }
}
