//! Concrete entity types.

use crate::facets::{
    ConductingEquipmentData, EquipmentContainerData, EquipmentData, IdentifiedObjectData,
    MeasurementData, PowerSystemResourceData,
};
use crate::kinds::*;
use gridgraph_types::{generate_mrid, impl_entity};
use std::collections::BTreeSet;

/// A point of a location, in the location's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPoint {
    pub x: f64,
    pub y: f64,
}

/// Where resources are, as an ordered list of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub io: IdentifiedObjectData,
    pub points: Vec<PositionPoint>,
}

impl Location {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            io: IdentifiedObjectData::new(mrid),
            points: Vec::new(),
        }
    }
}

/// A connection point of a piece of conducting equipment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Terminal {
    pub io: IdentifiedObjectData,
    pub conducting_equipment: Option<String>,
    pub sequence_number: i32,
}

impl Terminal {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            io: IdentifiedObjectData::new(mrid),
            conducting_equipment: None,
            sequence_number: 0,
        }
    }
}

/// The SCADA point feeding a measurement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteSource {
    pub io: IdentifiedObjectData,
    pub measurement: Option<String>,
}

impl RemoteSource {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            io: IdentifiedObjectData::new(mrid),
            measurement: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analog {
    pub measurement: MeasurementData,
    pub positive_flow_in: bool,
}

impl Analog {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            measurement: MeasurementData::new(mrid),
            positive_flow_in: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substation {
    pub container: EquipmentContainerData,
    pub normal_energized_feeders: BTreeSet<String>,
}

impl Substation {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            container: EquipmentContainerData::new(mrid),
            normal_energized_feeders: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feeder {
    pub container: EquipmentContainerData,
    pub normal_energizing_substation: Option<String>,
}

impl Feeder {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            container: EquipmentContainerData::new(mrid),
            normal_energizing_substation: None,
        }
    }
}

/// A switch able to interrupt fault current.
///
/// `in_transit_time` is NaN when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Breaker {
    pub ce: ConductingEquipmentData,
    pub open: bool,
    pub normal_open: bool,
    pub in_transit_time: f64,
}

impl Breaker {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            ce: ConductingEquipmentData::new(mrid),
            open: false,
            normal_open: false,
            in_transit_time: f64::NAN,
        }
    }
}

impl Default for Breaker {
    fn default() -> Self {
        Self::new(generate_mrid())
    }
}

/// A line segment. `length` is NaN when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct AcLineSegment {
    pub ce: ConductingEquipmentData,
    pub length: f64,
    pub clamps: BTreeSet<String>,
}

impl AcLineSegment {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            ce: ConductingEquipmentData::new(mrid),
            length: f64::NAN,
            clamps: BTreeSet::new(),
        }
    }
}

impl Default for AcLineSegment {
    fn default() -> Self {
        Self::new(generate_mrid())
    }
}

/// A connection point part way along a line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamp {
    pub ce: ConductingEquipmentData,
    pub ac_line_segment: Option<String>,
    pub length_from_terminal1: f64,
}

impl Clamp {
    pub fn new(mrid: impl Into<String>) -> Self {
        Self {
            ce: ConductingEquipmentData::new(mrid),
            ac_line_segment: None,
            length_from_terminal1: f64::NAN,
        }
    }
}

impl Default for Clamp {
    fn default() -> Self {
        Self::new(generate_mrid())
    }
}

impl_entity!(Location, LOCATION, io.mrid, { IdentifiedObjectData => io });
impl_entity!(Terminal, TERMINAL, io.mrid, { IdentifiedObjectData => io });
impl_entity!(RemoteSource, REMOTE_SOURCE, io.mrid, { IdentifiedObjectData => io });
impl_entity!(Analog, ANALOG, measurement.io.mrid, {
    IdentifiedObjectData => measurement.io,
    MeasurementData => measurement,
});
impl_entity!(Substation, SUBSTATION, container.psr.io.mrid, {
    IdentifiedObjectData => container.psr.io,
    PowerSystemResourceData => container.psr,
    EquipmentContainerData => container,
});
impl_entity!(Feeder, FEEDER, container.psr.io.mrid, {
    IdentifiedObjectData => container.psr.io,
    PowerSystemResourceData => container.psr,
    EquipmentContainerData => container,
});
impl_entity!(Breaker, BREAKER, ce.equipment.psr.io.mrid, {
    IdentifiedObjectData => ce.equipment.psr.io,
    PowerSystemResourceData => ce.equipment.psr,
    EquipmentData => ce.equipment,
    ConductingEquipmentData => ce,
});
impl_entity!(AcLineSegment, AC_LINE_SEGMENT, ce.equipment.psr.io.mrid, {
    IdentifiedObjectData => ce.equipment.psr.io,
    PowerSystemResourceData => ce.equipment.psr,
    EquipmentData => ce.equipment,
    ConductingEquipmentData => ce,
});
impl_entity!(Clamp, CLAMP, ce.equipment.psr.io.mrid, {
    IdentifiedObjectData => ce.equipment.psr.io,
    PowerSystemResourceData => ce.equipment.psr,
    EquipmentData => ce.equipment,
    ConductingEquipmentData => ce,
});
