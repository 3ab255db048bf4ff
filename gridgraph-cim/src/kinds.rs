//! Kind tags of the catalogue.
//!
//! ```text
//! IdentifiedObject
//! ├── Location
//! ├── Terminal
//! ├── RemoteSource
//! ├── Measurement
//! │   └── Analog
//! └── PowerSystemResource
//!     ├── EquipmentContainer
//!     │   ├── Substation
//!     │   └── Feeder
//!     └── Equipment
//!         └── ConductingEquipment
//!             ├── Breaker
//!             ├── AcLineSegment
//!             └── Clamp
//! ```

use gridgraph_types::{Kind, IDENTIFIED_OBJECT};

pub const POWER_SYSTEM_RESOURCE: Kind = Kind::capability("PowerSystemResource", &IDENTIFIED_OBJECT);
pub const EQUIPMENT: Kind = Kind::capability("Equipment", &POWER_SYSTEM_RESOURCE);
pub const CONDUCTING_EQUIPMENT: Kind = Kind::capability("ConductingEquipment", &EQUIPMENT);
pub const EQUIPMENT_CONTAINER: Kind = Kind::capability("EquipmentContainer", &POWER_SYSTEM_RESOURCE);
pub const MEASUREMENT: Kind = Kind::capability("Measurement", &IDENTIFIED_OBJECT);

pub const LOCATION: Kind = Kind::concrete("Location", &IDENTIFIED_OBJECT);
pub const TERMINAL: Kind = Kind::concrete("Terminal", &IDENTIFIED_OBJECT);
pub const REMOTE_SOURCE: Kind = Kind::concrete("RemoteSource", &IDENTIFIED_OBJECT);
pub const ANALOG: Kind = Kind::concrete("Analog", &MEASUREMENT);
pub const SUBSTATION: Kind = Kind::concrete("Substation", &EQUIPMENT_CONTAINER);
pub const FEEDER: Kind = Kind::concrete("Feeder", &EQUIPMENT_CONTAINER);
pub const BREAKER: Kind = Kind::concrete("Breaker", &CONDUCTING_EQUIPMENT);
pub const AC_LINE_SEGMENT: Kind = Kind::concrete("AcLineSegment", &CONDUCTING_EQUIPMENT);
pub const CLAMP: Kind = Kind::concrete("Clamp", &CONDUCTING_EQUIPMENT);
