//! A compact power network catalogue for gridgraph.
//!
//! Locations, containers, conducting equipment with terminals, line segments
//! with clamps, and measurements with remote sources. Each concrete type is
//! registered with an add handler, a removal policy at every level of its
//! lineage, and a comparison function; [`Catalogue`] bundles the lot.
//!
//! ```no_run
//! use gridgraph_cim::{bind_terminal, Breaker, Catalogue, Terminal};
//! use gridgraph_diff::ComparatorOptions;
//! use gridgraph_types::shared;
//!
//! # fn main() -> gridgraph_cim::CimResult<()> {
//! let catalogue = Catalogue::new(ComparatorOptions::default())?;
//! let mut store = catalogue.new_store();
//!
//! let breaker = shared(Breaker::new("br1"));
//! store.add(&breaker)?;
//! let handle = store.get_kind(gridgraph_cim::BREAKER, "br1").cloned();
//! if let Some(handle) = handle {
//!     // Deferred until the terminal arrives.
//!     store.resolve_or_defer(&bind_terminal(&handle), Some("t1"))?;
//! }
//! store.add(&shared(Terminal::new("t1")))?;
//! # Ok(())
//! # }
//! ```

mod compare;
mod entities;
mod error;
mod facets;
mod kinds;
mod removal;
mod resolvers;
mod schema;

pub use compare::*;
pub use entities::{
    AcLineSegment, Analog, Breaker, Clamp, Feeder, Location, PositionPoint, RemoteSource,
    Substation, Terminal,
};
pub use error::{CimError, CimResult};
pub use facets::{
    ConductingEquipmentData, EquipmentContainerData, EquipmentData, IdentifiedObjectData,
    MeasurementData, PowerSystemResourceData,
};
pub use kinds::*;
pub use removal::*;
pub use resolvers::*;
pub use schema::{network_comparator, network_schema, Catalogue};
