//! In-memory object graph store for gridgraph.
//!
//! Holds a heterogeneous collection of identified entities and keeps the
//! typed, directed relationships between them consistent while entities are
//! added, linked and removed in any order.
//!
//! # Architecture
//!
//! - [`ObjectStore`] owns every entity, bucketed by concrete kind and indexed
//!   by mRID
//! - [`StoreSchema`] is the per-kind registry of add handlers and removal
//!   policies, validated when built
//! - [`ReferenceResolver`] / [`BoundResolver`] describe relationship roles;
//!   [`ObjectStore::resolve_or_defer`] links them now or parks them as
//!   [`UnresolvedReference`]s until the target arrives
//! - [`Removal`] drives cascading removal through the registered policies
//! - [`NameType`] holds alternative-name tags beside the graph
//!
//! The store is single-writer and not synchronized. Callers must not share it
//! across threads or mutate it while a comparison is reading it.

mod error;
mod names;
mod pending;
mod removal;
mod resolver;
mod schema;
mod store;

pub use error::{StoreError, StoreResult};
pub use names::NameType;
pub use pending::UnresolvedReference;
pub use removal::{Removal, RemoveOptions};
pub use resolver::{BoundResolver, LinkFn, ReferenceResolver};
pub use schema::{AddHandler, RemovalPolicy, StoreSchema, StoreSchemaBuilder};
pub use store::ObjectStore;
