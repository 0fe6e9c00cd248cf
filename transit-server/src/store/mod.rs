//! Record storage for stops, routes and trips.
//!
//! The store is the source of truth the network graph is built from. It is
//! held in memory and seeded from a JSON snapshot file at startup.

mod error;
mod memory;
mod snapshot;

pub use error::{RecordKind, StoreError};
pub use memory::TransitStore;
pub use snapshot::Snapshot;
