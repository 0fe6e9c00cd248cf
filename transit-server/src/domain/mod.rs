//! Domain records for the transit network.
//!
//! Stops, routes and trips as the store hands them to the rest of the
//! crate. Constructors validate their invariants; the graph engine only
//! ever sees the integer identifiers.

mod error;
mod ids;
mod route;
mod stop;
mod trip;

pub use error::DomainError;
pub use ids::{RouteId, StopId, TripId};
pub use route::{Route, TransportType};
pub use stop::{Stop, validate_coordinates};
pub use trip::{Trip, format_time, parse_time};
