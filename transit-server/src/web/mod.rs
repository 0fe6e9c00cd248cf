//! Web layer for the transit server.
//!
//! Provides a JSON API over the transport system: record management for
//! stops, routes and trips, plus shortest-path, reachability and distance
//! queries against the network graph.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
