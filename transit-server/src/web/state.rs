//! Application state for the web layer.

use crate::system::TransportSystem;

/// Shared application state.
///
/// Cloned into every handler; the transport system is itself a shared handle.
#[derive(Clone)]
pub struct AppState {
    /// Record store, network graph and path cache
    pub system: TransportSystem,
}

impl AppState {
    /// Create a new app state.
    pub fn new(system: TransportSystem) -> Self {
        Self { system }
    }
}
