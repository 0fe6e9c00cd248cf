//! Domain error types.
//!
//! These errors represent validation failures on stop, route and trip
//! records. They are distinct from store and HTTP errors.

/// Domain-level errors for record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or not finite
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// A record that requires a name was given an empty one
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// Time string not in HH:MM or HH:MM:SS form
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Trip construction failed (e.g., ends before it starts)
    #[error("invalid trip: {0}")]
    InvalidTrip(&'static str),
}
