//! Stop records.

use serde::{Deserialize, Serialize};

use super::{DomainError, StopId};

/// Check that a point is finite and inside the WGS84 degree ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), DomainError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::InvalidLatitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::InvalidLongitude(longitude));
    }
    Ok(())
}

/// A physical transit location.
///
/// Coordinates are decimal degrees (WGS84). `Stop::new` guarantees they are
/// finite and in range; records deserialized from a snapshot are validated
/// by the store before they are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    /// Create a validated stop.
    pub fn new(
        id: StopId,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        let stop = Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        };
        stop.validate()?;
        Ok(stop)
    }

    /// Check the invariants `Stop::new` enforces.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName("stop"));
        }
        validate_coordinates(self.latitude, self.longitude)
    }

    /// Coordinates as a `(latitude, longitude)` pair.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
