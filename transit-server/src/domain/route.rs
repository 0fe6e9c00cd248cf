//! Route records and transport types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DomainError, RouteId, StopId};

/// The kind of vehicle serving a route.
///
/// Parsing is case-insensitive; anything unrecognised is kept verbatim
/// (lowercased) in `Other` so no snapshot data is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportType {
    Bus,
    Metro,
    Train,
    Tram,
    Ferry,
    Other(String),
}

impl TransportType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            TransportType::Bus => "bus",
            TransportType::Metro => "metro",
            TransportType::Train => "train",
            TransportType::Tram => "tram",
            TransportType::Ferry => "ferry",
            TransportType::Other(s) => s,
        }
    }
}

impl FromStr for TransportType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Ok(match lower.as_str() {
            "bus" => TransportType::Bus,
            "metro" | "subway" => TransportType::Metro,
            "train" | "rail" => TransportType::Train,
            "tram" => TransportType::Tram,
            "ferry" => TransportType::Ferry,
            _ => TransportType::Other(lower),
        })
    }
}

impl From<String> for TransportType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<TransportType> for String {
    fn from(t: TransportType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport line: an ordered sequence of stops.
///
/// The stop list may repeat a stop (loop lines) and may name stops the store
/// does not know about; neither is rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub transport_type: TransportType,
    #[serde(default)]
    pub stop_ids: Vec<StopId>,
}

impl Route {
    /// Create a route with a validated name.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        transport_type: TransportType,
        stop_ids: Vec<StopId>,
    ) -> Result<Self, DomainError> {
        let route = Self {
            id,
            name: name.into(),
            transport_type,
            stop_ids,
        };
        route.validate()?;
        Ok(route)
    }

    /// Check the invariants `Route::new` enforces.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName("route"));
        }
        Ok(())
    }

    /// Whether the route calls at `stop` at least once.
    pub fn serves(&self, stop: StopId) -> bool {
        self.stop_ids.contains(&stop)
    }

    /// Consecutive stop pairs along the route.
    pub fn hops(&self) -> impl Iterator<Item = (StopId, StopId)> + '_ {
        self.stop_ids.windows(2).map(|w| (w[0], w[1]))
    }
}
