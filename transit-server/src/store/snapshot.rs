//! JSON snapshot files holding the full stop/route/trip set.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::StoreError;
use crate::domain::{Route, Stop, Trip};

/// Every record the store holds, in one serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;

        debug!(
            path = %path.display(),
            stops = snapshot.stops.len(),
            routes = snapshot.routes.len(),
            trips = snapshot.trips.len(),
            "snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        Ok(())
    }
}
