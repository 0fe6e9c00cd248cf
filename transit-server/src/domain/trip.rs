//! Trip records: timed runs of a route.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{DomainError, RouteId, StopId, TripId};

/// Parse a time of day from "HH:MM" or "HH:MM:SS".
pub fn parse_time(s: &str) -> Result<NaiveTime, DomainError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| DomainError::InvalidTime(s.to_string()))
}

/// Format a time of day as "HH:MM", or "HH:MM:SS" when seconds are set.
pub fn format_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// One scheduled run of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub stop_sequence: Vec<StopId>,
}

impl Trip {
    /// Create a trip, parsing its start and end times.
    pub fn new(
        id: TripId,
        route_id: RouteId,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self, DomainError> {
        let trip = Self {
            id,
            route_id,
            start_time: parse_time(start_time)?,
            end_time: parse_time(end_time)?,
            stop_sequence: Vec::new(),
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Check the invariants `Trip::new` enforces.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.end_time < self.start_time {
            return Err(DomainError::InvalidTrip("end time is before start time"));
        }
        Ok(())
    }

    /// Whether the whole trip runs inside `[from, to]`.
    pub fn within(&self, from: NaiveTime, to: NaiveTime) -> bool {
        self.start_time >= from && self.end_time <= to
    }
}

mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
