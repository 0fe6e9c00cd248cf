//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Route, RouteId, Stop, StopId, TransportType, Trip, TripId, parse_time};
use crate::graph::BuildStats;
use crate::system::GraphInfo;

/// Default search radius for nearby stops, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Default hop limit for reachability queries.
pub const DEFAULT_DEPTH: i64 = 1;

/// Request to create a stop.
#[derive(Debug, Deserialize)]
pub struct CreateStopRequest {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CreateStopRequest {
    pub fn into_stop(self) -> Result<Stop, DomainError> {
        Stop::new(StopId(self.id), self.name, self.latitude, self.longitude)
    }
}

/// Request to create a route.
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub id: i64,
    pub name: String,

    /// "bus", "metro", "train", ...
    pub transport_type: String,

    /// Ordered stop ids
    #[serde(default)]
    pub stop_ids: Vec<i64>,
}

impl CreateRouteRequest {
    pub fn into_route(self) -> Result<Route, DomainError> {
        let transport_type = TransportType::from(self.transport_type);
        let stop_ids = self.stop_ids.into_iter().map(StopId).collect();
        Route::new(RouteId(self.id), self.name, transport_type, stop_ids)
    }
}

/// Request to append a stop to a route.
#[derive(Debug, Deserialize)]
pub struct AddRouteStopRequest {
    pub stop_id: i64,
}

/// Request to create a trip.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub id: i64,
    pub route_id: i64,

    /// Start time in HH:MM or HH:MM:SS format
    pub start_time: String,

    /// End time in HH:MM or HH:MM:SS format
    pub end_time: String,

    #[serde(default)]
    pub stop_sequence: Vec<i64>,
}

impl CreateTripRequest {
    pub fn into_trip(self) -> Result<Trip, DomainError> {
        let mut trip = Trip::new(
            TripId(self.id),
            RouteId(self.route_id),
            &self.start_time,
            &self.end_time,
        )?;
        trip.stop_sequence = self.stop_sequence.into_iter().map(StopId).collect();
        Ok(trip)
    }
}

/// Request to insert a stop into a trip.
#[derive(Debug, Deserialize)]
pub struct AddTripStopRequest {
    pub stop_id: i64,

    /// 1-based position; appends when missing or past the end
    pub sequence: Option<usize>,
}

/// Query for stops near a point.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
}

/// Optional route filter.
#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    #[serde(rename = "type")]
    pub transport_type: Option<String>,
}

/// Optional trip time window; both ends must be given together.
#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl TripsQuery {
    /// The parsed window, if one was requested.
    pub fn window(&self) -> Result<Option<(chrono::NaiveTime, chrono::NaiveTime)>, DomainError> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(Some((parse_time(from)?, parse_time(to)?))),
            (None, None) => Ok(None),
            _ => Err(DomainError::InvalidTime(
                "both 'from' and 'to' are required".to_string(),
            )),
        }
    }
}

/// Query for a shortest path.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub from: i64,
    pub to: i64,
}

/// Query for stops reachable within a hop limit.
#[derive(Debug, Deserialize)]
pub struct ReachableQuery {
    pub from: i64,
    pub depth: Option<i64>,
}

/// Query for the great-circle distance between two points.
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<Stop>,
}

/// A stop with its distance from the query point.
#[derive(Debug, Serialize)]
pub struct NearbyStop {
    #[serde(flatten)]
    pub stop: Stop,
    pub distance_km: f64,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stops: Vec<NearbyStop>,
}

#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<Route>,
}

/// Ids of the routes calling at a stop.
#[derive(Debug, Serialize)]
pub struct StopRouteIdsResponse {
    pub stop_id: StopId,
    pub route_ids: Vec<RouteId>,
}

#[derive(Debug, Serialize)]
pub struct RouteStopsResponse {
    pub route_id: RouteId,
    pub stop_ids: Vec<StopId>,
}

#[derive(Debug, Serialize)]
pub struct RemovedStopsResponse {
    pub route_id: RouteId,
    pub removed: usize,
}

#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub trips: Vec<Trip>,
}

#[derive(Debug, Serialize)]
pub struct TripStopsResponse {
    pub trip_id: TripId,
    pub stop_sequence: Vec<StopId>,
}

/// Response for shortest path queries.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    /// Stops along the path, start first; empty when not found
    pub stops: Vec<StopId>,

    /// Total great-circle length of the path
    pub distance_km: f64,

    pub found: bool,
}

#[derive(Debug, Serialize)]
pub struct ReachableResponse {
    /// Reachable stops in discovery order, start first
    pub stops: Vec<StopId>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Counters for the graph currently being served.
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub generation: u64,
    pub nodes: usize,
    pub edges: usize,
    pub routes: usize,
    pub skipped_hops: usize,
}

impl From<GraphInfo> for GraphResponse {
    fn from(info: GraphInfo) -> Self {
        let BuildStats {
            nodes,
            edges,
            routes,
            skipped_hops,
        } = info.stats;
        Self {
            generation: info.generation,
            nodes,
            edges,
            routes,
            skipped_hops,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn create_route_request_parses_type() {
        let req: CreateRouteRequest = serde_json::from_str(
            r#"{"id": 1, "name": "Línea 1", "transport_type": "Bus", "stop_ids": [101, 102]}"#,
        )
        .unwrap();
        let route = req.into_route().unwrap();

        assert_eq!(route.transport_type, TransportType::Bus);
        assert_eq!(route.stop_ids, vec![StopId(101), StopId(102)]);
    }

    #[test]
    fn create_stop_request_validates() {
        let req = CreateStopRequest {
            id: 1,
            name: "Bad".into(),
            latitude: 95.0,
            longitude: 0.0,
        };
        assert_eq!(req.into_stop().unwrap_err(), DomainError::InvalidLatitude(95.0));
    }

    #[test]
    fn create_trip_request_keeps_sequence() {
        let req: CreateTripRequest = serde_json::from_str(
            r#"{"id": 3, "route_id": 1, "start_time": "08:00", "end_time": "08:45:30", "stop_sequence": [1, 2]}"#,
        )
        .unwrap();
        let trip = req.into_trip().unwrap();

        assert_eq!(trip.end_time, NaiveTime::from_hms_opt(8, 45, 30).unwrap());
        assert_eq!(trip.stop_sequence, vec![StopId(1), StopId(2)]);
    }

    #[test]
    fn trips_query_window() {
        let q = TripsQuery {
            from: Some("07:00".into()),
            to: Some("09:00".into()),
        };
        assert!(q.window().unwrap().is_some());

        let q = TripsQuery { from: None, to: None };
        assert!(q.window().unwrap().is_none());

        let q = TripsQuery {
            from: Some("07:00".into()),
            to: None,
        };
        assert!(q.window().is_err());
    }

    #[test]
    fn nearby_stop_is_flattened() {
        let nearby = NearbyStop {
            stop: Stop::new(StopId(1), "Centro", 1.0, 2.0).unwrap(),
            distance_km: 0.5,
        };
        let json = serde_json::to_value(&nearby).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Centro", "latitude": 1.0, "longitude": 2.0, "distance_km": 0.5})
        );
    }

    #[test]
    fn graph_response_from_info() {
        let info = GraphInfo {
            generation: 3,
            stats: BuildStats {
                nodes: 4,
                edges: 6,
                routes: 1,
                skipped_hops: 0,
            },
        };
        let resp = GraphResponse::from(info);
        assert_eq!(resp.generation, 3);
        assert_eq!(resp.edges, 6);
    }
}
