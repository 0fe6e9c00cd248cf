//! In-memory record store for stops, routes and trips.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use tracing::debug;

use super::error::{RecordKind, StoreError};
use super::snapshot::Snapshot;
use crate::domain::{Route, RouteId, Stop, StopId, TransportType, Trip, TripId};
use crate::geo::distance_km;
use crate::route_index::RouteStopIndex;

/// Record store backing the transport system.
///
/// Records are kept ordered by id, so every listing comes back sorted.
/// Route stop lists are not checked against the stop table; a route may
/// name a stop that does not exist.
#[derive(Debug, Clone, Default)]
pub struct TransitStore {
    stops: BTreeMap<StopId, Stop>,
    routes: BTreeMap<RouteId, Route>,
    trips: BTreeMap<TripId, Trip>,
}

impl TransitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, validating every record.
    ///
    /// Fails on the first duplicate id, invalid record, or trip whose route
    /// is missing.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for stop in snapshot.stops {
            store.create_stop(stop)?;
        }
        for route in snapshot.routes {
            store.create_route(route)?;
        }
        for trip in snapshot.trips {
            store.create_trip(trip)?;
        }
        Ok(store)
    }

    /// Copy every record out into a snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            stops: self.stops.values().cloned().collect(),
            routes: self.routes.values().cloned().collect(),
            trips: self.trips.values().cloned().collect(),
        }
    }

    // ========== stops ==========

    pub fn create_stop(&mut self, stop: Stop) -> Result<(), StoreError> {
        stop.validate()?;
        if self.stops.contains_key(&stop.id) {
            return Err(StoreError::duplicate(RecordKind::Stop, stop.id));
        }
        debug!(stop = %stop.id, name = %stop.name, "stop created");
        self.stops.insert(stop.id, stop);
        Ok(())
    }

    pub fn get_stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// All stops, ordered by id.
    pub fn all_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn update_stop(&mut self, stop: Stop) -> Result<(), StoreError> {
        stop.validate()?;
        let slot = self
            .stops
            .get_mut(&stop.id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Stop, stop.id))?;
        *slot = stop;
        Ok(())
    }

    /// Delete a stop and drop it from every route and trip that lists it.
    pub fn delete_stop(&mut self, id: StopId) -> Result<Stop, StoreError> {
        let stop = self
            .stops
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Stop, id))?;

        for route in self.routes.values_mut() {
            route.stop_ids.retain(|&s| s != id);
        }
        for trip in self.trips.values_mut() {
            trip.stop_sequence.retain(|&s| s != id);
        }

        debug!(stop = %id, "stop deleted");
        Ok(stop)
    }

    /// Stops within `radius_km` of a point, nearest first, with their
    /// distances.
    pub fn find_nearby_stops(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<(&Stop, f64)> {
        let mut nearby: Vec<(&Stop, f64)> = self
            .stops
            .values()
            .map(|stop| {
                let d = distance_km(latitude, longitude, stop.latitude, stop.longitude);
                (stop, d)
            })
            .filter(|&(_, d)| d <= radius_km)
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
        nearby
    }

    // ========== routes ==========

    pub fn create_route(&mut self, route: Route) -> Result<(), StoreError> {
        route.validate()?;
        if self.routes.contains_key(&route.id) {
            return Err(StoreError::duplicate(RecordKind::Route, route.id));
        }
        debug!(
            route = %route.id,
            name = %route.name,
            stops = route.stop_ids.len(),
            "route created"
        );
        self.routes.insert(route.id, route);
        Ok(())
    }

    pub fn get_route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    /// All routes, ordered by id.
    pub fn all_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn update_route(&mut self, route: Route) -> Result<(), StoreError> {
        route.validate()?;
        let slot = self
            .routes
            .get_mut(&route.id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Route, route.id))?;
        *slot = route;
        Ok(())
    }

    /// Delete a route together with its trips.
    pub fn delete_route(&mut self, id: RouteId) -> Result<Route, StoreError> {
        let route = self
            .routes
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Route, id))?;
        self.trips.retain(|_, trip| trip.route_id != id);
        debug!(route = %id, "route deleted");
        Ok(route)
    }

    pub fn find_routes_by_type(&self, transport_type: &TransportType) -> Vec<&Route> {
        self.routes
            .values()
            .filter(|r| &r.transport_type == transport_type)
            .collect()
    }

    /// The ordered stop list of a route.
    pub fn route_stops(&self, id: RouteId) -> Result<&[StopId], StoreError> {
        self.routes
            .get(&id)
            .map(|r| r.stop_ids.as_slice())
            .ok_or_else(|| StoreError::not_found(RecordKind::Route, id))
    }

    /// Append a stop to the end of a route.
    pub fn add_stop_to_route(&mut self, route_id: RouteId, stop_id: StopId) -> Result<(), StoreError> {
        let route = self
            .routes
            .get_mut(&route_id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Route, route_id))?;
        route.stop_ids.push(stop_id);
        Ok(())
    }

    /// Remove every occurrence of a stop from a route.
    ///
    /// Returns how many entries were removed.
    pub fn remove_stop_from_route(&mut self, route_id: RouteId, stop_id: StopId) -> Result<usize, StoreError> {
        let route = self
            .routes
            .get_mut(&route_id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Route, route_id))?;
        let before = route.stop_ids.len();
        route.stop_ids.retain(|&s| s != stop_id);
        Ok(before - route.stop_ids.len())
    }

    /// Full route records calling at `stop`, ordered by route id.
    pub fn routes_through_stop(&self, stop: StopId) -> Vec<&Route> {
        self.routes.values().filter(|r| r.serves(stop)).collect()
    }

    /// Route id → stop list mapping for [`crate::route_index`].
    pub fn route_stop_index(&self) -> RouteStopIndex {
        self.routes
            .values()
            .map(|r| (r.id, r.stop_ids.clone()))
            .collect()
    }

    // ========== trips ==========

    pub fn create_trip(&mut self, trip: Trip) -> Result<(), StoreError> {
        trip.validate()?;
        if !self.routes.contains_key(&trip.route_id) {
            return Err(StoreError::not_found(RecordKind::Route, trip.route_id));
        }
        if self.trips.contains_key(&trip.id) {
            return Err(StoreError::duplicate(RecordKind::Trip, trip.id));
        }
        debug!(trip = %trip.id, route = %trip.route_id, "trip created");
        self.trips.insert(trip.id, trip);
        Ok(())
    }

    pub fn get_trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.get(&id)
    }

    /// All trips, ordered by id.
    pub fn all_trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    pub fn update_trip(&mut self, trip: Trip) -> Result<(), StoreError> {
        trip.validate()?;
        if !self.routes.contains_key(&trip.route_id) {
            return Err(StoreError::not_found(RecordKind::Route, trip.route_id));
        }
        let slot = self
            .trips
            .get_mut(&trip.id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Trip, trip.id))?;
        *slot = trip;
        Ok(())
    }

    pub fn delete_trip(&mut self, id: TripId) -> Result<Trip, StoreError> {
        self.trips
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Trip, id))
    }

    pub fn find_trips_by_route(&self, route_id: RouteId) -> Vec<&Trip> {
        self.trips
            .values()
            .filter(|t| t.route_id == route_id)
            .collect()
    }

    /// Trips running entirely inside `[from, to]`.
    pub fn find_trips_by_time_range(&self, from: NaiveTime, to: NaiveTime) -> Vec<&Trip> {
        self.trips.values().filter(|t| t.within(from, to)).collect()
    }

    /// Insert a stop into a trip's sequence at a 1-based position.
    ///
    /// Positions past the end append; 0 is treated as 1.
    pub fn add_stop_to_trip(&mut self, trip_id: TripId, stop_id: StopId, sequence: usize) -> Result<(), StoreError> {
        let trip = self
            .trips
            .get_mut(&trip_id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Trip, trip_id))?;
        let index = sequence.saturating_sub(1).min(trip.stop_sequence.len());
        trip.stop_sequence.insert(index, stop_id);
        Ok(())
    }

    pub fn trip_stops(&self, trip_id: TripId) -> Result<&[StopId], StoreError> {
        self.trips
            .get(&trip_id)
            .map(|t| t.stop_sequence.as_slice())
            .ok_or_else(|| StoreError::not_found(RecordKind::Trip, trip_id))
    }
}
