//! The transport system: record store, network graph and path cache behind
//! one handle.
//!
//! Readers take a cheap snapshot of the current graph (an `Arc` clone under a
//! short read lock) and query it without holding any lock. Every topology
//! change builds a fresh graph from the store and swaps it in, bumping the
//! graph generation and invalidating cached paths.

use std::sync::Arc;

use chrono::NaiveTime;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::PathCache;
use crate::config::AppConfig;
use crate::domain::{Route, RouteId, Stop, StopId, TransportType, Trip, TripId};
use crate::geo::distance_km;
use crate::graph::{BuildStats, Graph, GraphBuilder};
use crate::pathfinding::{self, ShortestPath};
use crate::route_index;
use crate::store::{RecordKind, Snapshot, StoreError, TransitStore};

/// Counters describing the graph currently being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphInfo {
    /// Incremented on every swap, starting at 0 for the initial build.
    pub generation: u64,
    pub stats: BuildStats,
}

struct Network {
    graph: Arc<Graph>,
    info: GraphInfo,
}

/// Shared handle to the transport system.
///
/// Cloning is cheap; all clones see the same store and graph.
#[derive(Clone)]
pub struct TransportSystem {
    store: Arc<RwLock<TransitStore>>,
    network: Arc<RwLock<Network>>,
    paths: PathCache,
}

impl TransportSystem {
    /// Take ownership of a store and build the initial graph from it.
    pub fn new(store: TransitStore, config: &AppConfig) -> Self {
        let (graph, stats) = build_graph(&store);
        info!(
            nodes = stats.nodes,
            edges = stats.edges,
            skipped_hops = stats.skipped_hops,
            "transport network ready"
        );

        Self {
            store: Arc::new(RwLock::new(store)),
            network: Arc::new(RwLock::new(Network {
                graph: Arc::new(graph),
                info: GraphInfo {
                    generation: 0,
                    stats,
                },
            })),
            paths: PathCache::new(&config.cache),
        }
    }

    // ========== graph ==========

    /// The graph currently being served.
    pub async fn graph(&self) -> Arc<Graph> {
        Arc::clone(&self.network.read().await.graph)
    }

    pub async fn graph_info(&self) -> GraphInfo {
        self.network.read().await.info
    }

    /// Rebuild the graph from the store and swap it in.
    pub async fn rebuild(&self) -> BuildStats {
        let store = self.store.read().await;
        self.swap_graph(&store).await
    }

    async fn swap_graph(&self, store: &TransitStore) -> BuildStats {
        let (graph, stats) = build_graph(store);

        let generation = {
            let mut network = self.network.write().await;
            network.graph = Arc::new(graph);
            network.info.generation += 1;
            network.info.stats = stats;
            network.info.generation
        };
        self.paths.invalidate_all();

        info!(
            generation,
            nodes = stats.nodes,
            edges = stats.edges,
            skipped_hops = stats.skipped_hops,
            "graph swapped"
        );
        stats
    }

    /// Graph and generation read together under one lock.
    async fn current(&self) -> (Arc<Graph>, u64) {
        let network = self.network.read().await;
        (Arc::clone(&network.graph), network.info.generation)
    }

    // ========== queries ==========

    /// Shortest path between two stops, with its total distance.
    ///
    /// `None` when either stop is not in the graph or no path exists.
    pub async fn find_shortest_path_with_cost(&self, from: StopId, to: StopId) -> Option<ShortestPath> {
        let (graph, generation) = self.current().await;

        if let Some(hit) = self.paths.get(generation, from, to).await {
            debug!(from = %from, to = %to, generation, "path cache hit");
            return hit.as_ref().clone();
        }

        let answer = pathfinding::shortest_path_with_cost(&graph, from, to);
        self.paths
            .insert(generation, from, to, Arc::new(answer.clone()))
            .await;
        answer
    }

    /// Shortest path as a stop sequence; empty when there is none.
    pub async fn find_shortest_path(&self, from: StopId, to: StopId) -> Vec<StopId> {
        self.find_shortest_path_with_cost(from, to)
            .await
            .map(|p| p.nodes)
            .unwrap_or_default()
    }

    /// Stops within `max_depth` hops of `from`, in discovery order.
    pub async fn find_reachable(&self, from: StopId, max_depth: i64) -> Vec<StopId> {
        let graph = self.graph().await;
        pathfinding::reachable(&graph, from, max_depth)
    }

    /// Routes calling at `stop`, looked up in the store.
    pub async fn find_routes_through_stop(&self, stop: StopId) -> Vec<Route> {
        let store = self.store.read().await;
        store.routes_through_stop(stop).into_iter().cloned().collect()
    }

    /// Ids of routes calling at `stop`, scanned over the route/stop mapping.
    pub async fn routes_through_stop_ids(&self, stop: StopId) -> Vec<RouteId> {
        let index = self.store.read().await.route_stop_index();
        route_index::routes_through_stop(&index, stop)
    }

    /// Great-circle length of a stop sequence.
    ///
    /// `None` if any stop in the sequence is unknown.
    pub async fn journey_distance_km(&self, path: &[StopId]) -> Option<f64> {
        let store = self.store.read().await;
        let stops: Vec<&Stop> = path
            .iter()
            .map(|&id| store.get_stop(id))
            .collect::<Option<_>>()?;

        Some(
            stops
                .windows(2)
                .map(|w| distance_km(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude))
                .sum(),
        )
    }

    pub async fn find_nearby_stops(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<(Stop, f64)> {
        let store = self.store.read().await;
        store
            .find_nearby_stops(latitude, longitude, radius_km)
            .into_iter()
            .map(|(stop, d)| (stop.clone(), d))
            .collect()
    }

    pub async fn get_stop(&self, id: StopId) -> Option<Stop> {
        self.store.read().await.get_stop(id).cloned()
    }

    pub async fn all_stops(&self) -> Vec<Stop> {
        self.store.read().await.all_stops().cloned().collect()
    }

    pub async fn get_route(&self, id: RouteId) -> Option<Route> {
        self.store.read().await.get_route(id).cloned()
    }

    pub async fn all_routes(&self) -> Vec<Route> {
        self.store.read().await.all_routes().cloned().collect()
    }

    pub async fn find_routes_by_type(&self, transport_type: &TransportType) -> Vec<Route> {
        let store = self.store.read().await;
        store
            .find_routes_by_type(transport_type)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get_trip(&self, id: TripId) -> Option<Trip> {
        self.store.read().await.get_trip(id).cloned()
    }

    pub async fn all_trips(&self) -> Vec<Trip> {
        self.store.read().await.all_trips().cloned().collect()
    }

    pub async fn find_trips_by_route(&self, route_id: RouteId) -> Result<Vec<Trip>, StoreError> {
        let store = self.store.read().await;
        if store.get_route(route_id).is_none() {
            return Err(StoreError::not_found(RecordKind::Route, route_id));
        }
        Ok(store
            .find_trips_by_route(route_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn find_trips_by_time_range(&self, from: NaiveTime, to: NaiveTime) -> Vec<Trip> {
        let store = self.store.read().await;
        store
            .find_trips_by_time_range(from, to)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Copy of every record currently held.
    pub async fn snapshot(&self) -> Snapshot {
        self.store.read().await.to_snapshot()
    }

    /// Write every record to `path` as a JSON snapshot.
    pub async fn save_snapshot(&self, path: impl AsRef<std::path::Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let snapshot = self.snapshot().await;
        snapshot.save(path)?;
        info!(
            path = %path.display(),
            stops = snapshot.stops.len(),
            routes = snapshot.routes.len(),
            trips = snapshot.trips.len(),
            "snapshot saved"
        );
        Ok(())
    }

    // ========== topology changes ==========

    pub async fn add_stop(&self, stop: Stop) -> Result<BuildStats, StoreError> {
        let mut store = self.store.write().await;
        store.create_stop(stop)?;
        Ok(self.swap_graph(&store).await)
    }

    pub async fn remove_stop(&self, id: StopId) -> Result<Stop, StoreError> {
        let mut store = self.store.write().await;
        let stop = store.delete_stop(id)?;
        self.swap_graph(&store).await;
        Ok(stop)
    }

    pub async fn add_route(&self, route: Route) -> Result<BuildStats, StoreError> {
        let mut store = self.store.write().await;
        store.create_route(route)?;
        Ok(self.swap_graph(&store).await)
    }

    pub async fn remove_route(&self, id: RouteId) -> Result<Route, StoreError> {
        let mut store = self.store.write().await;
        let route = store.delete_route(id)?;
        self.swap_graph(&store).await;
        Ok(route)
    }

    /// Append a stop to a route and return the new stop list.
    pub async fn add_stop_to_route(&self, route_id: RouteId, stop_id: StopId) -> Result<Vec<StopId>, StoreError> {
        let mut store = self.store.write().await;
        store.add_stop_to_route(route_id, stop_id)?;
        let stops = store.route_stops(route_id)?.to_vec();
        self.swap_graph(&store).await;
        Ok(stops)
    }

    /// Remove every occurrence of a stop from a route.
    ///
    /// The graph is only rebuilt when something was actually removed.
    pub async fn remove_stop_from_route(&self, route_id: RouteId, stop_id: StopId) -> Result<usize, StoreError> {
        let mut store = self.store.write().await;
        let removed = store.remove_stop_from_route(route_id, stop_id)?;
        if removed > 0 {
            self.swap_graph(&store).await;
        }
        Ok(removed)
    }

    // ========== trips ==========

    /// Add a trip. Trips do not change the network, so no rebuild.
    pub async fn add_trip(&self, trip: Trip) -> Result<(), StoreError> {
        self.store.write().await.create_trip(trip)
    }

    pub async fn add_stop_to_trip(&self, trip_id: TripId, stop_id: StopId, sequence: usize) -> Result<Vec<StopId>, StoreError> {
        let mut store = self.store.write().await;
        store.add_stop_to_trip(trip_id, stop_id, sequence)?;
        Ok(store.trip_stops(trip_id)?.to_vec())
    }
}

fn build_graph(store: &TransitStore) -> (Graph, BuildStats) {
    GraphBuilder::from_records(store.all_stops(), store.all_routes())
}
