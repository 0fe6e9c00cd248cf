//! Build a network graph from stop and route records.
//!
//! One node per stop; for every consecutive stop pair on a route, a pair of
//! directed edges (travel is two-way) weighted by the haversine distance
//! between the two stops.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::Graph;
use crate::domain::{Route, Stop, StopId};
use crate::geo::distance_km;

/// Counters reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub nodes: usize,
    pub edges: usize,
    pub routes: usize,
    /// Hops skipped because one of the stops has no known coordinates.
    pub skipped_hops: usize,
}

/// Accumulates routes into a graph over a fixed set of stops.
///
/// The stop set is fixed at construction; hops that reference a stop outside
/// it are skipped (and logged) rather than weighted with bogus coordinates.
pub struct GraphBuilder<'a> {
    stops: HashMap<StopId, &'a Stop>,
    graph: Graph,
    stats: BuildStats,
}

impl<'a> GraphBuilder<'a> {
    /// Start a build with one node per stop.
    pub fn new(stops: impl IntoIterator<Item = &'a Stop>) -> Self {
        let mut graph = Graph::new();
        let stops: HashMap<StopId, &'a Stop> = stops
            .into_iter()
            .map(|stop| {
                graph.add_node(stop.id);
                (stop.id, stop)
            })
            .collect();

        Self {
            stops,
            graph,
            stats: BuildStats::default(),
        }
    }

    /// Add both directions of every hop along `route`.
    ///
    /// Routes with fewer than two stops contribute nothing.
    pub fn add_route(&mut self, route: &Route) -> &mut Self {
        self.stats.routes += 1;

        for (from, to) in route.hops() {
            let (Some(a), Some(b)) = (self.stops.get(&from), self.stops.get(&to)) else {
                warn!(
                    route = %route.id,
                    from = %from,
                    to = %to,
                    "skipping hop with unknown stop"
                );
                self.stats.skipped_hops += 1;
                continue;
            };

            let weight = distance_km(a.latitude, a.longitude, b.latitude, b.longitude);
            self.graph.add_edge(from, to, weight);
            self.graph.add_edge(to, from, weight);
        }

        self
    }

    /// Add every route in order.
    pub fn add_routes<'r>(&mut self, routes: impl IntoIterator<Item = &'r Route>) -> &mut Self {
        for route in routes {
            self.add_route(route);
        }
        self
    }

    /// Finish the build.
    pub fn build(self) -> (Graph, BuildStats) {
        let stats = BuildStats {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            ..self.stats
        };

        debug!(
            nodes = stats.nodes,
            edges = stats.edges,
            routes = stats.routes,
            skipped_hops = stats.skipped_hops,
            "graph built"
        );

        (self.graph, stats)
    }

    /// Build a graph from a full stop/route snapshot in one call.
    pub fn from_records<'r>(
        stops: impl IntoIterator<Item = &'a Stop>,
        routes: impl IntoIterator<Item = &'r Route>,
    ) -> (Graph, BuildStats) {
        let mut builder = Self::new(stops);
        builder.add_routes(routes);
        builder.build()
    }
}
