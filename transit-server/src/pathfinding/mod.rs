//! Connectivity queries over the network graph.
//!
//! Two algorithms, both synchronous and read-only with respect to the graph:
//!
//! - Dijkstra shortest path between two stops (edge weights are kilometres)
//! - Bounded breadth-first reachability, counting hops rather than distance
//!
//! Neither reports errors. "No path", "unknown stop" and "nothing reachable"
//! all come back as an empty result; callers decide what that means.

mod bfs;
mod dijkstra;

#[cfg(test)]
mod engine_tests;

pub use bfs::{reachable, reachable_with_depths};
pub use dijkstra::{ShortestPath, shortest_path, shortest_path_with_cost};
