//! Sparse directed weighted graph over stops.
//!
//! Nodes are stop identifiers; each node owns an ordered list of outgoing
//! edges. Parallel edges are kept as-is. The graph has no internal
//! synchronization: build it, then share it read-only (see
//! `TransportSystem` for the rebuild-and-swap pattern).

mod builder;

pub use builder::{BuildStats, GraphBuilder};

use std::collections::HashMap;

use crate::domain::StopId;

/// Node identifier inside the graph. One node per stop.
pub type NodeId = StopId;

/// A directed, weighted edge to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Non-negative; kilometres when built from stop coordinates.
    pub weight: f64,
}

impl Edge {
    pub fn new(target: NodeId, weight: f64) -> Self {
        Self { target, weight }
    }
}

/// Adjacency-list graph keyed by node id.
///
/// Every endpoint of every edge is itself present as a node.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. No-op if it is already present.
    pub fn add_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    /// Append a directed edge `from → to`, creating either endpoint if absent.
    ///
    /// The reverse edge is not added; call twice for two-way travel.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.add_node(to);
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge::new(to, weight));
    }

    /// Remove every edge `from → to`. No-op if `from` is absent.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) {
        if let Some(edges) = self.adjacency.get_mut(&from) {
            edges.retain(|e| e.target != to);
        }
    }

    /// Outgoing edges of `node` in insertion order; empty if absent.
    pub fn get_edges(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// All nodes, in unspecified order.
    pub fn get_all_nodes(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
