//! Dijkstra shortest path between two stops.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use crate::graph::{Graph, NodeId};

/// A minimum-weight path and its total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Nodes from start to end, both inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of the edge weights along `nodes`.
    pub cost: f64,
}

/// Frontier entry.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

// BinaryHeap is a max-heap: reverse both keys so the smallest cost pops
// first, and among equal costs the smallest node id.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `end`, or an empty vector when there is
/// none (including when either endpoint is not in the graph).
pub fn shortest_path(graph: &Graph, start: NodeId, end: NodeId) -> Vec<NodeId> {
    shortest_path_with_cost(graph, start, end)
        .map(|path| path.nodes)
        .unwrap_or_default()
}

/// Shortest path from `start` to `end` together with its total weight.
///
/// Edge weights must be non-negative. Ties are broken canonically: the
/// frontier pops equal distances by ascending node id, and when two
/// predecessors give a node the same distance the lower predecessor id is
/// kept. The answer therefore does not depend on edge insertion order.
pub fn shortest_path_with_cost(graph: &Graph, start: NodeId, end: NodeId) -> Option<ShortestPath> {
    if !graph.has_node(start) || !graph.has_node(end) {
        return None;
    }

    if start == end {
        return Some(ShortestPath {
            nodes: vec![start],
            cost: 0.0,
        });
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry: the node was already settled at a lower cost
        if !settled.insert(node) {
            continue;
        }

        if node == end {
            trace!(settled = settled.len(), cost, "shortest path settled");
            return Some(ShortestPath {
                nodes: reconstruct(&previous, start, end),
                cost,
            });
        }

        for edge in graph.get_edges(node) {
            if settled.contains(&edge.target) {
                continue;
            }

            let next_cost = cost + edge.weight;

            match distances.entry(edge.target) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    previous.insert(edge.target, node);
                    heap.push(State {
                        cost: next_cost,
                        node: edge.target,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        previous.insert(edge.target, node);
                        heap.push(State {
                            cost: next_cost,
                            node: edge.target,
                        });
                    } else if next_cost == *entry.get()
                        && previous.get(&edge.target).is_some_and(|&p| node < p)
                    {
                        previous.insert(edge.target, node);
                    }
                }
            }
        }
    }

    trace!(settled = settled.len(), "frontier exhausted without reaching end");
    None
}

/// Follow predecessor links from `end` back to `start`.
fn reconstruct(previous: &HashMap<NodeId, NodeId>, start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut node = end;
    while node != start {
        match previous.get(&node) {
            Some(&prev) => {
                path.push(prev);
                node = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
