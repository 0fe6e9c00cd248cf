//! Bounded breadth-first reachability.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::graph::{Graph, NodeId};

/// Nodes reachable from `start` in at most `max_depth` hops, in discovery
/// order, `start` first.
///
/// A negative depth yields just `[start]`. An absent `start` yields an
/// empty vector.
pub fn reachable(graph: &Graph, start: NodeId, max_depth: i64) -> Vec<NodeId> {
    reachable_with_depths(graph, start, max_depth)
        .into_iter()
        .map(|(node, _)| node)
        .collect()
}

/// Like [`reachable`], paired with the hop count at which each node was
/// first discovered (its minimum hop distance from `start`).
pub fn reachable_with_depths(graph: &Graph, start: NodeId, max_depth: i64) -> Vec<(NodeId, i64)> {
    if !graph.has_node(start) {
        return Vec::new();
    }

    let mut reached = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::from([start]);
    let mut queue: VecDeque<(NodeId, i64)> = VecDeque::from([(start, 0)]);

    while let Some((node, depth)) = queue.pop_front() {
        reached.push((node, depth));

        if depth >= max_depth {
            continue;
        }

        for edge in graph.get_edges(node) {
            if visited.insert(edge.target) {
                queue.push_back((edge.target, depth + 1));
            }
        }
    }

    trace!(start = %start, max_depth, reached = reached.len(), "reachability explored");
    reached
}
