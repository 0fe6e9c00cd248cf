//! Unit and property tests for shortest path and reachability.

use super::*;
use crate::domain::StopId;
use crate::graph::{Graph, NodeId};
use std::collections::HashSet;

fn n(id: i64) -> NodeId {
    StopId(id)
}

fn path(ids: &[i64]) -> Vec<NodeId> {
    ids.iter().copied().map(StopId).collect()
}

fn add_both(graph: &mut Graph, a: i64, b: i64, weight: f64) {
    graph.add_edge(n(a), n(b), weight);
    graph.add_edge(n(b), n(a), weight);
}

/// 1-2-3-4 chain with a heavier direct 1-4 shortcut, all two-way.
fn sample_graph() -> Graph {
    let mut graph = Graph::new();
    for id in 1..=4 {
        graph.add_node(n(id));
    }
    add_both(&mut graph, 1, 2, 1.0);
    add_both(&mut graph, 2, 3, 2.0);
    add_both(&mut graph, 3, 4, 1.5);
    add_both(&mut graph, 1, 4, 5.0);
    graph
}

// ========== shortest_path ==========

#[test]
fn chain_beats_heavier_direct_edge() {
    let graph = sample_graph();
    assert_eq!(shortest_path(&graph, n(1), n(4)), path(&[1, 2, 3, 4]));
}

#[test]
fn reverse_direction_uses_the_same_chain() {
    let graph = sample_graph();
    assert_eq!(shortest_path(&graph, n(4), n(1)), path(&[4, 3, 2, 1]));
}

#[test]
fn cost_is_sum_of_chosen_edges() {
    let graph = sample_graph();
    let result = shortest_path_with_cost(&graph, n(1), n(4)).unwrap();
    assert_eq!(result.nodes, path(&[1, 2, 3, 4]));
    assert!((result.cost - 4.5).abs() < 1e-12);
}

#[test]
fn isolated_node_is_unreachable() {
    let mut graph = sample_graph();
    graph.add_node(n(5));
    assert!(shortest_path(&graph, n(1), n(5)).is_empty());
    assert!(shortest_path_with_cost(&graph, n(5), n(1)).is_none());
}

#[test]
fn same_start_and_end() {
    let graph = sample_graph();
    assert_eq!(shortest_path(&graph, n(3), n(3)), path(&[3]));

    let result = shortest_path_with_cost(&graph, n(3), n(3)).unwrap();
    assert_eq!(result.cost, 0.0);
}

#[test]
fn same_start_and_end_unknown_node() {
    let graph = sample_graph();
    assert!(shortest_path(&graph, n(42), n(42)).is_empty());
}

#[test]
fn unknown_endpoints_give_empty_path() {
    let graph = sample_graph();
    assert!(shortest_path(&graph, n(1), n(99)).is_empty());
    assert!(shortest_path(&graph, n(99), n(1)).is_empty());
}

#[test]
fn respects_edge_direction() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 1.0);
    assert_eq!(shortest_path(&graph, n(1), n(2)), path(&[1, 2]));
    assert!(shortest_path(&graph, n(2), n(1)).is_empty());
}

#[test]
fn parallel_edges_use_the_lightest() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 7.0);
    graph.add_edge(n(1), n(2), 2.0);
    graph.add_edge(n(1), n(2), 4.0);

    let result = shortest_path_with_cost(&graph, n(1), n(2)).unwrap();
    assert_eq!(result.nodes, path(&[1, 2]));
    assert_eq!(result.cost, 2.0);
}

#[test]
fn zero_weight_edges() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 0.0);
    graph.add_edge(n(2), n(3), 0.0);
    graph.add_edge(n(1), n(3), 0.5);

    let result = shortest_path_with_cost(&graph, n(1), n(3)).unwrap();
    assert_eq!(result.nodes, path(&[1, 2, 3]));
    assert_eq!(result.cost, 0.0);
}

#[test]
fn cycles_do_not_loop_forever() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 1.0);
    graph.add_edge(n(2), n(3), 1.0);
    graph.add_edge(n(3), n(1), 1.0);
    graph.add_node(n(4));

    assert!(shortest_path(&graph, n(1), n(4)).is_empty());
    assert_eq!(shortest_path(&graph, n(2), n(1)), path(&[2, 3, 1]));
}

#[test]
fn equal_cost_tie_prefers_lower_predecessor_regardless_of_insertion_order() {
    // 1→3→4 and 1→2→4 both cost 2.0; 3 is settled before 2.
    let mut forward = Graph::new();
    forward.add_edge(n(1), n(3), 0.5);
    forward.add_edge(n(1), n(2), 1.0);
    forward.add_edge(n(3), n(4), 1.5);
    forward.add_edge(n(2), n(4), 1.0);

    let mut backward = Graph::new();
    backward.add_edge(n(1), n(2), 1.0);
    backward.add_edge(n(1), n(3), 0.5);
    backward.add_edge(n(2), n(4), 1.0);
    backward.add_edge(n(3), n(4), 1.5);

    assert_eq!(shortest_path(&forward, n(1), n(4)), path(&[1, 2, 4]));
    assert_eq!(shortest_path(&backward, n(1), n(4)), path(&[1, 2, 4]));
}

#[test]
fn equal_cost_diamond_prefers_lower_id() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(30), 1.0);
    graph.add_edge(n(1), n(20), 1.0);
    graph.add_edge(n(30), n(4), 1.0);
    graph.add_edge(n(20), n(4), 1.0);

    assert_eq!(shortest_path(&graph, n(1), n(4)), path(&[1, 20, 4]));
}

// ========== reachable ==========

#[test]
fn depth_zero_is_just_start() {
    let graph = sample_graph();
    assert_eq!(reachable(&graph, n(1), 0), path(&[1]));
}

#[test]
fn negative_depth_is_just_start() {
    let graph = sample_graph();
    assert_eq!(reachable(&graph, n(2), -5), path(&[2]));
}

#[test]
fn depth_one_is_direct_neighbours() {
    let graph = sample_graph();
    let reached: HashSet<_> = reachable(&graph, n(1), 1).into_iter().collect();
    assert_eq!(reached, path(&[1, 2, 4]).into_iter().collect());
}

#[test]
fn depth_two_reaches_whole_sample() {
    let graph = sample_graph();
    let reached = reachable(&graph, n(1), 2);
    assert_eq!(reached.len(), 4);
    assert_eq!(reached[0], n(1));
}

#[test]
fn discovery_order_follows_edge_order() {
    let graph = sample_graph();
    // Edges out of 1 were inserted 1→2 then 1→4; 3 is two hops away.
    assert_eq!(reachable(&graph, n(1), 5), path(&[1, 2, 4, 3]));
}

#[test]
fn depth_counts_hops_not_distance() {
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 100.0);
    graph.add_edge(n(1), n(3), 0.1);
    graph.add_edge(n(3), n(4), 0.1);

    let depths = reachable_with_depths(&graph, n(1), 1);
    assert_eq!(depths, vec![(n(1), 0), (n(2), 1), (n(3), 1)]);
}

#[test]
fn first_discovery_depth_wins() {
    // 4 is one hop from 1 directly and two hops via 2
    let mut graph = Graph::new();
    graph.add_edge(n(1), n(2), 1.0);
    graph.add_edge(n(2), n(4), 1.0);
    graph.add_edge(n(1), n(4), 1.0);
    graph.add_edge(n(4), n(5), 1.0);

    let depths = reachable_with_depths(&graph, n(1), 2);
    assert!(depths.contains(&(n(4), 1)));
    assert!(depths.contains(&(n(5), 2)));
    assert_eq!(depths.len(), 4);
}

#[test]
fn unknown_start_reaches_nothing() {
    let graph = sample_graph();
    assert!(reachable(&graph, n(99), 3).is_empty());
}

#[test]
fn isolated_start_reaches_only_itself() {
    let mut graph = sample_graph();
    graph.add_node(n(5));
    assert_eq!(reachable(&graph, n(5), 10), path(&[5]));
}

// ========== property tests ==========

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const NODES: i64 = 6;

    /// Small directed graphs with integral weights so sums compare exactly.
    fn graph_strategy() -> impl Strategy<Value = Graph> {
        prop::collection::vec((0..NODES, 0..NODES, 0u32..10), 0..20).prop_map(|edges| {
            let mut graph = Graph::new();
            for id in 0..NODES {
                graph.add_node(n(id));
            }
            for (from, to, w) in edges {
                graph.add_edge(n(from), n(to), f64::from(w));
            }
            graph
        })
    }

    /// Lightest edge weight from `a` to `b`, if any.
    fn lightest(graph: &Graph, a: NodeId, b: NodeId) -> Option<f64> {
        graph
            .get_edges(a)
            .iter()
            .filter(|e| e.target == b)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }

    /// Cost of the cheapest simple path, by exhaustive enumeration.
    fn brute_force(graph: &Graph, start: NodeId, end: NodeId) -> Option<f64> {
        fn walk(
            graph: &Graph,
            node: NodeId,
            end: NodeId,
            cost: f64,
            seen: &mut HashSet<NodeId>,
            best: &mut Option<f64>,
        ) {
            if node == end {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for edge in graph.get_edges(node) {
                if seen.insert(edge.target) {
                    walk(graph, edge.target, end, cost + edge.weight, seen, best);
                    seen.remove(&edge.target);
                }
            }
        }

        let mut best = None;
        let mut seen = HashSet::from([start]);
        walk(graph, start, end, 0.0, &mut seen, &mut best);
        best
    }

    proptest! {
        /// A found path starts and ends at the endpoints and its cost is the
        /// sum of the edges it walks.
        #[test]
        fn path_is_well_formed(graph in graph_strategy(), a in 0..NODES, b in 0..NODES) {
            if let Some(result) = shortest_path_with_cost(&graph, n(a), n(b)) {
                prop_assert_eq!(result.nodes.first(), Some(&n(a)));
                prop_assert_eq!(result.nodes.last(), Some(&n(b)));

                let mut total = 0.0;
                for pair in result.nodes.windows(2) {
                    let w = lightest(&graph, pair[0], pair[1]);
                    prop_assert!(w.is_some(), "no edge {:?} -> {:?}", pair[0], pair[1]);
                    total += w.unwrap_or_default();
                }
                prop_assert_eq!(total, result.cost);
            }
        }

        /// Dijkstra agrees with exhaustive search, including on "no path".
        #[test]
        fn path_is_optimal(graph in graph_strategy(), a in 0..NODES, b in 0..NODES) {
            let found = shortest_path_with_cost(&graph, n(a), n(b)).map(|r| r.cost);
            let expected = brute_force(&graph, n(a), n(b));
            prop_assert_eq!(found, expected);
        }

        /// The same edges added in any order give the same path. Integral
        /// weights make equal-cost alternatives common.
        #[test]
        fn path_independent_of_insertion_order(
            (edges, shuffled) in prop::collection::vec((0..NODES, 0..NODES, 0u32..4), 0..24)
                .prop_flat_map(|edges| (Just(edges.clone()), Just(edges).prop_shuffle())),
            a in 0..NODES,
            b in 0..NODES,
        ) {
            let build = |edges: &[(i64, i64, u32)]| {
                let mut graph = Graph::new();
                for id in 0..NODES {
                    graph.add_node(n(id));
                }
                for &(from, to, w) in edges {
                    graph.add_edge(n(from), n(to), f64::from(w));
                }
                graph
            };

            let original = build(&edges);
            let permuted = build(&shuffled);

            prop_assert_eq!(
                shortest_path(&original, n(a), n(b)),
                shortest_path(&permuted, n(a), n(b))
            );
        }

        /// The wrapper returns the same nodes as the costed variant.
        #[test]
        fn wrapper_matches(graph in graph_strategy(), a in 0..NODES, b in 0..NODES) {
            let nodes = shortest_path(&graph, n(a), n(b));
            let costed = shortest_path_with_cost(&graph, n(a), n(b))
                .map(|r| r.nodes)
                .unwrap_or_default();
            prop_assert_eq!(nodes, costed);
        }

        /// Depth zero reaches only the start node.
        #[test]
        fn reachable_depth_zero(graph in graph_strategy(), a in 0..NODES) {
            prop_assert_eq!(reachable(&graph, n(a), 0), vec![n(a)]);
        }

        /// Raising the depth never loses nodes.
        #[test]
        fn reachable_is_monotonic(graph in graph_strategy(), a in 0..NODES, d in 0i64..6) {
            let shallow: HashSet<_> = reachable(&graph, n(a), d).into_iter().collect();
            let deep: HashSet<_> = reachable(&graph, n(a), d + 1).into_iter().collect();
            prop_assert!(shallow.is_subset(&deep));
        }

        /// Each node appears once, and anything with a path is reachable
        /// at depth NODES.
        #[test]
        fn reachable_matches_connectivity(graph in graph_strategy(), a in 0..NODES, b in 0..NODES) {
            let reached = reachable(&graph, n(a), NODES);
            let unique: HashSet<_> = reached.iter().copied().collect();
            prop_assert_eq!(unique.len(), reached.len());

            let connected = !shortest_path(&graph, n(a), n(b)).is_empty();
            prop_assert_eq!(unique.contains(&n(b)), connected);
        }
    }
}
