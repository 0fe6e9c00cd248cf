//! Which routes call at a stop.
//!
//! Works directly on a route → stop sequence mapping, with no prebuilt
//! index. This is the lookup to use when only that mapping is at hand; the
//! store offers an equivalent that returns full route records.

use std::collections::HashMap;

use crate::domain::{RouteId, StopId};

/// Route id → ordered stop ids along the route.
pub type RouteStopIndex = HashMap<RouteId, Vec<StopId>>;

/// Every route whose stop sequence contains `stop` at least once, in
/// ascending route id order.
///
/// A linear scan over all stop lists, stopping early within a route on its
/// first match.
pub fn routes_through_stop(route_stops: &RouteStopIndex, stop: StopId) -> Vec<RouteId> {
    let mut routes: Vec<RouteId> = route_stops
        .iter()
        .filter(|(_, stops)| stops.iter().any(|&s| s == stop))
        .map(|(&route, _)| route)
        .collect();
    routes.sort_unstable();
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(i64, &[i64])]) -> RouteStopIndex {
        entries
            .iter()
            .map(|(route, stops)| (RouteId(*route), stops.iter().copied().map(StopId).collect()))
            .collect()
    }

    #[test]
    fn finds_every_route_through_stop() {
        let route_stops = index(&[
            (1, &[101, 102, 103]),
            (2, &[102, 104, 105]),
            (3, &[106, 107, 108]),
        ]);

        let routes = routes_through_stop(&route_stops, StopId(102));
        assert_eq!(routes, vec![RouteId(1), RouteId(2)]);
    }

    #[test]
    fn stop_on_no_route() {
        let route_stops = index(&[(1, &[101, 102]), (2, &[103])]);
        assert!(routes_through_stop(&route_stops, StopId(999)).is_empty());
    }

    #[test]
    fn empty_mapping() {
        let route_stops = RouteStopIndex::new();
        assert!(routes_through_stop(&route_stops, StopId(1)).is_empty());
    }

    #[test]
    fn repeated_stop_reports_route_once() {
        let route_stops = index(&[(7, &[1, 2, 1, 3, 1])]);
        assert_eq!(routes_through_stop(&route_stops, StopId(1)), vec![RouteId(7)]);
    }

    #[test]
    fn empty_route_matches_nothing() {
        let route_stops = index(&[(1, &[]), (2, &[5])]);
        assert_eq!(routes_through_stop(&route_stops, StopId(5)), vec![RouteId(2)]);
    }
}
