//! Great-circle distance between coordinates.
//!
//! Edge weights in the network graph are surface distances between
//! consecutive stops, computed here with the haversine formula.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two `(lat, lon)` points given
/// in decimal degrees.
///
/// Uses the `atan2` form, which stays accurate for both tiny and
/// antipodal separations.
///
/// # Examples
///
/// ```
/// use transit_server::geo::distance_km;
///
/// let d = distance_km(40.7128, -74.0060, 42.3601, -71.0589);
/// assert!((d - 306.0).abs() < 10.0);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lat() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    proptest! {
        /// Distance does not depend on argument order
        #[test]
        fn symmetric(a in lat(), b in lon(), c in lat(), d in lon()) {
            let forward = distance_km(a, b, c, d);
            let backward = distance_km(c, d, a, b);
            prop_assert!((forward - backward).abs() < 1e-9);
        }

        /// A point is at distance zero from itself
        #[test]
        fn zero_for_same_point(a in lat(), b in lon()) {
            prop_assert_eq!(distance_km(a, b, a, b), 0.0);
        }

        /// Never negative and never more than half the circumference
        #[test]
        fn bounded(a in lat(), b in lon(), c in lat(), d in lon()) {
            let dist = distance_km(a, b, c, d);
            prop_assert!(dist >= 0.0);
            prop_assert!(dist <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
