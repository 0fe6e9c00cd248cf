//! Integer identifiers for stops, routes and trips.
//!
//! Each identifier is a thin newtype over `i64` so a stop id can never be
//! passed where a route id is expected. Serialized transparently as a number.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! impl_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw integer value.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_identifier!(
    /// Identifies a stop. Also the node identifier inside the graph.
    StopId
);
impl_identifier!(
    /// Identifies a route.
    RouteId
);
impl_identifier!(
    /// Identifies a trip.
    TripId
);
