//! Collaborator seams for the itinerary engine.
//!
//! The engine is a pure function of its inputs once these three
//! collaborators are injected: the place store, the route oracle, and
//! the circuit cache store. Concrete apps wire real adapters; tests
//! wire mocks.

use crate::circuit::CircuitLeg;
use crate::place::Place;

/// Read-only bulk access to the place store.
pub trait PlaceStore {
    /// All known places. The engine indexes the result per build.
    fn all(&self) -> Vec<Place>;
}

/// Reply from a round-trip optimization request.
///
/// `Unavailable` covers every failure mode: network errors, an oracle
/// that found no route, malformed replies. Callers degrade to their
/// deterministic fallback and never surface an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResponse {
    Optimized {
        /// Visiting order as indices into the request's waypoint slice.
        waypoint_order: Vec<usize>,
        /// One duration per traveled leg: anchor to first waypoint,
        /// successive waypoints, and last waypoint back to the anchor —
        /// `waypoints.len() + 1` entries in total.
        leg_durations_secs: Vec<i64>,
    },
    Unavailable,
}

/// External travel-time and route-ordering service.
pub trait RouteOracle {
    /// Requests a travel-time-optimized round trip that starts and ends
    /// at `anchor` and visits every waypoint once.
    fn optimize_round_trip(&self, anchor: (f64, f64), waypoints: &[(f64, f64)]) -> RouteResponse;

    /// Point-to-point travel duration in seconds, or `None` when the
    /// oracle cannot answer.
    fn travel_seconds(&self, origin: (f64, f64), dest: (f64, f64)) -> Option<i64>;
}

/// Persistence for the cached one-way circuit ordering.
pub trait CircuitStore {
    /// The cached circuit, or `None` when no cache exists yet.
    fn load(&self) -> Option<Vec<CircuitLeg>>;

    /// Persists a rebuilt circuit.
    fn save(&self, route: &[CircuitLeg]) -> std::io::Result<()>;
}

impl<T: PlaceStore + ?Sized> PlaceStore for &T {
    fn all(&self) -> Vec<Place> {
        (**self).all()
    }
}

impl<T: RouteOracle + ?Sized> RouteOracle for &T {
    fn optimize_round_trip(&self, anchor: (f64, f64), waypoints: &[(f64, f64)]) -> RouteResponse {
        (**self).optimize_round_trip(anchor, waypoints)
    }

    fn travel_seconds(&self, origin: (f64, f64), dest: (f64, f64)) -> Option<i64> {
        (**self).travel_seconds(origin, dest)
    }
}

impl<T: CircuitStore + ?Sized> CircuitStore for &T {
    fn load(&self) -> Option<Vec<CircuitLeg>> {
        (**self).load()
    }

    fn save(&self, route: &[CircuitLeg]) -> std::io::Result<()> {
        (**self).save(route)
    }
}

/// Oracle stand-in for fully offline operation: every request is
/// `Unavailable`, so all call sites take their deterministic fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRouteOracle;

impl RouteOracle for NullRouteOracle {
    fn optimize_round_trip(&self, _anchor: (f64, f64), _waypoints: &[(f64, f64)]) -> RouteResponse {
        RouteResponse::Unavailable
    }

    fn travel_seconds(&self, _origin: (f64, f64), _dest: (f64, f64)) -> Option<i64> {
        None
    }
}
