//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Real Kodaikanal places with zones, ranks, and difficulties
//! - A builder for ad-hoc places
//! - Mock route-oracle and circuit-store collaborators

pub mod kodaikanal_places;

pub use kodaikanal_places::*;

use std::cell::RefCell;

use itinerary_planner::circuit::CircuitLeg;
use itinerary_planner::traits::{CircuitStore, RouteOracle, RouteResponse};

/// Oracle scripted with a fixed reply for round trips and a fixed
/// per-leg duration for point-to-point queries.
pub struct ScriptedOracle {
    pub round_trip: RouteResponse,
    pub point_to_point_secs: Option<i64>,
}

impl ScriptedOracle {
    pub fn unavailable() -> Self {
        Self {
            round_trip: RouteResponse::Unavailable,
            point_to_point_secs: None,
        }
    }

    /// Echoes the input waypoint order back with `leg_secs` per leg.
    pub fn identity(waypoints: usize, leg_secs: i64) -> Self {
        Self {
            round_trip: RouteResponse::Optimized {
                waypoint_order: (0..waypoints).collect(),
                leg_durations_secs: vec![leg_secs; waypoints + 1],
            },
            point_to_point_secs: None,
        }
    }
}

impl RouteOracle for ScriptedOracle {
    fn optimize_round_trip(&self, _anchor: (f64, f64), _waypoints: &[(f64, f64)]) -> RouteResponse {
        self.round_trip.clone()
    }

    fn travel_seconds(&self, _origin: (f64, f64), _dest: (f64, f64)) -> Option<i64> {
        self.point_to_point_secs
    }
}

/// In-memory circuit store that records saves.
#[derive(Default)]
pub struct MemoryCircuitStore {
    pub cached: RefCell<Option<Vec<CircuitLeg>>>,
    pub saved: RefCell<Vec<Vec<CircuitLeg>>>,
}

impl MemoryCircuitStore {
    pub fn with_route(route: Vec<CircuitLeg>) -> Self {
        Self {
            cached: RefCell::new(Some(route)),
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.borrow().len()
    }
}

impl CircuitStore for MemoryCircuitStore {
    fn load(&self) -> Option<Vec<CircuitLeg>> {
        self.cached.borrow().clone()
    }

    fn save(&self, route: &[CircuitLeg]) -> std::io::Result<()> {
        self.saved.borrow_mut().push(route.to_vec());
        *self.cached.borrow_mut() = Some(route.to_vec());
        Ok(())
    }
}
