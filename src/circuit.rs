//! The fixed one-way circuit and its cached ordering.
//!
//! The circuit zone is a directed scenic walk: its internal sequence is
//! precomputed once via the route oracle, cached, and never permuted by
//! an itinerary build. Builds only filter the cache down to the places
//! actually selected; rebuilding is an explicit, separately triggered
//! operation.

use tracing::warn;

use serde::{Deserialize, Serialize};

use crate::place::Place;
use crate::traits::{RouteOracle, RouteResponse};

/// One stop of the cached circuit with the drive time to its successor.
/// The last leg of a cached circuit always carries 0 (end of the walk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitLeg {
    pub id: String,
    #[serde(rename = "travel_to_next_min")]
    pub travel_to_next_minutes: i64,
}

impl CircuitLeg {
    pub fn new(id: &str, travel_to_next_minutes: i64) -> Self {
        Self {
            id: id.to_string(),
            travel_to_next_minutes,
        }
    }
}

/// Compiled-in circuit used until a cache is first persisted.
pub fn default_route() -> Vec<CircuitLeg> {
    vec![
        CircuitLeg::new("green-valley-viewpoint-kodaikanal", 5),
        CircuitLeg::new("guna-cave-kodaikanal", 1),
        CircuitLeg::new("pillar-rocks-road-kodaikanal", 4),
        CircuitLeg::new("pine-forest-kodaikanal", 3),
        CircuitLeg::new("moir-point-kodaikanal", 0),
    ]
}

/// Filters the cached circuit down to the selected stops, preserving
/// relative order.
///
/// Travel minutes of skipped stops accumulate and carry into the next
/// selected stop's leg, so drive time across a gap is not lost. The
/// last selected stop's leg is forced to 0.
pub fn filter_selection(
    circuit: &[CircuitLeg],
    selected: &std::collections::HashSet<String>,
) -> Vec<CircuitLeg> {
    let mut result: Vec<CircuitLeg> = Vec::new();
    let mut carried = 0;

    for leg in circuit {
        if selected.contains(&leg.id) {
            result.push(CircuitLeg {
                id: leg.id.clone(),
                travel_to_next_minutes: carried + leg.travel_to_next_minutes,
            });
            carried = 0;
        } else {
            carried += leg.travel_to_next_minutes;
        }
    }

    if let Some(last) = result.last_mut() {
        last.travel_to_next_minutes = 0;
    }

    result
}

/// Rebuilds the circuit ordering via one round-trip oracle request.
///
/// Origin and destination are the fixed anchor location; every
/// circuit-zone place is a waypoint. Only interior legs survive — the
/// legs to and from the anchor are not part of the walk — and the final
/// stop's leg is 0. Any failure (oracle unavailable, too few places,
/// malformed reply) returns `previous` untouched: a rebuild must never
/// corrupt the cache.
pub fn rebuild<O: RouteOracle>(
    oracle: &O,
    circuit_places: &[Place],
    anchor: (f64, f64),
    previous: &[CircuitLeg],
) -> Vec<CircuitLeg> {
    if circuit_places.len() < 2 {
        warn!(
            count = circuit_places.len(),
            "not enough circuit places to rebuild, keeping cached route"
        );
        return previous.to_vec();
    }

    let waypoints: Vec<(f64, f64)> = circuit_places.iter().map(Place::coords).collect();

    match oracle.optimize_round_trip(anchor, &waypoints) {
        RouteResponse::Optimized {
            waypoint_order,
            leg_durations_secs,
        } => {
            if waypoint_order.len() != circuit_places.len()
                || leg_durations_secs.len() != circuit_places.len() + 1
            {
                warn!("malformed oracle reply during rebuild, keeping cached route");
                return previous.to_vec();
            }

            let closing_leg = leg_durations_secs.len() - 1;
            let mut rebuilt = Vec::with_capacity(waypoint_order.len());
            for (position, &wp) in waypoint_order.iter().enumerate() {
                let Some(place) = circuit_places.get(wp) else {
                    warn!(index = wp, "oracle referenced unknown waypoint, keeping cached route");
                    return previous.to_vec();
                };
                // legs[position + 1] is the drive away from this stop;
                // the closing leg back to the anchor is not part of the walk.
                let travel = match leg_durations_secs.get(position + 1) {
                    Some(&secs) if position + 1 < closing_leg => minutes_from_seconds(secs),
                    _ => 0,
                };
                rebuilt.push(CircuitLeg {
                    id: place.id.clone(),
                    travel_to_next_minutes: travel,
                });
            }

            if let Some(last) = rebuilt.last_mut() {
                last.travel_to_next_minutes = 0;
            }
            rebuilt
        }
        RouteResponse::Unavailable => {
            warn!("route oracle unavailable, keeping cached circuit route");
            previous.to_vec()
        }
    }
}

pub(crate) fn minutes_from_seconds(secs: i64) -> i64 {
    (secs as f64 / 60.0).round() as i64
}
