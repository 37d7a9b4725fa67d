//! Round-trip routing for standard (non-circuit) zones.
//!
//! Hardest-first anchoring: the day is pinned on the Hard place with
//! the best popularity rank (or the best-ranked place outright), and
//! the oracle is asked for an optimized round trip from that anchor
//! through the remaining stops.

use tracing::warn;

use crate::circuit::minutes_from_seconds;
use crate::place::{Difficulty, Place};
use crate::traits::{RouteOracle, RouteResponse};

/// A place with the drive time onward to the next stop of its day.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedStop {
    pub place: Place,
    pub travel_to_next_minutes: i64,
}

/// Picks the day's anchor: the Hard place with the best (lowest)
/// popularity rank when any Hard place exists, else the best-ranked
/// place overall. Returns `None` only for an empty slice.
pub fn find_anchor(places: &[Place]) -> Option<&Place> {
    places
        .iter()
        .filter(|p| p.difficulty == Difficulty::Hard)
        .min_by_key(|p| p.popularity_rank)
        .or_else(|| places.iter().min_by_key(|p| p.popularity_rank))
}

/// Orders one zone's places into a day leg with per-stop travel times.
///
/// With two or more places the oracle is asked for a round trip with
/// origin = destination = anchor. On success the anchor leads with the
/// first leg's duration, the remaining stops follow in oracle order,
/// and the final stop carries the closing leg back to the anchor
/// (later reused as the return-to-hotel drive). On failure the stops
/// keep their input order behind the anchor with zero travel times —
/// the time-budget simulator's estimates compensate downstream.
pub fn route_zone<O: RouteOracle>(oracle: &O, places: &[Place]) -> Vec<RoutedStop> {
    if places.len() <= 1 {
        return places
            .iter()
            .map(|p| RoutedStop {
                place: p.clone(),
                travel_to_next_minutes: 0,
            })
            .collect();
    }

    let Some(anchor) = find_anchor(places) else {
        return Vec::new();
    };
    let others: Vec<&Place> = places.iter().filter(|p| p.id != anchor.id).collect();
    let waypoints: Vec<(f64, f64)> = others.iter().map(|p| p.coords()).collect();

    match oracle.optimize_round_trip(anchor.coords(), &waypoints) {
        RouteResponse::Optimized {
            waypoint_order,
            leg_durations_secs,
        } if waypoint_order.len() == others.len()
            && leg_durations_secs.len() == others.len() + 1 =>
        {
            let mut ordered = vec![RoutedStop {
                place: anchor.clone(),
                travel_to_next_minutes: minutes_from_seconds(leg_durations_secs[0]),
            }];

            for (position, &wp) in waypoint_order.iter().enumerate() {
                let Some(place) = others.get(wp) else {
                    warn!(index = wp, "oracle referenced unknown waypoint, using input order");
                    return unoptimized(anchor, &others);
                };
                let travel = leg_durations_secs
                    .get(position + 1)
                    .copied()
                    .map(minutes_from_seconds)
                    .unwrap_or(0);
                ordered.push(RoutedStop {
                    place: (*place).clone(),
                    travel_to_next_minutes: travel,
                });
            }

            ordered
        }
        _ => {
            warn!(
                stops = places.len(),
                "route oracle unavailable for zone, keeping input order"
            );
            unoptimized(anchor, &others)
        }
    }
}

fn unoptimized(anchor: &Place, others: &[&Place]) -> Vec<RoutedStop> {
    let mut ordered = vec![RoutedStop {
        place: anchor.clone(),
        travel_to_next_minutes: 0,
    }];
    ordered.extend(others.iter().map(|p| RoutedStop {
        place: (*p).clone(),
        travel_to_next_minutes: 0,
    }));
    ordered
}
