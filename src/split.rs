//! Day splitting when fewer zones than requested days exist.
//!
//! The most demanding splittable day is halved until the requested day
//! count is reached or nothing can be split further. The circuit day is
//! never a candidate: it is a directed walk whose leg must stay whole.

use tracing::{info, warn};

use crate::place::{Difficulty, ZONE_FOREST_CIRCUIT};
use crate::schedule::DayPlan;

/// Cost bonus per Hard place, steering splits toward demanding days.
const HARD_PLACE_BONUS_MINUTES: i64 = 30;

/// Splits the most expensive splittable days until `days` has
/// `num_days` entries, then renumbers contiguously.
///
/// A day is splittable when its label does not contain the circuit
/// zone name and it holds more than two stops; halving a two-stop day
/// would leave two trivial single-stop days. When the most expensive
/// candidate is too small to split, splitting stops entirely.
pub fn split_to_fill(mut days: Vec<DayPlan>, num_days: usize) -> Vec<DayPlan> {
    while days.len() < num_days {
        let Some(target) = most_expensive_splittable(&days) else {
            warn!("no splittable day remains, stopping at fewer days than requested");
            break;
        };

        if days[target].stops.len() <= 2 {
            warn!(
                stops = days[target].stops.len(),
                "most demanding day is too small to split further"
            );
            break;
        }

        let mid = days[target].stops.len() / 2;
        let second_half = days[target].stops.split_off(mid);
        let label = days[target].label.clone();

        info!(
            day = days[target].day_number,
            cluster = %label,
            first = days[target].stops.len(),
            second = second_half.len(),
            "splitting day"
        );

        days.push(DayPlan {
            day_number: days.len() + 1,
            label: format!("{label} (Part 2)"),
            stops: second_half,
        });
    }

    renumber(&mut days);
    days
}

/// Index of the costliest non-circuit day, scanning in day order so an
/// earlier day wins cost ties.
fn most_expensive_splittable(days: &[DayPlan]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (idx, day) in days.iter().enumerate() {
        if day.label.contains(ZONE_FOREST_CIRCUIT) {
            continue;
        }
        let cost = day_cost(day);
        match best {
            Some((_, best_cost)) if cost <= best_cost => {}
            _ => best = Some((idx, cost)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Visit plus travel minutes, weighted toward Hard places.
fn day_cost(day: &DayPlan) -> i64 {
    let minutes: i64 = day
        .stops
        .iter()
        .map(|s| s.place.avg_visit_minutes + s.travel_to_next_minutes)
        .sum();
    let hard_places = day
        .stops
        .iter()
        .filter(|s| s.place.difficulty == Difficulty::Hard)
        .count() as i64;
    minutes + hard_places * HARD_PLACE_BONUS_MINUTES
}

/// Renumbers days 1..=n in list order.
pub fn renumber(days: &mut [DayPlan]) {
    for (idx, day) in days.iter_mut().enumerate() {
        day.day_number = idx + 1;
    }
}
