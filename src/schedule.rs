//! Time-budget simulation.
//!
//! Walks each day's ordered stops with a running clock: inserts the
//! single lunch break, stamps arrival and departure times, drops
//! non-forced stops that would run past the day's target end, and
//! optionally layers hotel transfer legs on top of finished days.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::haversine;
use crate::pace::Pace;
use crate::place::{Difficulty, Place};
use crate::traits::RouteOracle;

/// Lunch is considered once the clock is within 30 minutes of 13:30.
pub const LUNCH_THRESHOLD_MINUTES: i64 = 13 * 60 + 30;
pub const LUNCH_APPROACH_MINUTES: i64 = 30;
pub const LUNCH_DURATION_MINUTES: i64 = 90;

/// Hotel transfer estimate when a stop's coordinates are unknown.
const UNKNOWN_COORDS_TRANSFER_MINUTES: i64 = 15;

/// A stop as planned by the routers, before the clock runs over it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStop {
    pub place: Place,
    /// Cluster label reported for this stop: the day's (possibly
    /// merged) label for standard stops, the circuit zone for circuit
    /// stops, the place's own zone for stragglers on a circuit day.
    pub cluster: String,
    pub travel_to_next_minutes: i64,
    pub is_circuit: bool,
}

/// One planned day: an ordered leg of stops under a cluster label.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day_number: usize,
    pub label: String,
    pub stops: Vec<PlannedStop>,
}

/// Non-fatal schedule annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWarning {
    /// A user-forced stop pushes the day past its target end time.
    LateSchedule,
}

impl std::fmt::Display for StopWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LateSchedule => write!(f, "extends the day past its target end time"),
        }
    }
}

/// A kept stop with its computed clock times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledStop {
    pub id: String,
    pub name: String,
    pub cluster: String,
    pub difficulty: Difficulty,
    pub rating: f64,
    pub review_count: i64,
    pub avg_visit_minutes: i64,
    pub travel_to_next_minutes: i64,
    pub is_circuit: bool,
    pub has_lunch_before: bool,
    /// Arrival, `"HH:MM"`.
    pub scheduled_time: String,
    /// End of the visit, `"HH:MM"`.
    pub departure_time: String,
    pub warning: Option<StopWarning>,
}

/// Why a place was dropped from its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    ExceededEndTime,
}

/// A place dropped by the overflow policy, retained for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedPlace {
    pub id: String,
    pub name: String,
    pub cluster: String,
    pub reason: RemovalReason,
    pub reason_text: String,
}

/// A finished day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub day_number: usize,
    pub cluster: String,
    pub places: Vec<ScheduledStop>,
    pub total_drive_minutes: i64,
    pub start_time: String,
    pub end_time: String,
    pub target_end_time: String,
    pub hotel_to_first_minutes: Option<i64>,
    pub last_to_hotel_minutes: Option<i64>,
    pub hotel_departure_time: Option<String>,
    pub hotel_name: Option<String>,
}

/// The traveler's hotel, used for transfer legs around each day.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelLocation {
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// Outcome of running the clock over one day plan.
#[derive(Debug, Clone)]
pub struct SimulatedDay {
    pub kept: Vec<ScheduledStop>,
    pub removed: Vec<RemovedPlace>,
    /// Clock minutes since midnight when the day's last travel ends.
    pub end_minutes: i64,
}

/// Runs the clock over `plan`, keeping what fits the pace's time budget.
///
/// A stop whose finish time (including a due lunch and its onward
/// travel) crosses the target end is dropped unless user-forced; the
/// clock does not advance for dropped stops and a lunch tentatively
/// considered for one is not consumed. Forced stops that overrun stay,
/// carrying a [`StopWarning::LateSchedule`].
pub fn simulate_day(plan: &DayPlan, pace: Pace, forced: &HashSet<String>) -> SimulatedDay {
    let budget_end = i64::from(pace.end_hour()) * 60;
    let mut clock = i64::from(pace.start_hour()) * 60;
    let mut lunch_inserted = false;
    let mut kept: Vec<ScheduledStop> = Vec::new();
    let mut removed: Vec<RemovedPlace> = Vec::new();

    for stop in &plan.stops {
        let visit = stop.place.avg_visit_minutes;
        let travel = stop.travel_to_next_minutes;

        let lunch_due =
            !lunch_inserted && clock >= LUNCH_THRESHOLD_MINUTES - LUNCH_APPROACH_MINUTES;
        let lunch_addition = if lunch_due { LUNCH_DURATION_MINUTES } else { 0 };

        let finish = clock + lunch_addition + visit + travel;
        let is_forced = forced.contains(&stop.place.id);
        let overruns = finish > budget_end;

        if overruns && !is_forced {
            debug!(id = %stop.place.id, finish, budget_end, "dropping overflow stop");
            removed.push(RemovedPlace {
                id: stop.place.id.clone(),
                name: stop.place.name.clone(),
                cluster: stop.cluster.clone(),
                reason: RemovalReason::ExceededEndTime,
                reason_text: format!(
                    "could not fit within the {:02}:00 end time (pace: {})",
                    pace.end_hour(),
                    pace.name()
                ),
            });
            continue;
        }

        if lunch_due {
            clock += LUNCH_DURATION_MINUTES;
            lunch_inserted = true;
        }

        let arrival = clock;
        let departure = arrival + visit;
        kept.push(ScheduledStop {
            id: stop.place.id.clone(),
            name: stop.place.name.clone(),
            cluster: stop.cluster.clone(),
            difficulty: stop.place.difficulty,
            rating: stop.place.rating,
            review_count: stop.place.review_count,
            avg_visit_minutes: visit,
            travel_to_next_minutes: travel,
            is_circuit: stop.is_circuit,
            has_lunch_before: lunch_due,
            scheduled_time: format_clock(arrival),
            departure_time: format_clock(departure),
            warning: (is_forced && overruns).then_some(StopWarning::LateSchedule),
        });

        clock = departure + travel;
    }

    SimulatedDay {
        kept,
        removed,
        end_minutes: clock,
    }
}

/// Point-to-point drive estimate: oracle seconds when available
/// (floored at one minute), haversine fallback otherwise.
pub fn travel_minutes_between<O: RouteOracle>(
    oracle: &O,
    from: (f64, f64),
    to: (f64, f64),
) -> i64 {
    match oracle.travel_seconds(from, to) {
        Some(secs) => ((secs as f64 / 60.0).round() as i64).max(1),
        None => haversine::fallback_travel_minutes(from, to),
    }
}

/// Layers hotel transfer legs onto finished days: the drive from the
/// hotel to each day's first stop, the drive back from its last stop,
/// and the implied hotel departure time before the day's start.
pub fn apply_hotel_transfers<O: RouteOracle>(
    days: &mut [Day],
    hotel: &HotelLocation,
    oracle: &O,
    places_by_id: &HashMap<String, Place>,
    start_hour: u32,
) {
    let hotel_coords = (hotel.lat, hotel.lng);
    let hotel_name = hotel.name.clone().unwrap_or_else(|| "Hotel".to_string());

    for day in days.iter_mut() {
        let (Some(first), Some(last)) = (day.places.first(), day.places.last()) else {
            continue;
        };

        let to_first = places_by_id
            .get(&first.id)
            .map(|p| travel_minutes_between(oracle, hotel_coords, p.coords()))
            .unwrap_or(UNKNOWN_COORDS_TRANSFER_MINUTES);
        let from_last = places_by_id
            .get(&last.id)
            .map(|p| travel_minutes_between(oracle, p.coords(), hotel_coords))
            .unwrap_or(UNKNOWN_COORDS_TRANSFER_MINUTES);

        let departure = (i64::from(start_hour) * 60 - to_first).max(0);

        day.hotel_to_first_minutes = Some(to_first);
        day.last_to_hotel_minutes = Some(from_last);
        day.hotel_departure_time = Some(format_clock(departure));
        day.hotel_name = Some(hotel_name.clone());

        debug!(
            day = day.day_number,
            to_first, from_last, "attached hotel transfers"
        );
    }
}

/// Formats clock minutes since midnight as `"HH:MM"`. Late schedules
/// may run past midnight and print hours ≥ 24 rather than wrapping.
pub fn format_clock(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
