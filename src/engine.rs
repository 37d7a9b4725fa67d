//! The itinerary engine.
//!
//! An explicitly constructed object over three injected collaborators:
//! the place store, the route oracle, and the circuit cache store.
//! `build_itinerary` is a pure function of those inputs; the only state
//! the engine ever writes is the circuit cache, and only from the
//! explicit `rebuild_circuit` trigger.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::circuit::{self, CircuitLeg};
use crate::cluster;
use crate::pace::Pace;
use crate::place::{self, Place, ZONE_FOREST_CIRCUIT};
use crate::route;
use crate::schedule::{
    self, Day, DayPlan, HotelLocation, PlannedStop, RemovedPlace,
};
use crate::split;
use crate::suggest::{self, Suggestion};
use crate::traits::{CircuitStore, PlaceStore, RouteOracle};
use crate::weekday;

/// Drive estimate between a circuit day's walk and a merged-in
/// straggler from another zone.
const INTER_CLUSTER_ESTIMATE_MINUTES: i64 = 10;

/// Default anchor for circuit rebuilds: the town bus stand, the fixed
/// start and end of the scenic loop.
const DEFAULT_CIRCUIT_ANCHOR_ID: &str = "kodaikanal-bus-stand-kodaikanal";

/// What the caller asks for.
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    pub selected_place_ids: Vec<String>,
    pub num_days: usize,
    pub pace: Pace,
    /// Zone the traveler sleeps in. Accepted for API compatibility with
    /// the original configuration shape; no component consumes it.
    pub hotel_cluster: Option<String>,
    pub hotel_location: Option<HotelLocation>,
    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date of day 1.
    pub start_date: Option<String>,
    /// Stops that overflow may flag but never drop.
    pub user_forced_ids: Vec<String>,
}

impl ItineraryRequest {
    pub fn new(selected_place_ids: Vec<String>, num_days: usize) -> Self {
        Self {
            selected_place_ids,
            num_days,
            pace: Pace::default(),
            hotel_cluster: None,
            hotel_location: None,
            start_date: None,
            user_forced_ids: Vec::new(),
        }
    }
}

/// A finished build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub days: Vec<Day>,
    pub start_hour: u32,
    pub end_hour: u32,
    pub suggestions: Vec<Suggestion>,
    pub removed_places: Vec<RemovedPlace>,
}

/// The one error a build can surface. Every other failure mode
/// degrades to a worse-but-valid itinerary instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// None of the selected ids resolved to an itinerary-eligible place.
    NoValidPlaces,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidPlaces => write!(f, "no valid places selected"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Day-builder engine over injected collaborators.
pub struct ItineraryEngine<S, O, C> {
    store: S,
    oracle: O,
    circuit_store: C,
    circuit_anchor_id: String,
}

impl<S, O, C> ItineraryEngine<S, O, C>
where
    S: PlaceStore,
    O: RouteOracle,
    C: CircuitStore,
{
    pub fn new(store: S, oracle: O, circuit_store: C) -> Self {
        Self {
            store,
            oracle,
            circuit_store,
            circuit_anchor_id: DEFAULT_CIRCUIT_ANCHOR_ID.to_string(),
        }
    }

    /// Overrides the place the circuit rebuild anchors on.
    pub fn with_circuit_anchor(mut self, anchor_id: &str) -> Self {
        self.circuit_anchor_id = anchor_id.to_string();
        self
    }

    /// Builds a day-wise itinerary from the selected places.
    pub fn build_itinerary(&self, request: &ItineraryRequest) -> Result<Itinerary, BuildError> {
        let all = self.store.all();
        let by_id: HashMap<String, Place> =
            all.iter().map(|p| (p.id.clone(), p.clone())).collect();

        let selected: Vec<Place> = request
            .selected_place_ids
            .iter()
            .filter_map(|id| by_id.get(id))
            .filter(|p| p.itinerary_eligible)
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(BuildError::NoValidPlaces);
        }

        let num_days = request.num_days.max(1);
        info!(
            num_days,
            pace = request.pace.name(),
            places = selected.len(),
            "building itinerary"
        );

        let buckets = cluster::assign(&selected);
        let buckets = cluster::merge(buckets, num_days);
        let buckets = match &request.start_date {
            Some(date) => weekday::align(buckets, date),
            None => buckets,
        };

        let cached_circuit = self
            .circuit_store
            .load()
            .unwrap_or_else(circuit::default_route);

        let mut plans: Vec<DayPlan> = buckets
            .iter()
            .enumerate()
            .map(|(idx, bucket)| DayPlan {
                day_number: idx + 1,
                label: bucket.label.clone(),
                stops: self.plan_bucket(bucket, &cached_circuit, &by_id),
            })
            .collect();

        if plans.len() < num_days {
            plans = split::split_to_fill(plans, num_days);
        }

        let forced: HashSet<String> = request.user_forced_ids.iter().cloned().collect();
        let start_hour = request.pace.start_hour();
        let end_hour = request.pace.end_hour();

        let mut removed_places: Vec<RemovedPlace> = Vec::new();
        let mut days: Vec<Day> = Vec::new();
        for plan in &plans {
            let sim = schedule::simulate_day(plan, request.pace, &forced);
            removed_places.extend(sim.removed);

            let total_drive = sim
                .kept
                .iter()
                .map(|s| s.travel_to_next_minutes)
                .sum();
            days.push(Day {
                day_number: plan.day_number,
                cluster: plan.label.clone(),
                places: sim.kept,
                total_drive_minutes: total_drive,
                start_time: schedule::format_clock(i64::from(start_hour) * 60),
                end_time: schedule::format_clock(sim.end_minutes),
                target_end_time: format!("{end_hour:02}:00"),
                hotel_to_first_minutes: None,
                last_to_hotel_minutes: None,
                hotel_departure_time: None,
                hotel_name: None,
            });
        }

        days.retain(|d| !d.places.is_empty());
        for (idx, day) in days.iter_mut().enumerate() {
            day.day_number = idx + 1;
        }

        if let Some(hotel) = &request.hotel_location {
            schedule::apply_hotel_transfers(&mut days, hotel, &self.oracle, &by_id, start_hour);
        }

        let selected_ids: HashSet<String> = request.selected_place_ids.iter().cloned().collect();
        let day_labels: Vec<&str> = days.iter().map(|d| d.cluster.as_str()).collect();
        let suggestions = suggest::suggest(&all, day_labels, &selected_ids);

        info!(
            days = days.len(),
            removed = removed_places.len(),
            "itinerary built"
        );

        Ok(Itinerary {
            days,
            start_hour,
            end_hour,
            suggestions,
            removed_places,
        })
    }

    /// Orders one bucket's places into a day leg.
    ///
    /// A bucket whose label contains the circuit zone is partitioned:
    /// stops present in the cached circuit take the filtered cached
    /// order; merged-in stragglers from other zones append behind the
    /// walk with a fixed inter-cluster estimate. Standard buckets go
    /// through the round-trip cluster router.
    fn plan_bucket(
        &self,
        bucket: &cluster::ZoneBucket,
        cached_circuit: &[CircuitLeg],
        by_id: &HashMap<String, Place>,
    ) -> Vec<PlannedStop> {
        if !bucket.label.contains(ZONE_FOREST_CIRCUIT) {
            return route::route_zone(&self.oracle, &bucket.places)
                .into_iter()
                .map(|routed| PlannedStop {
                    cluster: bucket.label.clone(),
                    travel_to_next_minutes: routed.travel_to_next_minutes,
                    is_circuit: false,
                    place: routed.place,
                })
                .collect();
        }

        let circuit_ids: HashSet<&str> =
            cached_circuit.iter().map(|leg| leg.id.as_str()).collect();
        let (circuit_places, stragglers): (Vec<&Place>, Vec<&Place>) = bucket
            .places
            .iter()
            .partition(|p| circuit_ids.contains(p.id.as_str()));

        let selection: HashSet<String> =
            circuit_places.iter().map(|p| p.id.clone()).collect();
        let walk = circuit::filter_selection(cached_circuit, &selection);

        let mut stops: Vec<PlannedStop> = walk
            .iter()
            .filter_map(|leg| {
                by_id.get(&leg.id).map(|p| PlannedStop {
                    place: p.clone(),
                    cluster: ZONE_FOREST_CIRCUIT.to_string(),
                    travel_to_next_minutes: leg.travel_to_next_minutes,
                    is_circuit: true,
                })
            })
            .collect();

        for p in stragglers {
            stops.push(PlannedStop {
                place: p.clone(),
                cluster: place::canonical_zone(&p.zone).to_string(),
                travel_to_next_minutes: INTER_CLUSTER_ESTIMATE_MINUTES,
                is_circuit: false,
            });
        }

        stops
    }

    /// Rebuilds the circuit cache via the route oracle.
    ///
    /// On any failure the previous cache is returned unchanged and
    /// nothing is persisted. A save error is logged, never raised: the
    /// in-memory result stays valid either way.
    pub fn rebuild_circuit(&self) -> Vec<CircuitLeg> {
        let all = self.store.all();
        let previous = self
            .circuit_store
            .load()
            .unwrap_or_else(circuit::default_route);

        let circuit_places: Vec<Place> = all
            .iter()
            .filter(|p| place::canonical_zone(&p.zone) == ZONE_FOREST_CIRCUIT)
            .cloned()
            .collect();

        let Some(anchor) = all.iter().find(|p| p.id == self.circuit_anchor_id) else {
            warn!(
                anchor = %self.circuit_anchor_id,
                "circuit anchor not found in place store, keeping cached route"
            );
            return previous;
        };

        let rebuilt = circuit::rebuild(&self.oracle, &circuit_places, anchor.coords(), &previous);
        if rebuilt != previous {
            if let Err(err) = self.circuit_store.save(&rebuilt) {
                warn!(error = %err, "failed to persist rebuilt circuit");
            } else {
                info!(stops = rebuilt.len(), "circuit route rebuilt and persisted");
            }
        }
        rebuilt
    }
}
