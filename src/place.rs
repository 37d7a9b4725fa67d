//! Place records and the zone vocabulary.
//!
//! A `Place` is an immutable snapshot read from the place store. The
//! engine never writes back to it; scheduling state lives on the stop
//! types built during a run.

use serde::{Deserialize, Serialize};

/// Zone label for places that have not been assigned a proper zone.
pub const ZONE_OUTSKIRTS: &str = "Outskirts";

/// The fixed, order-sensitive one-way zone.
pub const ZONE_FOREST_CIRCUIT: &str = "Forest Circuit";

/// Zone that absorbs places with unknown or missing zone labels.
pub const ZONE_FALLBACK: &str = "Town Center";

/// Known zones in day-assignment priority order.
pub const ZONE_ORDER: &[&str] = &["Town Center", "Forest Circuit", "Vattakanal", "Poombarai"];

/// Popularity rank used when the store has no ranking for a place.
pub const UNRANKED: i64 = 999;

/// Resolves dataset naming variations to a canonical zone label.
///
/// `"Village & Meadows"` is the legacy name for the Poombarai zone.
pub fn canonical_zone(label: &str) -> &str {
    match label {
        "Village & Meadows" => "Poombarai",
        other => other,
    }
}

/// True when `label` is one of the known zones.
pub fn is_known_zone(label: &str) -> bool {
    ZONE_ORDER.contains(&label)
}

/// Physical-effort level of a visit. Ordering matters: the cluster
/// router anchors days on the hardest place first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Hard,
}

/// One weekday on which a place opens. Day 0 is Sunday, matching the
/// route oracle's opening-hours convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPeriod {
    pub day: u8,
}

/// Weekly opening schedule. An empty period list means the place never
/// declared hours and is treated as always open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub periods: Vec<OpenPeriod>,
}

impl OpeningHours {
    /// True when the place opens on `weekday` (0 = Sunday), or when no
    /// hours were declared at all.
    pub fn is_open_on(&self, weekday: u8) -> bool {
        self.periods.is_empty() || self.periods.iter().any(|p| p.day == weekday)
    }

    /// True when the schedule actually declares opening periods.
    pub fn has_declared_hours(&self) -> bool {
        !self.periods.is_empty()
    }
}

/// A point of interest as read from the place store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Zone label; [`ZONE_OUTSKIRTS`] marks unzoned places.
    pub zone: String,
    /// Absorption hint for Outskirts places.
    pub nearest_zone: Option<String>,
    pub difficulty: Difficulty,
    pub avg_visit_minutes: i64,
    /// 1 = most popular; [`UNRANKED`] when unknown.
    pub popularity_rank: i64,
    pub rating: f64,
    pub review_count: i64,
    /// Restaurants, services and the like are excluded from itineraries.
    pub itinerary_eligible: bool,
    pub opening_hours: Option<OpeningHours>,
}

impl Place {
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// True when the place's declared hours exclude `weekday` (0 = Sunday).
    /// Places without declared hours are never considered closed.
    pub fn closed_on(&self, weekday: u8) -> bool {
        match &self.opening_hours {
            Some(hours) if hours.has_declared_hours() => !hours.is_open_on(weekday),
            _ => false,
        }
    }
}
