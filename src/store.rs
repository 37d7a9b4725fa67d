//! File-backed collaborators: the JSON place store and the circuit
//! cache file.
//!
//! Wire documents are decoded into private record types and converted
//! to domain types at the boundary; nothing downstream sees the nested
//! JSON shape.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::circuit::CircuitLeg;
use crate::place::{Difficulty, OpenPeriod, OpeningHours, Place, UNRANKED, ZONE_FALLBACK};
use crate::traits::{CircuitStore, PlaceStore};

const DEFAULT_VISIT_MINUTES: i64 = 60;

/// Place store over the exported places document.
#[derive(Debug, Clone, Default)]
pub struct JsonPlaceStore {
    places: Vec<Place>,
}

impl JsonPlaceStore {
    /// Loads the document at `path`. An unreadable or malformed file
    /// yields an empty store with a warning, mirroring the original
    /// loader's behavior.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read place store");
                return Self::default();
            }
        };

        match serde_json::from_str::<PlacesDocument>(&raw) {
            Ok(doc) => Self {
                places: doc.places.into_iter().map(Place::from_record).collect(),
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not parse place store");
                Self::default()
            }
        }
    }

    /// In-memory store, mainly for wiring tests and embedded datasets.
    pub fn from_places(places: Vec<Place>) -> Self {
        Self { places }
    }
}

impl PlaceStore for JsonPlaceStore {
    fn all(&self) -> Vec<Place> {
        self.places.clone()
    }
}

/// Circuit cache persisted as a JSON array of legs.
///
/// Saves write a temporary sibling and atomically rename it over the
/// target, so a reader never observes a torn cache.
#[derive(Debug, Clone)]
pub struct CircuitCacheFile {
    path: PathBuf,
}

impl CircuitCacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CircuitStore for CircuitCacheFile {
    fn load(&self) -> Option<Vec<CircuitLeg>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(route) => Some(route),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not parse circuit cache");
                None
            }
        }
    }

    fn save(&self, route: &[CircuitLeg]) -> io::Result<()> {
        let json = serde_json::to_string_pretty(route)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)
    }
}

// ============================================================================
// Wire records
// ============================================================================

#[derive(Debug, Deserialize)]
struct PlacesDocument {
    #[serde(default)]
    places: Vec<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: LocationRecord,
    #[serde(default)]
    logic: LogicRecord,
    #[serde(default)]
    stats: StatsRecord,
}

#[derive(Debug, Default, Deserialize)]
struct LocationRecord {
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lng: f64,
    cluster_zone: Option<String>,
    nearest_cluster: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LogicRecord {
    difficulty: Option<Difficulty>,
    avg_time_spent_minutes: Option<i64>,
    itinerary_include: Option<bool>,
    opening_hours: Option<OpeningHoursRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct OpeningHoursRecord {
    #[serde(default)]
    periods: Vec<PeriodRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct PeriodRecord {
    #[serde(default)]
    open: OpenRecord,
}

#[derive(Debug, Default, Deserialize)]
struct OpenRecord {
    #[serde(default)]
    day: u8,
}

#[derive(Debug, Default, Deserialize)]
struct StatsRecord {
    popularity_rank: Option<i64>,
    rating: Option<f64>,
    review_count: Option<i64>,
}

impl Place {
    fn from_record(record: PlaceRecord) -> Self {
        let name = if record.name.is_empty() {
            record.id.clone()
        } else {
            record.name
        };
        Self {
            id: record.id,
            name,
            lat: record.location.lat,
            lng: record.location.lng,
            zone: record
                .location
                .cluster_zone
                .unwrap_or_else(|| ZONE_FALLBACK.to_string()),
            nearest_zone: record.location.nearest_cluster,
            difficulty: record.logic.difficulty.unwrap_or_default(),
            avg_visit_minutes: record
                .logic
                .avg_time_spent_minutes
                .unwrap_or(DEFAULT_VISIT_MINUTES),
            popularity_rank: record.stats.popularity_rank.unwrap_or(UNRANKED),
            rating: record.stats.rating.unwrap_or(0.0),
            review_count: record.stats.review_count.unwrap_or(0),
            itinerary_eligible: record.logic.itinerary_include.unwrap_or(true),
            opening_hours: record.logic.opening_hours.map(|hours| OpeningHours {
                periods: hours
                    .periods
                    .into_iter()
                    .map(|p| OpenPeriod { day: p.open.day })
                    .collect(),
            }),
        }
    }
}
