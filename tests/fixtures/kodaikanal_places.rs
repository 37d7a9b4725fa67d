//! Real Kodaikanal places for realistic test fixtures.
//!
//! Zones, difficulties, and popularity ranks reflect the production
//! dataset; coordinates are the actual hill-station locations.

use itinerary_planner::place::{Difficulty, OpenPeriod, OpeningHours, Place};

/// Builder for test places with sensible defaults.
#[derive(Debug, Clone)]
pub struct PlaceBuilder {
    place: Place,
}

impl PlaceBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            place: Place {
                id: id.to_string(),
                name: id.to_string(),
                lat: 10.2381,
                lng: 77.4892,
                zone: "Town Center".to_string(),
                nearest_zone: None,
                difficulty: Difficulty::Easy,
                avg_visit_minutes: 60,
                popularity_rank: 50,
                rating: 4.0,
                review_count: 100,
                itinerary_eligible: true,
                opening_hours: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.place.name = name.to_string();
        self
    }

    pub fn zone(mut self, zone: &str) -> Self {
        self.place.zone = zone.to_string();
        self
    }

    pub fn nearest_zone(mut self, zone: &str) -> Self {
        self.place.nearest_zone = Some(zone.to_string());
        self
    }

    pub fn coords(mut self, lat: f64, lng: f64) -> Self {
        self.place.lat = lat;
        self.place.lng = lng;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.place.difficulty = difficulty;
        self
    }

    pub fn visit_minutes(mut self, minutes: i64) -> Self {
        self.place.avg_visit_minutes = minutes;
        self
    }

    pub fn rank(mut self, rank: i64) -> Self {
        self.place.popularity_rank = rank;
        self
    }

    pub fn rated(mut self, rating: f64, reviews: i64) -> Self {
        self.place.rating = rating;
        self.place.review_count = reviews;
        self
    }

    pub fn not_for_itinerary(mut self) -> Self {
        self.place.itinerary_eligible = false;
        self
    }

    pub fn open_on(mut self, days: &[u8]) -> Self {
        self.place.opening_hours = Some(OpeningHours {
            periods: days.iter().map(|&day| OpenPeriod { day }).collect(),
        });
        self
    }

    pub fn build(self) -> Place {
        self.place
    }
}

pub fn place(id: &str) -> PlaceBuilder {
    PlaceBuilder::new(id)
}

// ============================================================================
// The Kodaikanal catalog
// ============================================================================

pub fn town_center_places() -> Vec<Place> {
    vec![
        place("kodaikanal-lake-kodaikanal")
            .name("Kodaikanal Lake")
            .coords(10.2381, 77.4892)
            .rank(1)
            .rated(4.5, 48210)
            .visit_minutes(120)
            .build(),
        place("coakers-walk-kodaikanal")
            .name("Coaker's Walk")
            .coords(10.2319, 77.4892)
            .rank(3)
            .rated(4.4, 21034)
            .visit_minutes(45)
            .build(),
        place("bryant-park-kodaikanal")
            .name("Bryant Park")
            .coords(10.2340, 77.4935)
            .rank(6)
            .rated(4.2, 15877)
            .visit_minutes(60)
            .open_on(&[0, 1, 2, 3, 4, 5, 6])
            .build(),
        place("kodaikanal-bus-stand-kodaikanal")
            .name("Kodaikanal Bus Stand")
            .coords(10.2365, 77.4915)
            .rank(40)
            .rated(3.9, 1203)
            .visit_minutes(10)
            .build(),
    ]
}

pub fn forest_circuit_places() -> Vec<Place> {
    vec![
        place("green-valley-viewpoint-kodaikanal")
            .name("Green Valley Viewpoint")
            .zone("Forest Circuit")
            .coords(10.2224, 77.4770)
            .rank(7)
            .rated(4.3, 12561)
            .visit_minutes(40)
            .build(),
        place("guna-cave-kodaikanal")
            .name("Guna Cave")
            .zone("Forest Circuit")
            .coords(10.2208, 77.4653)
            .difficulty(Difficulty::Moderate)
            .rank(2)
            .rated(4.4, 18234)
            .visit_minutes(45)
            .build(),
        place("pillar-rocks-road-kodaikanal")
            .name("Pillar Rocks")
            .zone("Forest Circuit")
            .coords(10.2103, 77.4610)
            .rank(4)
            .rated(4.5, 16420)
            .visit_minutes(30)
            .build(),
        place("pine-forest-kodaikanal")
            .name("Pine Forest")
            .zone("Forest Circuit")
            .coords(10.2161, 77.4724)
            .rank(5)
            .rated(4.3, 14110)
            .visit_minutes(50)
            .build(),
        place("moir-point-kodaikanal")
            .name("Moir Point")
            .zone("Forest Circuit")
            .coords(10.2252, 77.4570)
            .rank(12)
            .rated(4.2, 6890)
            .visit_minutes(25)
            .build(),
    ]
}

pub fn vattakanal_places() -> Vec<Place> {
    vec![
        place("dolphins-nose-kodaikanal")
            .name("Dolphin's Nose")
            .zone("Vattakanal")
            .coords(10.2034, 77.4822)
            .difficulty(Difficulty::Hard)
            .rank(8)
            .rated(4.5, 13204)
            .visit_minutes(90)
            .build(),
        place("vattakanal-falls-kodaikanal")
            .name("Vattakanal Falls")
            .zone("Vattakanal")
            .coords(10.2087, 77.4833)
            .difficulty(Difficulty::Moderate)
            .rank(9)
            .rated(4.1, 7655)
            .visit_minutes(45)
            .build(),
        place("echo-rock-kodaikanal")
            .name("Echo Rock")
            .zone("Vattakanal")
            .coords(10.2041, 77.4815)
            .rank(15)
            .rated(4.0, 3420)
            .visit_minutes(20)
            .build(),
    ]
}

pub fn poombarai_places() -> Vec<Place> {
    vec![
        place("poombarai-village-view-kodaikanal")
            .name("Poombarai Village View")
            .zone("Poombarai")
            .coords(10.2568, 77.3905)
            .rank(10)
            .rated(4.6, 5230)
            .visit_minutes(40)
            .build(),
        place("kuzhanthai-velappar-temple-kodaikanal")
            .name("Kuzhanthai Velappar Temple")
            .zone("Poombarai")
            .coords(10.2586, 77.3880)
            .rank(18)
            .rated(4.5, 2980)
            .visit_minutes(30)
            .open_on(&[0, 2, 3, 4, 5, 6])
            .build(),
    ]
}

pub fn outskirts_places() -> Vec<Place> {
    vec![
        place("mannavanur-lake-kodaikanal")
            .name("Mannavanur Lake")
            .zone("Outskirts")
            .nearest_zone("Poombarai")
            .coords(10.2766, 77.3422)
            .rank(11)
            .rated(4.5, 4890)
            .visit_minutes(75)
            .build(),
        place("hilltop-dhaba-kodaikanal")
            .name("Hilltop Dhaba")
            .zone("Outskirts")
            .coords(10.2500, 77.5000)
            .rank(60)
            .rated(4.3, 850)
            .visit_minutes(45)
            .not_for_itinerary()
            .build(),
    ]
}

/// The whole catalog.
pub fn all_places() -> Vec<Place> {
    let mut all = Vec::new();
    all.extend(town_center_places());
    all.extend(forest_circuit_places());
    all.extend(vattakanal_places());
    all.extend(poombarai_places());
    all.extend(outskirts_places());
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_spans_all_zones() {
        let zones: std::collections::HashSet<String> =
            all_places().into_iter().map(|p| p.zone).collect();
        for zone in ["Town Center", "Forest Circuit", "Vattakanal", "Poombarai", "Outskirts"] {
            assert!(zones.contains(zone), "missing zone {zone}");
        }
    }

    #[test]
    fn test_coordinates_in_kodaikanal_area() {
        for p in all_places() {
            assert!(p.lat > 10.1 && p.lat < 10.3, "{} lat out of range: {}", p.id, p.lat);
            assert!(p.lng > 77.3 && p.lng < 77.6, "{} lng out of range: {}", p.id, p.lng);
        }
    }
}
