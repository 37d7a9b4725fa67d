//! Zone bucketing and balance-driven merging.
//!
//! Places are bucketed by zone in a fixed priority order, Outskirts
//! places are absorbed into their nearest zone, and buckets are merged
//! until at most one remains per requested day. Merging pairs the two
//! smallest buckets rather than the two nearest: the trade-off favors
//! even day sizes over minimal drive time.

use tracing::info;

use crate::place::{self, Place};

/// One named group of places, destined to become (part of) a day.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneBucket {
    pub label: String,
    pub places: Vec<Place>,
}

/// Buckets `places` by zone, in [`place::ZONE_ORDER`] iteration order.
///
/// Outskirts places move to their `nearest_zone` hint when it names a
/// known zone; unknown labels and missing hints land in the fallback
/// zone. Empty buckets are dropped.
pub fn assign(places: &[Place]) -> Vec<ZoneBucket> {
    let mut buckets: Vec<ZoneBucket> = place::ZONE_ORDER
        .iter()
        .map(|zone| ZoneBucket {
            label: (*zone).to_string(),
            places: Vec::new(),
        })
        .collect();

    for p in places {
        let zone = place::canonical_zone(&p.zone);
        let target = if zone == place::ZONE_OUTSKIRTS {
            p.nearest_zone
                .as_deref()
                .map(place::canonical_zone)
                .filter(|hint| place::is_known_zone(hint))
                .unwrap_or(place::ZONE_FALLBACK)
        } else if place::is_known_zone(zone) {
            zone
        } else {
            place::ZONE_FALLBACK
        };

        if let Some(bucket) = buckets.iter_mut().find(|b| b.label == target) {
            bucket.places.push(p.clone());
        }
    }

    buckets.retain(|b| !b.places.is_empty());
    buckets
}

/// Merges buckets until at most `num_days` remain (or one is left).
///
/// Each round joins the pair with the smallest combined place count —
/// first such pair wins ties, scanning pairs in bucket order — under a
/// `"A + B"` label appended at the end of the bucket list.
pub fn merge(mut buckets: Vec<ZoneBucket>, num_days: usize) -> Vec<ZoneBucket> {
    while buckets.len() > num_days && buckets.len() > 1 {
        let mut best_pair = (0, 1);
        let mut best_combined = usize::MAX;

        for i in 0..buckets.len() {
            for j in (i + 1)..buckets.len() {
                let combined = buckets[i].places.len() + buckets[j].places.len();
                if combined < best_combined {
                    best_combined = combined;
                    best_pair = (i, j);
                }
            }
        }

        let (i, j) = best_pair;
        info!(
            first = %buckets[i].label,
            first_places = buckets[i].places.len(),
            second = %buckets[j].label,
            second_places = buckets[j].places.len(),
            "merging zones for day balance"
        );

        let second = buckets.remove(j);
        let first = buckets.remove(i);
        let mut places = first.places;
        places.extend(second.places);
        buckets.push(ZoneBucket {
            label: format!("{} + {}", first.label, second.label),
            places,
        });
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Difficulty;

    fn place_in(id: &str, zone: &str) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            lat: 10.23,
            lng: 77.48,
            zone: zone.to_string(),
            nearest_zone: None,
            difficulty: Difficulty::Easy,
            avg_visit_minutes: 60,
            popularity_rank: 10,
            rating: 4.0,
            review_count: 100,
            itinerary_eligible: true,
            opening_hours: None,
        }
    }

    fn outskirts_place(id: &str, nearest: Option<&str>) -> Place {
        Place {
            zone: "Outskirts".to_string(),
            nearest_zone: nearest.map(str::to_string),
            ..place_in(id, "Outskirts")
        }
    }

    #[test]
    fn test_assign_groups_by_zone_in_priority_order() {
        let places = vec![
            place_in("a", "Vattakanal"),
            place_in("b", "Town Center"),
            place_in("c", "Forest Circuit"),
        ];
        let buckets = assign(&places);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Town Center", "Forest Circuit", "Vattakanal"]);
    }

    #[test]
    fn test_assign_absorbs_outskirts_into_nearest() {
        let places = vec![outskirts_place("far", Some("Poombarai"))];
        let buckets = assign(&places);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Poombarai");
    }

    #[test]
    fn test_assign_outskirts_without_hint_falls_back() {
        let places = vec![
            outskirts_place("lost", None),
            outskirts_place("stray", Some("Atlantis")),
        ];
        let buckets = assign(&places);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Town Center");
        assert_eq!(buckets[0].places.len(), 2);
    }

    #[test]
    fn test_assign_unknown_zone_falls_back() {
        let buckets = assign(&[place_in("x", "Narnia")]);
        assert_eq!(buckets[0].label, "Town Center");
    }

    #[test]
    fn test_assign_resolves_zone_alias() {
        let buckets = assign(&[place_in("v", "Village & Meadows")]);
        assert_eq!(buckets[0].label, "Poombarai");
    }

    #[test]
    fn test_merge_joins_two_smallest_buckets() {
        let buckets = vec![
            ZoneBucket {
                label: "Town Center".to_string(),
                places: vec![place_in("a", "Town Center"), place_in("b", "Town Center")],
            },
            ZoneBucket {
                label: "Vattakanal".to_string(),
                places: vec![place_in("c", "Vattakanal")],
            },
            ZoneBucket {
                label: "Poombarai".to_string(),
                places: vec![place_in("d", "Poombarai")],
            },
        ];

        let merged = merge(buckets, 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].label, "Town Center");
        // Merged bucket is appended after the survivors.
        assert_eq!(merged[1].label, "Vattakanal + Poombarai");
        assert_eq!(merged[1].places.len(), 2);
    }

    #[test]
    fn test_merge_repeats_until_bound_met() {
        let buckets = vec![
            ZoneBucket {
                label: "Town Center".to_string(),
                places: vec![place_in("a", "Town Center")],
            },
            ZoneBucket {
                label: "Forest Circuit".to_string(),
                places: vec![place_in("b", "Forest Circuit")],
            },
            ZoneBucket {
                label: "Vattakanal".to_string(),
                places: vec![place_in("c", "Vattakanal")],
            },
        ];

        let merged = merge(buckets, 1);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].places.len(), 3);
    }

    #[test]
    fn test_merge_no_op_when_within_bound() {
        let buckets = assign(&[place_in("a", "Town Center"), place_in("b", "Vattakanal")]);
        let merged = merge(buckets.clone(), 3);
        assert_eq!(merged, buckets);
    }
}
