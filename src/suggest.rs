//! On-the-way suggestions.
//!
//! Purely advisory: unselected places in the zones a trip already
//! visits, ranked by rating and review volume. Never feeds back into
//! scheduling.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::place::{self, Difficulty, Place};

pub const MAX_SUGGESTIONS: usize = 5;

/// A lightweight add-on recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub cluster: String,
    pub rating: f64,
    pub review_count: i64,
    pub avg_visit_minutes: i64,
    pub difficulty: Difficulty,
}

/// Collects the top suggestions for a built itinerary.
///
/// `day_labels` are the cluster labels of the produced days; merged
/// labels are split back into their constituent zone names. Candidates
/// are itinerary-eligible, unselected places whose zone is visited,
/// ranked by (rating, review count) descending.
pub fn suggest<'a>(
    all_places: &[Place],
    day_labels: impl IntoIterator<Item = &'a str>,
    selected_ids: &HashSet<String>,
) -> Vec<Suggestion> {
    let visited: HashSet<&str> = day_labels
        .into_iter()
        .flat_map(|label| label.split(" + "))
        .map(|zone| zone.trim_end_matches(" (Part 2)"))
        .collect();

    let mut candidates: Vec<Suggestion> = all_places
        .iter()
        .filter(|p| p.itinerary_eligible && !selected_ids.contains(&p.id))
        .filter(|p| visited.contains(place::canonical_zone(&p.zone)))
        .map(|p| Suggestion {
            id: p.id.clone(),
            name: p.name.clone(),
            cluster: place::canonical_zone(&p.zone).to_string(),
            rating: p.rating,
            review_count: p.review_count,
            avg_visit_minutes: p.avg_visit_minutes,
            difficulty: p.difficulty,
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
            .then(b.review_count.cmp(&a.review_count))
    });
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}
