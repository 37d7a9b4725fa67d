//! Weekday alignment of zone buckets.
//!
//! When the trip has a known start date, bucket-to-day assignment is
//! permuted so that as few places as possible land on a weekday their
//! declared opening hours exclude. The permutation search is exhaustive
//! but bounded: beyond [`MAX_PERMUTATION_BUCKETS`] buckets a greedy
//! per-day assignment runs instead of the factorial search.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::cluster::ZoneBucket;
use crate::place::Place;

/// Largest bucket count the exhaustive permutation search will take on
/// (720 orderings). Real trips have a handful of zones at most.
pub const MAX_PERMUTATION_BUCKETS: usize = 6;

/// Reorders buckets to minimize closed-on-arrival places, given the
/// trip's start date. Day 1 gets the first bucket, day 2 the second,
/// and so on, the weekday wrapping at the week boundary.
///
/// An unparseable date degrades to the incoming order — alignment is
/// an optimization, never a failure.
pub fn align(buckets: Vec<ZoneBucket>, start_date: &str) -> Vec<ZoneBucket> {
    let Some(start_weekday) = parse_start_weekday(start_date) else {
        warn!(start_date, "unparseable start date, keeping zone order");
        return buckets;
    };

    if buckets.len() <= 1 {
        return buckets;
    }

    let aligned = if buckets.len() <= MAX_PERMUTATION_BUCKETS {
        best_permutation(buckets, start_weekday)
    } else {
        greedy_order(buckets, start_weekday)
    };

    debug!(
        start_weekday,
        order = ?aligned.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
        "aligned zones to weekdays"
    );
    aligned
}

/// Weekday index of the trip's first day, 0 = Sunday. Accepts RFC 3339
/// timestamps and bare `YYYY-MM-DD` dates.
fn parse_start_weekday(raw: &str) -> Option<u8> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.weekday().num_days_from_sunday() as u8);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.weekday().num_days_from_sunday() as u8);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.weekday().num_days_from_sunday() as u8)
}

/// Places closed on `weekday` among `places`. Places without declared
/// hours never count.
fn closed_count(places: &[Place], weekday: u8) -> usize {
    places.iter().filter(|p| p.closed_on(weekday)).count()
}

/// Score of one bucket ordering: total closed places across the trip.
fn ordering_score(buckets: &[ZoneBucket], order: &[usize], start_weekday: u8) -> usize {
    order
        .iter()
        .enumerate()
        .map(|(offset, &idx)| {
            let weekday = (start_weekday as usize + offset) % 7;
            closed_count(&buckets[idx].places, weekday as u8)
        })
        .sum()
}

fn best_permutation(buckets: Vec<ZoneBucket>, start_weekday: u8) -> Vec<ZoneBucket> {
    let mut best_order: Vec<usize> = (0..buckets.len()).collect();
    let mut best_score = ordering_score(&buckets, &best_order, start_weekday);

    for order in permutations(buckets.len()) {
        let score = ordering_score(&buckets, &order, start_weekday);
        if score < best_score {
            best_score = score;
            best_order = order;
        }
    }

    reorder(buckets, &best_order)
}

/// Greedy fallback for oversized bucket sets: each consecutive day
/// takes the remaining bucket with the fewest closed places.
fn greedy_order(buckets: Vec<ZoneBucket>, start_weekday: u8) -> Vec<ZoneBucket> {
    let mut remaining = buckets;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut weekday = start_weekday;

    while !remaining.is_empty() {
        let pick = remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| closed_count(&b.places, weekday))
            .map(|(i, _)| i)
            .unwrap_or(0);
        ordered.push(remaining.remove(pick));
        weekday = (weekday + 1) % 7;
    }

    ordered
}

/// All orderings of `0..n` in lexicographic order, identity first, so
/// ties resolve to the earliest ordering generated.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    permute_into(n, &mut current, &mut used, &mut out);
    out
}

fn permute_into(
    n: usize,
    current: &mut Vec<usize>,
    used: &mut Vec<bool>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == n {
        out.push(current.clone());
        return;
    }
    for i in 0..n {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        permute_into(n, current, used, out);
        current.pop();
        used[i] = false;
    }
}

fn reorder(mut buckets: Vec<ZoneBucket>, order: &[usize]) -> Vec<ZoneBucket> {
    let mut slots: Vec<Option<ZoneBucket>> = buckets.drain(..).map(Some).collect();
    order
        .iter()
        .filter_map(|&idx| slots.get_mut(idx).and_then(Option::take))
        .collect()
}
