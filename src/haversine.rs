//! Great-circle distance and the fallback travel-time estimate.
//!
//! Used wherever the route oracle is unavailable. Less accurate than a
//! routed duration (ignores roads) but always available and
//! deterministic.

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Hill-road driving estimate: minutes per straight-line kilometer.
const MINUTES_PER_KM: f64 = 3.0;

/// Shortest credible hop between two stops, in minutes.
const MIN_TRAVEL_MINUTES: i64 = 5;

/// Haversine distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Deterministic travel-time estimate between two points, in minutes.
///
/// Assumes [`MINUTES_PER_KM`] over the straight-line distance, floored
/// at [`MIN_TRAVEL_MINUTES`].
pub fn fallback_travel_minutes(from: (f64, f64), to: (f64, f64)) -> i64 {
    let estimate = (haversine_km(from, to) * MINUTES_PER_KM).round() as i64;
    estimate.max(MIN_TRAVEL_MINUTES)
}
