//! OSRM HTTP adapter for the route oracle.
//!
//! Maps the `/trip` service (round-trip waypoint optimization) and the
//! `/route` service (point-to-point duration) onto the [`RouteOracle`]
//! seam. Every failure path collapses to `Unavailable`/`None` so the
//! engine degrades instead of erroring.

use serde::Deserialize;

use crate::traits::{RouteOracle, RouteResponse};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn coords_segment(points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl RouteOracle for OsrmClient {
    fn optimize_round_trip(&self, anchor: (f64, f64), waypoints: &[(f64, f64)]) -> RouteResponse {
        if waypoints.is_empty() {
            return RouteResponse::Unavailable;
        }

        let mut points = Vec::with_capacity(waypoints.len() + 1);
        points.push(anchor);
        points.extend_from_slice(waypoints);

        let url = format!(
            "{}/trip/v1/{}/{}?roundtrip=true&source=first&steps=false",
            self.config.base_url,
            self.config.profile,
            Self::coords_segment(&points)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTripResponse>());

        let body = match response {
            Ok(body) => body,
            Err(_) => return RouteResponse::Unavailable,
        };

        let Some(trip) = body.trips.first() else {
            return RouteResponse::Unavailable;
        };
        if body.waypoints.len() != points.len() || trip.legs.len() != points.len() {
            return RouteResponse::Unavailable;
        }
        // The anchor must open the tour or the round trip is not
        // anchored where the caller asked.
        if body.waypoints[0].waypoint_index != 0 {
            return RouteResponse::Unavailable;
        }

        // body.waypoints is parallel to the input coordinates; each
        // entry's waypoint_index is its position in the optimized tour.
        let mut order: Vec<(usize, usize)> = body
            .waypoints
            .iter()
            .enumerate()
            .skip(1)
            .map(|(input_idx, wp)| (wp.waypoint_index, input_idx - 1))
            .collect();
        order.sort_by_key(|&(position, _)| position);

        let expected: Vec<usize> = (1..points.len()).collect();
        if order.iter().map(|&(position, _)| position).collect::<Vec<_>>() != expected {
            return RouteResponse::Unavailable;
        }

        RouteResponse::Optimized {
            waypoint_order: order.into_iter().map(|(_, input_idx)| input_idx).collect(),
            leg_durations_secs: trip
                .legs
                .iter()
                .map(|leg| leg.duration.round() as i64)
                .collect(),
        }
    }

    fn travel_seconds(&self, origin: (f64, f64), dest: (f64, f64)) -> Option<i64> {
        let url = format!(
            "{}/route/v1/{}/{}?overview=false",
            self.config.base_url,
            self.config.profile,
            Self::coords_segment(&[origin, dest])
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => body.routes.first().map(|r| r.duration.round() as i64),
            Err(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTripResponse {
    #[serde(default)]
    trips: Vec<OsrmTrip>,
    #[serde(default)]
    waypoints: Vec<OsrmTripWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmTrip {
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmTripWaypoint {
    waypoint_index: usize,
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
}
