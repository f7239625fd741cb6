//! Mapbox-like routing provider: timing/geometry source for car mode.

use super::RoutingProvider;
use crate::types::{Coordinate, NormalizedSegment, RouteCandidate};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const ROUTING_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum MapboxError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("response contained no routes")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct Step {
    duration: f64,
    distance: f64,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Leg {
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct WireRoute {
    distance: f64,
    duration: f64,
    geometry: Geometry,
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    routes: Vec<WireRoute>,
}

fn to_coordinate(raw: &[f64]) -> Coordinate {
    Coordinate { lon: raw[0], lat: raw[1], alt: raw.get(2).copied() }
}

fn to_candidate(route: WireRoute) -> RouteCandidate {
    let coordinates: Vec<Coordinate> = route.geometry.coordinates.iter().map(|c| to_coordinate(c)).collect();
    let segments = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| NormalizedSegment::OwnGeometry {
            distance_m: step.distance,
            duration_s: step.duration,
            coordinates: step.geometry.coordinates.iter().map(|c| to_coordinate(c)).collect(),
        })
        .collect();

    RouteCandidate::new(coordinates, segments, route.distance, route.duration)
}

/// Timing/geometry provider, used for the `fastest`/`balanced` car-mode path.
pub struct MapboxProvider {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MapboxProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.mapbox.com/directions/v5/mapbox/driving-traffic", access_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(ROUTING_TIMEOUT)
            .build()
            .expect("failed to build Mapbox HTTP client");
        Self { http, base_url: base_url.into(), access_token: access_token.into() }
    }
}

#[async_trait]
impl RoutingProvider for MapboxProvider {
    type Error = MapboxError;

    async fn routes(
        &self,
        source: Coordinate,
        destination: Coordinate,
        _mode_param: &str,
    ) -> Result<Vec<RouteCandidate>, Self::Error> {
        let url = format!(
            "{}/{},{};{},{}",
            self.base_url, source.lon, source.lat, destination.lon, destination.lat
        );

        let resp = self
            .http
            .get(url)
            .query(&[
                ("steps", "true"),
                ("geometries", "geojson"),
                ("alternatives", "true"),
                ("waypoints_per_route", "true"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(MapboxError::ServerError(resp.status()));
        }

        let body: WireResponse = resp.json().await?;
        if body.routes.is_empty() {
            return Err(MapboxError::Empty);
        }

        Ok(body.routes.into_iter().map(to_candidate).collect())
    }
}
