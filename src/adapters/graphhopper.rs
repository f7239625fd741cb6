//! GraphHopper-like routing provider: elevation/instructions source, and the
//! sole provider for non-car modes.

use super::RoutingProvider;
use crate::types::{Coordinate, NormalizedSegment, RouteCandidate};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const ROUTING_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum GraphhopperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("response contained no paths")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct Points {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct Instruction {
    distance: f64,
    time: u64,
    interval: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct Path {
    distance: f64,
    time: u64,
    points: Points,
    instructions: Vec<Instruction>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    paths: Vec<Path>,
}

fn to_candidate(path: Path) -> RouteCandidate {
    let coordinates: Vec<Coordinate> = path
        .points
        .coordinates
        .iter()
        .map(|c| Coordinate { lon: c[0], lat: c[1], alt: c.get(2).copied() })
        .collect();

    let segments = path
        .instructions
        .into_iter()
        .filter_map(|step| {
            let start_idx = *step.interval.first()?;
            let end_idx = *step.interval.get(1)?;
            Some(NormalizedSegment::Interval {
                distance_m: step.distance,
                time_ms: step.time,
                start_idx,
                end_idx,
            })
        })
        .collect();

    RouteCandidate::new(coordinates, segments, path.distance, path.time as f64 / 1000.0)
}

/// Elevation/instructions provider, used for every mode's scoring and as
/// the sole provider for `shortest`/`leap`/`emission`/non-car `fastest`.
pub struct GraphhopperProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GraphhopperProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url("https://graphhopper.com/api/1/route", api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(ROUTING_TIMEOUT)
            .build()
            .expect("failed to build GraphHopper HTTP client");
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }
}

#[async_trait]
impl RoutingProvider for GraphhopperProvider {
    type Error = GraphhopperError;

    async fn routes(
        &self,
        source: Coordinate,
        destination: Coordinate,
        mode_param: &str,
    ) -> Result<Vec<RouteCandidate>, Self::Error> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("point", format!("{},{}", source.lat, source.lon)),
                ("point", format!("{},{}", destination.lat, destination.lon)),
                ("vehicle", mode_param.to_string()),
                ("key", self.api_key.clone()),
                ("type", "json".to_string()),
                ("points_encoded", "false".to_string()),
                ("algorithm", "alternative_route".to_string()),
                ("alternative_route.max_paths", "4".to_string()),
                ("alternative_route.max_weight_factor", "1.4".to_string()),
                ("alternative_route.max_share_factor", "0.6".to_string()),
                ("elevation", "true".to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GraphhopperError::ServerError(resp.status()));
        }

        let body: WireResponse = resp.json().await?;
        if body.paths.is_empty() {
            return Err(GraphhopperError::Empty);
        }

        Ok(body.paths.into_iter().map(to_candidate).collect())
    }
}
