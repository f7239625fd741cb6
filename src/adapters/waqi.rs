//! WAQI-like air quality provider: direct PM2.5 lookup by point.

use super::AirQuality;
use crate::types::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const AQI_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum WaqiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("response status was not \"ok\": {0}")]
    BadStatus(String),
    #[error("response contained no pm25 reading")]
    MissingPm25,
}

#[derive(Debug, Deserialize)]
struct IaqiEntry {
    v: f64,
}

#[derive(Debug, Deserialize)]
struct AqiData {
    iaqi: std::collections::HashMap<String, IaqiEntry>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    status: String,
    data: AqiData,
}

/// Direct PM2.5 lookup at a point, used whenever `delay_code == 0`.
pub struct WaqiClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl WaqiClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_base_url("https://api.waqi.info/feed/geo:", api_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(AQI_TIMEOUT)
            .build()
            .expect("failed to build WAQI HTTP client");
        Self { http, base_url: base_url.into(), api_token: api_token.into() }
    }
}

#[async_trait]
impl AirQuality for WaqiClient {
    type Error = WaqiError;

    async fn pm25_at(&self, coordinate: Coordinate) -> Result<f64, Self::Error> {
        let url = format!("{}{};{}/", self.base_url, coordinate.lat, coordinate.lon);

        let resp = self.http.get(url).query(&[("token", &self.api_token)]).send().await?;
        if !resp.status().is_success() {
            return Err(WaqiError::ServerError(resp.status()));
        }

        let body: WireResponse = resp.json().await?;
        if body.status != "ok" {
            return Err(WaqiError::BadStatus(body.status));
        }

        body.data
            .iaqi
            .get("pm25")
            .map(|entry| entry.v)
            .ok_or(WaqiError::MissingPm25)
    }
}
