//! OpenWeather-like provider: current + hourly forecast at a point.

use super::Weather;
use crate::types::Coordinate;
use crate::weather::{WeatherObservation, WeatherReading};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum OpenWeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temp: f64,
    dew_point: f64,
    wind_deg: f64,
    wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    temp: f64,
    dew_point: f64,
    wind_deg: f64,
    wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    current: CurrentWeather,
    hourly: Vec<HourlyData>,
}

impl From<CurrentWeather> for WeatherReading {
    fn from(c: CurrentWeather) -> Self {
        WeatherReading { temp_c: c.temp, dew_point_c: c.dew_point, wind_deg: c.wind_deg, wind_speed: c.wind_speed }
    }
}

impl From<HourlyData> for WeatherReading {
    fn from(h: HourlyData) -> Self {
        WeatherReading { temp_c: h.temp, dew_point_c: h.dew_point, wind_deg: h.wind_deg, wind_speed: h.wind_speed }
    }
}

/// Weather provider used to build the PM2.5 predictor's feature vector.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url("https://api.openweathermap.org/data/3.0/onecall", api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(WEATHER_TIMEOUT)
            .build()
            .expect("failed to build OpenWeather HTTP client");
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }
}

#[async_trait]
impl Weather for OpenWeatherClient {
    type Error = OpenWeatherError;

    async fn observe(&self, coordinate: Coordinate) -> Result<WeatherObservation, Self::Error> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lon.to_string()),
                ("exclude", "minutely,daily,alerts".to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(OpenWeatherError::ServerError(resp.status()));
        }

        let body: WireResponse = resp.json().await?;
        Ok(WeatherObservation {
            current: body.current.into(),
            hourly: body.hourly.into_iter().map(Into::into).collect(),
        })
    }
}
