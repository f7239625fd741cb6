//! External-service adapter traits (§4.I).
//!
//! Four small `async_trait` interfaces stand between the core and the
//! external routing/AQI/weather/prediction services. Each has exactly one
//! `reqwest`-backed implementation below; the traits exist so the
//! orchestrator and tests can swap in fakes without touching HTTP at all.

mod graphhopper;
mod mapbox;
mod openweather;
mod predictor;
mod waqi;

pub use graphhopper::{GraphhopperError, GraphhopperProvider};
pub use mapbox::{MapboxError, MapboxProvider};
pub use openweather::{OpenWeatherClient, OpenWeatherError};
pub use predictor::{PredictorClient, PredictorError};
pub use waqi::{WaqiClient, WaqiError};

use crate::types::{Coordinate, FeatureVector, RouteCandidate};
use crate::weather::WeatherObservation;
use async_trait::async_trait;

/// Finds alternative routes between two points for one provider's coverage
/// of a travel mode.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn routes(
        &self,
        source: Coordinate,
        destination: Coordinate,
        mode_param: &str,
    ) -> Result<Vec<RouteCandidate>, Self::Error>;
}

/// Fetches the current PM2.5 concentration (µg/m³) at a point.
#[async_trait]
pub trait AirQuality: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn pm25_at(&self, coordinate: Coordinate) -> Result<f64, Self::Error>;
}

/// Fetches current + hourly-forecast weather at a point.
#[async_trait]
pub trait Weather: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn observe(&self, coordinate: Coordinate) -> Result<WeatherObservation, Self::Error>;
}

/// Predicts PM2.5 concentration from a batch of feature vectors, in order.
#[async_trait]
pub trait PM25Predictor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>, Self::Error>;
}
