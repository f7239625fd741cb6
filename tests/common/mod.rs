//! Shared mock-backend wiring for the integration tests in this directory.
//!
//! Each external service gets its own `mockito` server so adapters can be
//! pointed at a real (loopback) HTTP endpoint rather than faked at the
//! trait level — `Dependencies` holds concrete adapter types, not trait
//! objects, so the integration boundary is HTTP, same as production.

use clean_route_core::adapters::{GraphhopperProvider, MapboxProvider, OpenWeatherClient, PredictorClient, WaqiClient};
use clean_route_core::energy::{EnergyFactors, EnergyModel};
use clean_route_core::{CoreConfig, Dependencies};

pub struct MockBackends {
    pub graphhopper: mockito::ServerGuard,
    pub mapbox: mockito::ServerGuard,
    pub waqi: mockito::ServerGuard,
    pub weather: mockito::ServerGuard,
    pub predictor: mockito::ServerGuard,
}

impl MockBackends {
    pub async fn new() -> Self {
        Self {
            graphhopper: mockito::Server::new_async().await,
            mapbox: mockito::Server::new_async().await,
            waqi: mockito::Server::new_async().await,
            weather: mockito::Server::new_async().await,
            predictor: mockito::Server::new_async().await,
        }
    }

    /// Builds `Dependencies` pointed at this harness's mock servers instead
    /// of the real Mapbox/GraphHopper/WAQI/OpenWeather/predictor endpoints.
    pub fn dependencies(&self) -> Dependencies {
        let predictor_endpoint = format!("{}/predict/pm25", self.predictor.url());
        let config = CoreConfig {
            mapbox_api_key: "test-mapbox-key".into(),
            graphhopper_api_key: "test-graphhopper-key".into(),
            waqi_api_token: "test-waqi-token".into(),
            openweather_api_key: "test-openweather-key".into(),
            predictor_endpoint: predictor_endpoint.clone(),
            energy_model: EnergyModel::Simple,
            energy_factors: EnergyFactors::default(),
        };
        Dependencies {
            mapbox: MapboxProvider::with_base_url(self.mapbox.url(), "test-mapbox-key"),
            graphhopper: GraphhopperProvider::with_base_url(self.graphhopper.url(), "test-graphhopper-key"),
            // WaqiClient concatenates `base_url` directly with `"{lat};{lon}/"`, matching the
            // real `.../feed/geo:` endpoint shape — the mock base needs the same trailing marker.
            waqi: WaqiClient::with_base_url(format!("{}/feed/geo:", self.waqi.url()), "test-waqi-token"),
            openweather: OpenWeatherClient::with_base_url(self.weather.url(), "test-openweather-key"),
            predictor: PredictorClient::new(predictor_endpoint),
            config,
        }
    }
}

/// Registers a 200 JSON response for every request to `server`, regardless
/// of path or query string.
pub async fn mock_json(server: &mut mockito::ServerGuard, method: &str, body: &serde_json::Value) -> mockito::Mock {
    server
        .mock(method, mockito::Matcher::Any)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Registers an error status for every request to `server`.
pub async fn mock_error(server: &mut mockito::ServerGuard, method: &str, status: usize) -> mockito::Mock {
    server
        .mock(method, mockito::Matcher::Any)
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .create_async()
        .await
}

/// One GraphHopper `paths[]` entry: `distance` in meters, `time` in
/// milliseconds, a flat coordinate/alt list, and a single instruction
/// spanning the whole path.
pub fn graphhopper_path(distance_m: f64, time_ms: u64, coords: &[(f64, f64, f64)]) -> serde_json::Value {
    let last_idx = coords.len() - 1;
    serde_json::json!({
        "distance": distance_m,
        "time": time_ms,
        "points": { "coordinates": coords.iter().map(|(lon, lat, alt)| vec![*lon, *lat, *alt]).collect::<Vec<_>>() },
        "instructions": [ { "distance": distance_m, "time": time_ms, "interval": [0, last_idx] } ],
    })
}

pub fn graphhopper_response(paths: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "paths": paths })
}

/// One Mapbox `routes[]` entry: a single leg with a single step spanning
/// the whole geometry.
pub fn mapbox_route(distance_m: f64, duration_s: f64, coords: &[(f64, f64)]) -> serde_json::Value {
    let geometry = serde_json::json!({
        "coordinates": coords.iter().map(|(lon, lat)| vec![*lon, *lat]).collect::<Vec<_>>(),
    });
    serde_json::json!({
        "distance": distance_m,
        "duration": duration_s,
        "geometry": geometry.clone(),
        "legs": [ { "steps": [ { "duration": duration_s, "distance": distance_m, "geometry": geometry } ] } ],
    })
}

pub fn mapbox_response(routes: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "routes": routes })
}

pub fn waqi_response(pm25: f64) -> serde_json::Value {
    serde_json::json!({ "status": "ok", "data": { "iaqi": { "pm25": { "v": pm25 } } } })
}

pub fn weather_response(temp_c: f64, hourly_count: usize) -> serde_json::Value {
    let reading = serde_json::json!({
        "temp": temp_c,
        "dew_point": temp_c - 5.0,
        "wind_deg": 120.0,
        "wind_speed": 3.0,
    });
    serde_json::json!({ "current": reading.clone(), "hourly": vec![reading; hourly_count] })
}
