//! Explicit configuration and dependency wiring (§4.J).
//!
//! Deliberately not a global singleton: `CoreConfig` is loaded once at
//! startup and threaded explicitly through `Dependencies` to every call
//! site, rather than read back out of a process-wide `OnceLock`.

use crate::adapters::{GraphhopperProvider, MapboxProvider, OpenWeatherClient, PredictorClient, WaqiClient};
use crate::energy::{EnergyFactors, EnergyModel};
use crate::error::CoreError;
use std::env;

/// Environment-sourced configuration: API credentials plus the tunable
/// energy constants (each independently overridable, matching the
/// upstream service's per-constant environment override).
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub mapbox_api_key: String,
    pub graphhopper_api_key: String,
    pub waqi_api_token: String,
    pub openweather_api_key: String,
    pub predictor_endpoint: String,
    pub energy_model: EnergyModel,
    pub energy_factors: EnergyFactors,
}

impl CoreConfig {
    /// Loads configuration from the environment.
    ///
    /// Required: `MAPBOX_API_KEY`, `GRAPHHOPPER_API_KEY`, `WAQI_API_KEY`,
    /// `OPEN_WEATHER_API_KEY`, `PREDICTOR_ENDPOINT`. Energy constants default
    /// to the values in `EnergyFactors::default()` and are overridden
    /// individually by `EMISSION_FACTOR_*`/`CONDITION_FACTOR_*`/
    /// `ENGINE_EFFICIENCY_*`/`CONDITION_EFFICIENCY_*` variables.
    pub fn from_env() -> Result<Self, CoreError> {
        let required = |key: &str| -> Result<String, CoreError> {
            env::var(key).map_err(|_| CoreError::Internal(format!("missing required environment variable: {key}")))
        };

        let mut factors = EnergyFactors::default();
        apply_env_override(&mut factors.emission_petrol, "EMISSION_FACTOR_PETROL");
        apply_env_override(&mut factors.emission_diesel, "EMISSION_FACTOR_DIESEL");
        apply_env_override(&mut factors.emission_cng, "EMISSION_FACTOR_CNG");
        apply_env_override(&mut factors.emission_ev, "EMISSION_FACTOR_EV");
        apply_env_override(&mut factors.condition_new, "CONDITION_FACTOR_NEW");
        apply_env_override(&mut factors.condition_good, "CONDITION_FACTOR_GOOD");
        apply_env_override(&mut factors.condition_average, "CONDITION_FACTOR_AVERAGE");
        apply_env_override(&mut factors.condition_okay, "CONDITION_FACTOR_OKAY");
        apply_env_override(&mut factors.efficiency_petrol, "ENGINE_EFFICIENCY_PETROL");
        apply_env_override(&mut factors.efficiency_diesel, "ENGINE_EFFICIENCY_DIESEL");
        apply_env_override(&mut factors.efficiency_cng, "ENGINE_EFFICIENCY_CNG");
        apply_env_override(&mut factors.efficiency_ev, "ENGINE_EFFICIENCY_EV");
        apply_env_override(&mut factors.condition_efficiency_new, "CONDITION_EFFICIENCY_NEW");
        apply_env_override(&mut factors.condition_efficiency_good, "CONDITION_EFFICIENCY_GOOD");
        apply_env_override(&mut factors.condition_efficiency_average, "CONDITION_EFFICIENCY_AVERAGE");
        apply_env_override(&mut factors.condition_efficiency_okay, "CONDITION_EFFICIENCY_OKAY");

        let energy_model = match env::var("ENERGY_MODEL").ok().as_deref() {
            Some("physical") => EnergyModel::Physical,
            _ => EnergyModel::Simple,
        };

        Ok(Self {
            mapbox_api_key: required("MAPBOX_API_KEY")?,
            graphhopper_api_key: required("GRAPHHOPPER_API_KEY")?,
            waqi_api_token: required("WAQI_API_KEY")?,
            openweather_api_key: required("OPEN_WEATHER_API_KEY")?,
            predictor_endpoint: required("PREDICTOR_ENDPOINT")?,
            energy_model,
            energy_factors: factors,
        })
    }
}

fn apply_env_override(slot: &mut f64, key: &str) {
    if let Ok(raw) = env::var(key) {
        if let Ok(parsed) = raw.parse::<f64>() {
            *slot = parsed;
        }
    }
}

/// Concrete adapters plus configuration, constructed once and passed by
/// reference to the orchestrator — the explicit replacement for the
/// teacher's `config::get()` global singleton pattern.
pub struct Dependencies {
    pub mapbox: MapboxProvider,
    pub graphhopper: GraphhopperProvider,
    pub waqi: WaqiClient,
    pub openweather: OpenWeatherClient,
    pub predictor: PredictorClient,
    pub config: CoreConfig,
}

impl Dependencies {
    pub fn from_config(config: CoreConfig) -> Self {
        Self {
            mapbox: MapboxProvider::new(config.mapbox_api_key.clone()),
            graphhopper: GraphhopperProvider::new(config.graphhopper_api_key.clone()),
            waqi: WaqiClient::new(config.waqi_api_token.clone()),
            openweather: OpenWeatherClient::new(config.openweather_api_key.clone()),
            predictor: PredictorClient::new(config.predictor_endpoint.clone()),
            config,
        }
    }
}
