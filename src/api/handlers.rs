//! Request/response handlers for the HTTP surface.

use super::AppState;
use crate::adapters::{AirQuality, Weather};
use crate::error::CoreError;
use crate::orchestrator::Orchestrator;
use crate::types::{Condition, Coordinate, DelayCode, EngineType, Mode, Preference, RouteCandidate, RouteRequest};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire shape for `POST /route` and `/all-routes`. `mode` accepts the
/// external vocabulary (including `driving-traffic`) via `Mode::parse`.
#[derive(Debug, Deserialize)]
pub struct RouteRequestDto {
    pub source: [f64; 2],
    pub destination: [f64; 2],
    pub mode: String,
    #[serde(default)]
    pub delay_code: u8,
    #[serde(default)]
    pub vehicle_mass: f64,
    pub condition: Condition,
    pub engine_type: EngineType,
    pub preference: Preference,
}

impl TryFrom<RouteRequestDto> for RouteRequest {
    type Error = CoreError;

    fn try_from(dto: RouteRequestDto) -> Result<Self, Self::Error> {
        let mode = Mode::parse(&dto.mode)
            .ok_or_else(|| CoreError::Validation(format!("unknown mode: {}", dto.mode)))?;
        Ok(RouteRequest {
            source: Coordinate::new(dto.source[0], dto.source[1]),
            destination: Coordinate::new(dto.destination[0], dto.destination[1]),
            mode,
            delay_code: DelayCode(dto.delay_code),
            vehicle_mass: dto.vehicle_mass,
            condition: dto.condition,
            engine_type: dto.engine_type,
            preference: dto.preference,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub candidate: RouteCandidate,
    pub warnings: Vec<String>,
}

pub async fn select_one(
    State(state): State<AppState>,
    Json(dto): Json<RouteRequestDto>,
) -> Result<Json<RouteResponse>, CoreError> {
    let request = RouteRequest::try_from(dto)?;
    let orchestrator = Orchestrator::new(&state);
    let (candidate, diagnostics) = orchestrator.select_one(&request).await?;
    Ok(Json(RouteResponse { candidate, warnings: diagnostics.warnings }))
}

#[derive(Debug, Serialize)]
pub struct AllRoutesResponse {
    pub candidates: BTreeMap<Preference, RouteCandidate>,
    pub warnings: Vec<String>,
}

pub async fn select_all(
    State(state): State<AppState>,
    Json(dto): Json<RouteRequestDto>,
) -> Result<Json<AllRoutesResponse>, CoreError> {
    let request = RouteRequest::try_from(dto)?;
    let orchestrator = Orchestrator::new(&state);
    let (candidates, diagnostics) = orchestrator.select_all(&request).await?;
    Ok(Json(AllRoutesResponse { candidates, warnings: diagnostics.warnings }))
}

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lon: f64,
}

pub async fn weather(
    State(state): State<AppState>,
    Query(point): Query<PointQuery>,
) -> Result<Json<crate::weather::WeatherObservation>, CoreError> {
    let observation = state
        .openweather
        .observe(Coordinate::new(point.lon, point.lat))
        .await
        .map_err(|e| CoreError::Provider { provider: "openweather", status: None, message: e.to_string() })?;
    Ok(Json(observation))
}

#[derive(Debug, Serialize)]
pub struct AqiResponse {
    pub pm25: f64,
}

pub async fn aqi(
    State(state): State<AppState>,
    Query(point): Query<PointQuery>,
) -> Result<Json<AqiResponse>, CoreError> {
    let pm25 = state
        .waqi
        .pm25_at(Coordinate::new(point.lon, point.lat))
        .await
        .map_err(|e| CoreError::Provider { provider: "waqi", status: None, message: e.to_string() })?;
    Ok(Json(AqiResponse { pm25 }))
}

pub async fn predict_pm25(
    State(state): State<AppState>,
    Json(features): Json<Vec<crate::types::FeatureVector>>,
) -> Result<Json<Vec<f64>>, CoreError> {
    use crate::adapters::PM25Predictor;
    let predictions = state
        .predictor
        .predict(&features)
        .await
        .map_err(|e| CoreError::Provider { provider: "predictor", status: None, message: e.to_string() })?;
    Ok(Json(predictions))
}
