//! SageMaker-like PM2.5 predictor: one batch call per delayed-exposure route.

use super::PM25Predictor;
use crate::types::FeatureVector;
use async_trait::async_trait;
use std::time::Duration;

const PREDICTION_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    ServerError(reqwest::StatusCode),
    #[error("deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("predictor returned {got} values for {expected} inputs")]
    LengthMismatch { expected: usize, got: usize },
}

/// Predicts PM2.5 for a whole route's sample points in one request, matching
/// the upstream batch-predict contract: one feature vector per sample,
/// predictions returned in the same order.
pub struct PredictorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictorClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(PREDICTION_TIMEOUT)
            .build()
            .expect("failed to build predictor HTTP client");
        Self { http, endpoint: endpoint.into() }
    }
}

#[async_trait]
impl PM25Predictor for PredictorClient {
    type Error = PredictorError;

    async fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f64>, Self::Error> {
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self.http.post(&self.endpoint).json(features).send().await?;
        if !resp.status().is_success() {
            return Err(PredictorError::ServerError(resp.status()));
        }

        let predictions: Vec<f64> = resp.json().await?;
        if predictions.len() != features.len() {
            return Err(PredictorError::LengthMismatch { expected: features.len(), got: predictions.len() });
        }

        Ok(predictions)
    }
}
