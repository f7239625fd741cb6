//! Core error taxonomy and non-fatal diagnostics (§4.K, §7).

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Errors that abort a request outright. Adapter-level errors (see
/// `adapters::*Error`) are folded into `Provider` at the orchestrator
/// boundary, carrying enough context to diagnose which upstream failed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{provider} returned an error (status {status:?}): {message}")]
    Provider {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Provider { .. } => StatusCode::BAD_GATEWAY,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Provider { .. } => "PROVIDER_ERROR",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

/// Non-fatal warnings accumulated alongside a successful result — e.g. some
/// sample points along a route could not be scored. Never raised as an
/// error; the orchestrator attaches these to the response instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
