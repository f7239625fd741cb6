//! Thin Axum HTTP surface around the core pipeline (§4.L).
//!
//! The router exists to invoke the core, not to reimplement it: every
//! handler is a few lines of request parsing plus a call into
//! `orchestrator`/`adapters`.

mod handlers;

use crate::config::Dependencies;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state: the wired-up adapters and configuration.
pub type AppState = Arc<Dependencies>;

/// Builds the full application router.
pub fn create_app(deps: Dependencies) -> Router {
    let state: AppState = Arc::new(deps);

    Router::new()
        .route("/route", post(handlers::select_one))
        .route("/all-routes", post(handlers::select_all))
        .route("/weather", get(handlers::weather))
        .route("/aqi", get(handlers::aqi))
        .route("/predict/pm25", post(handlers::predict_pm25))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
