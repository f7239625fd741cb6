//! clean-route-core: pollution-aware multi-criteria route scoring and
//! selection.
//!
//! Routing candidates come from external providers (GraphHopper, and Mapbox
//! for the dual-provider car path); this crate enriches each candidate with
//! PM2.5 exposure and traction-energy scores, then selects per the caller's
//! preference. See `orchestrator::Orchestrator` for the pipeline entry point.

pub mod adapters;
pub mod alignment;
pub mod api;
pub mod config;
pub mod energy;
pub mod error;
pub mod exposure;
pub mod geo;
pub mod orchestrator;
pub mod sampler;
pub mod selector;
pub mod types;
pub mod weather;

pub use config::{CoreConfig, Dependencies};
pub use error::{CoreError, Diagnostics};
pub use orchestrator::Orchestrator;
pub use types::{
    Condition, Coordinate, DelayCode, EngineType, Mode, NormalizedSegment, Preference,
    RouteCandidate, RouteRequest,
};
