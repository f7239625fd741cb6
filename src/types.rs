//! Core data model for the route scoring and selection pipeline.
//!
//! - **RouteRequest**: the immutable per-call input (§3).
//! - **NormalizedSegment / RouteCandidate**: the provider-agnostic view the
//!   sampler and energy estimator consume.
//! - **SamplePoint / FeatureVector**: intermediate values produced by the
//!   sampler and weather-feature builder.
//! - **Preference / Mode**: the request vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(longitude, latitude)` pair, optionally with an altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat, alt: None }
    }

    pub fn with_alt(lon: f64, lat: f64, alt: f64) -> Self {
        Self { lon, lat, alt: Some(alt) }
    }
}

/// Travel mode, normalized. The wire alias `driving-traffic` is folded into
/// `Car` at the request-parsing boundary (see `RouteRequest::normalize_mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Car,
    Truck,
    Scooter,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Car => write!(f, "car"),
            Mode::Truck => write!(f, "truck"),
            Mode::Scooter => write!(f, "scooter"),
        }
    }
}

impl Mode {
    /// Parses the external mode vocabulary, folding `driving-traffic` into `Car`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "car" | "driving-traffic" => Some(Mode::Car),
            "truck" => Some(Mode::Truck),
            "scooter" => Some(Mode::Scooter),
            _ => None,
        }
    }
}

/// Vehicle condition, affecting both energy models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Good,
    Average,
    Okay,
}

/// Engine type, affecting both energy models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    Petrol,
    Diesel,
    Cng,
    Ev,
}

/// Scoring preference. `Leap` selects minimum exposure, `Emission` selects
/// minimum energy (names kept from the upstream service's vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Shortest,
    Fastest,
    Leap,
    Emission,
    Balanced,
}

impl Preference {
    pub const ALL: [Preference; 5] = [
        Preference::Shortest,
        Preference::Fastest,
        Preference::Leap,
        Preference::Emission,
        Preference::Balanced,
    ];
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Preference::Shortest => "shortest",
            Preference::Fastest => "fastest",
            Preference::Leap => "leap",
            Preference::Emission => "emission",
            Preference::Balanced => "balanced",
        };
        write!(f, "{s}")
    }
}

/// Delay code: 0 = now, 1..=6 selects an hourly forecast slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayCode(pub u8);

impl DelayCode {
    pub const NOW: DelayCode = DelayCode(0);

    pub fn is_now(self) -> bool {
        self.0 == 0
    }

    /// Valid slots are 1..=6; anything else (including 0) falls back to
    /// "use current conditions" in the weather-feature builder.
    pub fn forecast_slot(self) -> Option<usize> {
        if (1..=6).contains(&self.0) {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

/// The immutable, per-call request (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub source: Coordinate,
    pub destination: Coordinate,
    pub mode: Mode,
    pub delay_code: DelayCode,
    /// Vehicle mass in kg; 0 means "use the mode default" (see `geo::mass_for_mode`).
    pub vehicle_mass: f64,
    pub condition: Condition,
    pub engine_type: EngineType,
    pub preference: Preference,
}

impl RouteRequest {
    /// Resolves `vehicle_mass` against the mode default when unset.
    pub fn effective_mass(&self) -> f64 {
        if self.vehicle_mass > 0.0 {
            self.vehicle_mass
        } else {
            crate::geo::mass_for_mode(self.mode)
        }
    }
}

/// One contiguous maneuver along a candidate, normalized across the two
/// provider shapes so the sampler and energy estimator can stay
/// provider-agnostic (§9 "dual inheritance of candidate types").
#[derive(Debug, Clone)]
pub enum NormalizedSegment {
    /// The timing/geometry provider shape: the segment carries its own
    /// coordinate subarray and a duration in seconds.
    OwnGeometry {
        distance_m: f64,
        duration_s: f64,
        coordinates: Vec<Coordinate>,
    },
    /// The elevation/instructions provider shape: the segment indexes into
    /// the candidate's shared coordinate list.
    Interval {
        distance_m: f64,
        time_ms: u64,
        start_idx: usize,
        /// Exclusive end index, as in the upstream `[start, end)` convention.
        end_idx: usize,
    },
}

impl NormalizedSegment {
    pub fn distance_m(&self) -> f64 {
        match self {
            NormalizedSegment::OwnGeometry { distance_m, .. } => *distance_m,
            NormalizedSegment::Interval { distance_m, .. } => *distance_m,
        }
    }

    pub fn duration_s(&self) -> f64 {
        match self {
            NormalizedSegment::OwnGeometry { duration_s, .. } => *duration_s,
            NormalizedSegment::Interval { time_ms, .. } => *time_ms as f64 / 1000.0,
        }
    }
}

/// A `(coordinate, dwell_s)` pair taken from a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub coordinate: Coordinate,
    pub dwell_s: f64,
}

/// An alternative path returned by an external routing provider, enriched by
/// the exposure and energy stages before selection.
///
/// `coordinates`/`segments` are internal working state, skipped on the HTTP
/// surface — API responses only expose the summary fields.
#[derive(Debug, Clone, Serialize)]
pub struct RouteCandidate {
    #[serde(skip)]
    pub coordinates: Vec<Coordinate>,
    #[serde(skip)]
    pub segments: Vec<NormalizedSegment>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub total_exposure: f64,
    pub total_energy: f64,
}

impl RouteCandidate {
    pub fn new(coordinates: Vec<Coordinate>, segments: Vec<NormalizedSegment>, distance_m: f64, duration_s: f64) -> Self {
        Self {
            coordinates,
            segments,
            distance_m,
            duration_s,
            total_exposure: 0.0,
            total_energy: 0.0,
        }
    }
}

/// The nine-scalar feature vector consumed by the PM2.5 predictor (§3, §4.C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub itemp: f64,
    pub irh: f64,
    pub iwd: f64,
    pub iws: f64,
    pub ipm: f64,
    pub ftemp: f64,
    pub frh: f64,
    pub fwd: f64,
    pub fws: f64,
    pub delay_code: u8,
}
