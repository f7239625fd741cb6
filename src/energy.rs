//! Per-segment energy estimation (§4.E).
//!
//! Two selectable models share the same potential + kinetic energy sum and
//! differ only in how that sum is turned into a final scalar: `Simple`
//! multiplies by an emission factor (the shipped model), `Physical` adds
//! rolling resistance and drag terms and divides by an engine/condition
//! efficiency instead.

use crate::types::{Condition, Coordinate, EngineType, NormalizedSegment};

const GRAVITY: f64 = 9.8;

/// Selects which of the two energy models `estimate_energy` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyModel {
    #[default]
    Simple,
    Physical,
}

/// Engine/condition factors for the `Simple` model, and efficiencies for the
/// `Physical` model. Defaults match the upstream service; each field is
/// independently overridable (see `config::CoreConfig`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyFactors {
    pub emission_petrol: f64,
    pub emission_diesel: f64,
    pub emission_cng: f64,
    pub emission_ev: f64,
    pub condition_new: f64,
    pub condition_good: f64,
    pub condition_average: f64,
    pub condition_okay: f64,
    pub efficiency_petrol: f64,
    pub efficiency_diesel: f64,
    pub efficiency_cng: f64,
    pub efficiency_ev: f64,
    pub condition_efficiency_new: f64,
    pub condition_efficiency_good: f64,
    pub condition_efficiency_average: f64,
    pub condition_efficiency_okay: f64,
}

impl Default for EnergyFactors {
    fn default() -> Self {
        Self {
            emission_petrol: 0.069,
            emission_diesel: 0.074,
            emission_cng: 0.056,
            emission_ev: 0.0,
            condition_new: 1.0,
            condition_good: 1.1,
            condition_average: 1.25,
            condition_okay: 1.5,
            efficiency_petrol: 0.25,
            efficiency_diesel: 0.30,
            efficiency_cng: 0.28,
            efficiency_ev: 0.85,
            condition_efficiency_new: 1.0,
            condition_efficiency_good: 0.95,
            condition_efficiency_average: 0.90,
            condition_efficiency_okay: 0.80,
        }
    }
}

impl EnergyFactors {
    fn emission_factor(&self, engine: EngineType, condition: Condition) -> f64 {
        let engine_factor = match engine {
            EngineType::Petrol => self.emission_petrol,
            EngineType::Diesel => self.emission_diesel,
            EngineType::Cng => self.emission_cng,
            EngineType::Ev => self.emission_ev,
        };
        let condition_factor = match condition {
            Condition::New => self.condition_new,
            Condition::Good => self.condition_good,
            Condition::Average => self.condition_average,
            Condition::Okay => self.condition_okay,
        };
        engine_factor * condition_factor
    }

    fn efficiency(&self, engine: EngineType, condition: Condition) -> f64 {
        let engine_efficiency = match engine {
            EngineType::Petrol => self.efficiency_petrol,
            EngineType::Diesel => self.efficiency_diesel,
            EngineType::Cng => self.efficiency_cng,
            EngineType::Ev => self.efficiency_ev,
        };
        let condition_efficiency = match condition {
            Condition::New => self.condition_efficiency_new,
            Condition::Good => self.condition_efficiency_good,
            Condition::Average => self.condition_efficiency_average,
            Condition::Okay => self.condition_efficiency_okay,
        };
        engine_efficiency * condition_efficiency
    }
}

const ROLLING_RESISTANCE_COEFFICIENT: f64 = 0.01;
const AIR_DENSITY: f64 = 1.225;
const DRAG_COEFFICIENT: f64 = 0.3;
const FRONTAL_AREA_M2: f64 = 2.0;

/// One segment's endpoint altitudes, distance and duration, resolved from
/// either `NormalizedSegment` shape. `Interval` segments look their
/// altitudes up in the candidate's shared coordinate list; `OwnGeometry`
/// segments use their own first/last coordinate.
fn segment_physics(segment: &NormalizedSegment, shared_coordinates: &[Coordinate]) -> Option<(f64, f64, f64)> {
    let distance_m = segment.distance_m();
    let duration_s = segment.duration_s();
    if distance_m == 0.0 && duration_s == 0.0 {
        return None;
    }

    let height_gain = match segment {
        NormalizedSegment::OwnGeometry { coordinates, .. } => {
            let start = coordinates.first()?.alt.unwrap_or(0.0);
            let end = coordinates.last()?.alt.unwrap_or(0.0);
            end - start
        }
        NormalizedSegment::Interval { start_idx, end_idx, .. } => {
            let start = shared_coordinates.get(*start_idx)?.alt.unwrap_or(0.0);
            let end = shared_coordinates.get(*end_idx)?.alt.unwrap_or(0.0);
            end - start
        }
    };

    Some((distance_m, duration_s, height_gain))
}

/// Sums potential + kinetic (+ rolling + drag, for `Physical`) energy across
/// `segments`, then applies the model's scaling factor.
///
/// `shared_coordinates` is only consulted for `Interval`-shaped segments;
/// pass an empty slice when every segment is `OwnGeometry`.
pub fn estimate_energy(
    model: EnergyModel,
    segments: &[NormalizedSegment],
    shared_coordinates: &[Coordinate],
    mass_kg: f64,
    condition: Condition,
    engine_type: EngineType,
    factors: &EnergyFactors,
) -> f64 {
    let mut total_joules = 0.0;

    for segment in segments {
        let Some((distance_m, duration_s, height_gain)) = segment_physics(segment, shared_coordinates) else {
            continue;
        };
        let average_velocity = distance_m / duration_s;

        let potential = mass_kg * GRAVITY * height_gain;
        let kinetic = 0.5 * mass_kg * average_velocity * average_velocity;
        total_joules += potential + kinetic;

        if model == EnergyModel::Physical {
            let rolling = ROLLING_RESISTANCE_COEFFICIENT * mass_kg * GRAVITY * distance_m;
            let drag = 0.5 * AIR_DENSITY * DRAG_COEFFICIENT * FRONTAL_AREA_M2 * average_velocity * average_velocity * distance_m;
            total_joules += rolling + drag;
        }
    }

    let total_kj = total_joules / 1000.0;

    match model {
        EnergyModel::Simple => total_kj * factors.emission_factor(engine_type, condition),
        EnergyModel::Physical => total_kj / factors.efficiency(engine_type, condition),
    }
}
