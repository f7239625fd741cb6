//! Drives the per-request pipeline: routing → (alignment) → sampling →
//! exposure/energy → selection (§4.H).

use crate::adapters::RoutingProvider;
use crate::alignment::{align_car_candidates, AlignedPair};
use crate::config::Dependencies;
use crate::energy::estimate_energy;
use crate::error::{CoreError, Diagnostics};
use crate::exposure::integrate_exposure;
use crate::sampler::{sample, sample_with_shared_coordinates};
use crate::selector;
use crate::types::{Mode, Preference, RouteCandidate, RouteRequest};
use futures::future::try_join_all;
use std::collections::BTreeMap;

/// Drives the pipeline for one request, holding a borrowed reference to the
/// wired-up adapters and configuration.
pub struct Orchestrator<'a> {
    deps: &'a Dependencies,
}

impl<'a> Orchestrator<'a> {
    pub fn new(deps: &'a Dependencies) -> Self {
        Self { deps }
    }

    /// Selects the winning candidate for `request.preference`.
    pub async fn select_one(&self, request: &RouteRequest) -> Result<(RouteCandidate, Diagnostics), CoreError> {
        let (candidates, diagnostics) = self.score_candidates(request).await?;
        let winner = selector::select(request.preference, &candidates)
            .cloned()
            .ok_or_else(|| CoreError::NotFound("no route candidates survived scoring".into()))?;
        Ok((winner, diagnostics))
    }

    /// Runs every preference's selector over the same scored candidate set.
    pub async fn select_all(
        &self,
        request: &RouteRequest,
    ) -> Result<(BTreeMap<Preference, RouteCandidate>, Diagnostics), CoreError> {
        let (candidates, diagnostics) = self.score_candidates(request).await?;
        let mut winners = BTreeMap::new();
        for preference in Preference::ALL {
            if let Some(winner) = selector::select(preference, &candidates) {
                winners.insert(preference, winner.clone());
            }
        }
        if winners.is_empty() {
            return Err(CoreError::NotFound("no route candidates survived scoring".into()));
        }
        Ok((winners, diagnostics))
    }

    fn uses_dual_provider_path(request: &RouteRequest) -> bool {
        request.mode == Mode::Car && matches!(request.preference, Preference::Fastest | Preference::Balanced)
    }

    async fn score_candidates(&self, request: &RouteRequest) -> Result<(Vec<RouteCandidate>, Diagnostics), CoreError> {
        if Self::uses_dual_provider_path(request) {
            self.score_dual_provider(request).await
        } else {
            self.score_single_provider(request).await
        }
    }

    async fn score_single_provider(&self, request: &RouteRequest) -> Result<(Vec<RouteCandidate>, Diagnostics), CoreError> {
        let mode_param = request.mode.to_string();
        let candidates = self
            .deps
            .graphhopper
            .routes(request.source, request.destination, &mode_param)
            .await
            .map_err(|e| CoreError::Provider { provider: "graphhopper", status: None, message: e.to_string() })?;

        let scored = try_join_all(candidates.into_iter().map(|candidate| self.score_single_candidate(candidate, request)))
            .await?;

        let mut diagnostics = Diagnostics::default();
        let mut results = Vec::with_capacity(scored.len());
        for (candidate, diag) in scored {
            diagnostics.warnings.extend(diag.warnings);
            results.push(candidate);
        }
        Ok((results, diagnostics))
    }

    async fn score_single_candidate(
        &self,
        mut candidate: RouteCandidate,
        request: &RouteRequest,
    ) -> Result<(RouteCandidate, Diagnostics), CoreError> {
        let samples = sample_with_shared_coordinates(&candidate.segments, &candidate.coordinates);
        let (exposure, diagnostics) = integrate_exposure(
            &samples,
            request.delay_code,
            &self.deps.waqi,
            &self.deps.openweather,
            &self.deps.predictor,
        )
        .await?;

        let energy = estimate_energy(
            self.deps.config.energy_model,
            &candidate.segments,
            &candidate.coordinates,
            request.effective_mass(),
            request.condition,
            request.engine_type,
            &self.deps.config.energy_factors,
        );

        candidate.total_exposure = exposure;
        candidate.total_energy = energy;
        Ok((candidate, diagnostics))
    }

    async fn score_dual_provider(&self, request: &RouteRequest) -> Result<(Vec<RouteCandidate>, Diagnostics), CoreError> {
        let timing = self
            .deps
            .mapbox
            .routes(request.source, request.destination, "driving-traffic")
            .await
            .map_err(|e| CoreError::Provider { provider: "mapbox", status: None, message: e.to_string() })?;

        let elevation = self
            .deps
            .graphhopper
            .routes(request.source, request.destination, "car")
            .await
            .map_err(|e| CoreError::Provider { provider: "graphhopper", status: None, message: e.to_string() })?;

        let pairs = align_car_candidates(timing, elevation);
        if pairs.is_empty() {
            return Err(CoreError::NotFound("routing providers returned no alignable car candidates".into()));
        }

        let scored = try_join_all(pairs.into_iter().map(|pair| self.score_pair(pair, request))).await?;

        let mut diagnostics = Diagnostics::default();
        let mut results = Vec::with_capacity(scored.len());
        for (candidate, diag) in scored {
            diagnostics.warnings.extend(diag.warnings);
            results.push(candidate);
        }
        Ok((results, diagnostics))
    }

    async fn score_pair(
        &self,
        mut pair: AlignedPair,
        request: &RouteRequest,
    ) -> Result<(RouteCandidate, Diagnostics), CoreError> {
        let samples = sample(&pair.timing.segments);
        let (exposure, diagnostics) = integrate_exposure(
            &samples,
            request.delay_code,
            &self.deps.waqi,
            &self.deps.openweather,
            &self.deps.predictor,
        )
        .await?;

        let energy = estimate_energy(
            self.deps.config.energy_model,
            &pair.elevation.segments,
            &pair.elevation.coordinates,
            request.effective_mass(),
            request.condition,
            request.engine_type,
            &self.deps.config.energy_factors,
        );

        pair.mirror_scores(exposure, energy);
        Ok((pair.timing, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dual_provider_path_only_for_car_fastest_or_balanced() {
        let mut request = RouteRequest {
            source: crate::types::Coordinate::new(0.0, 0.0),
            destination: crate::types::Coordinate::new(1.0, 1.0),
            mode: Mode::Car,
            delay_code: crate::types::DelayCode::NOW,
            vehicle_mass: 0.0,
            condition: crate::types::Condition::Average,
            engine_type: crate::types::EngineType::Petrol,
            preference: Preference::Fastest,
        };
        assert!(Orchestrator::uses_dual_provider_path(&request));

        request.preference = Preference::Balanced;
        assert!(Orchestrator::uses_dual_provider_path(&request));

        request.preference = Preference::Shortest;
        assert!(!Orchestrator::uses_dual_provider_path(&request));

        request.mode = Mode::Truck;
        request.preference = Preference::Fastest;
        assert!(!Orchestrator::uses_dual_provider_path(&request));
    }
}
