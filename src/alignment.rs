//! Car-mode dual-provider route alignment (§4.G).
//!
//! Car mode (for `fastest`/`balanced` preferences) draws geometry and timing
//! from one provider and elevation/instructions from another. Their
//! candidate lists are not returned in matching order, so they are aligned
//! by sorting both ascending by distance and zipping positionally.

use crate::types::RouteCandidate;

/// A timing/geometry candidate paired with its elevation/instructions
/// counterpart, after alignment. `total_exposure`/`total_energy` are
/// mirrored onto both sides so either can be read back with a complete score.
pub struct AlignedPair {
    pub timing: RouteCandidate,
    pub elevation: RouteCandidate,
}

impl AlignedPair {
    /// Copies exposure (computed against `timing`'s sampling) and energy
    /// (computed against `elevation`'s segments) onto both candidates.
    pub fn mirror_scores(&mut self, total_exposure: f64, total_energy: f64) {
        self.timing.total_exposure = total_exposure;
        self.timing.total_energy = total_energy;
        self.elevation.total_exposure = total_exposure;
        self.elevation.total_energy = total_energy;
    }
}

/// Sorts both candidate lists ascending by distance and zips them
/// positionally, truncating to the shorter list.
///
/// Returns an empty vector if either list is empty — the caller maps that
/// to `CoreError::NotFound`.
pub fn align_car_candidates(
    mut timing: Vec<RouteCandidate>,
    mut elevation: Vec<RouteCandidate>,
) -> Vec<AlignedPair> {
    if timing.is_empty() || elevation.is_empty() {
        return Vec::new();
    }

    timing.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    elevation.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    let n = timing.len().min(elevation.len());
    timing
        .into_iter()
        .take(n)
        .zip(elevation.into_iter().take(n))
        .map(|(timing, elevation)| AlignedPair { timing, elevation })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn candidate(distance_m: f64) -> RouteCandidate {
        RouteCandidate {
            coordinates: vec![Coordinate::new(0.0, 0.0)],
            segments: Vec::new(),
            distance_m,
            duration_s: 0.0,
            total_exposure: 0.0,
            total_energy: 0.0,
        }
    }

    #[test]
    fn empty_either_side_yields_no_pairs() {
        assert!(align_car_candidates(vec![], vec![candidate(1.0)]).is_empty());
        assert!(align_car_candidates(vec![candidate(1.0)], vec![]).is_empty());
    }

    #[test]
    fn pairs_are_sorted_and_zipped_by_distance() {
        let timing = vec![candidate(5000.0), candidate(1000.0), candidate(3000.0)];
        let elevation = vec![candidate(2000.0), candidate(4000.0)];
        let pairs = align_car_candidates(timing, elevation);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].timing.distance_m, 1000.0);
        assert_eq!(pairs[0].elevation.distance_m, 2000.0);
        assert_eq!(pairs[1].timing.distance_m, 3000.0);
        assert_eq!(pairs[1].elevation.distance_m, 4000.0);
    }

    #[test]
    fn mirror_scores_copies_onto_both_sides() {
        let mut pair = AlignedPair { timing: candidate(1.0), elevation: candidate(2.0) };
        pair.mirror_scores(12.5, 99.0);
        assert_eq!(pair.timing.total_exposure, 12.5);
        assert_eq!(pair.elevation.total_exposure, 12.5);
        assert_eq!(pair.timing.total_energy, 99.0);
        assert_eq!(pair.elevation.total_energy, 99.0);
    }
}
