//! Per-preference winner selection (§4.F).

use crate::types::{Preference, RouteCandidate};

/// Returns the index of the candidate minimizing `key`, first occurrence
/// wins ties. `None` if `candidates` is empty.
fn argmin(candidates: &[RouteCandidate], key: impl Fn(&RouteCandidate) -> f64) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .fold(None, |best, (i, c)| match best {
            None => Some(i),
            Some(b) if key(c) < key(&candidates[b]) => Some(i),
            Some(b) => Some(b),
        })
}

/// Minimizes a criterion, applying the zero-is-unknown degeneracy rule: a
/// candidate scoring exactly 0 is only eligible when *every* candidate
/// scores 0, otherwise zero-scoring candidates are excluded from
/// consideration (a fresh value of 0 usually means the stage never ran).
fn argmin_with_degenerate_zero(candidates: &[RouteCandidate], key: impl Fn(&RouteCandidate) -> f64) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let all_zero = candidates.iter().all(|c| key(c) == 0.0);
    if all_zero {
        return Some(0);
    }
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| key(c) != 0.0)
        .fold(None, |best, (i, c)| match best {
            None => Some(i),
            Some(b) if key(c) < key(&candidates[b]) => Some(i),
            Some(b) => Some(b),
        })
}

pub fn select_shortest(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    argmin(candidates, |c| c.distance_m).map(|i| &candidates[i])
}

pub fn select_fastest(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    argmin(candidates, |c| c.duration_s).map(|i| &candidates[i])
}

pub fn select_leap(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    argmin_with_degenerate_zero(candidates, |c| c.total_exposure).map(|i| &candidates[i])
}

pub fn select_emission(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    argmin_with_degenerate_zero(candidates, |c| c.total_energy).map(|i| &candidates[i])
}

/// Multi-criteria "balanced" selector.
///
/// - 0 candidates: `None`.
/// - 1: that candidate.
/// - 2: if the two are close in both duration (< 300s) and distance
///   (< 500m), prefer lesser exposure; otherwise prefer lesser duration.
/// - ≥ 3: sort all candidates ascending by exposure, stable-sort the first
///   three ascending by duration, sort the first two of *that* by energy,
///   return the new first. This does not reproduce the always-true
///   unsigned-difference comparison from the original two-candidate branch
///   (fixed here to use an absolute difference).
pub fn select_balanced(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    match candidates.len() {
        0 => None,
        1 => Some(&candidates[0]),
        2 => {
            let a = &candidates[0];
            let b = &candidates[1];
            let close = (a.duration_s - b.duration_s).abs() < 300.0 && (a.distance_m - b.distance_m).abs() < 500.0;
            if close {
                Some(if a.total_exposure < b.total_exposure { a } else { b })
            } else {
                Some(if a.duration_s < b.duration_s { a } else { b })
            }
        }
        _ => {
            let mut by_exposure: Vec<&RouteCandidate> = candidates.iter().collect();
            by_exposure.sort_by(|a, b| a.total_exposure.total_cmp(&b.total_exposure));

            let mut top_three: Vec<&RouteCandidate> = by_exposure.into_iter().take(3).collect();
            top_three.sort_by(|a, b| a.duration_s.total_cmp(&b.duration_s));

            let split = top_three.len().min(2);
            top_three[..split].sort_by(|a, b| a.total_energy.total_cmp(&b.total_energy));

            top_three.into_iter().next()
        }
    }
}

/// Dispatches to the selector matching `preference`.
pub fn select(preference: Preference, candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    match preference {
        Preference::Shortest => select_shortest(candidates),
        Preference::Fastest => select_fastest(candidates),
        Preference::Leap => select_leap(candidates),
        Preference::Emission => select_emission(candidates),
        Preference::Balanced => select_balanced(candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn candidate(distance_m: f64, duration_s: f64, total_exposure: f64, total_energy: f64) -> RouteCandidate {
        RouteCandidate {
            coordinates: vec![Coordinate::new(0.0, 0.0)],
            segments: Vec::new(),
            distance_m,
            duration_s,
            total_exposure,
            total_energy,
        }
    }

    #[test]
    fn select_shortest_picks_min_distance() {
        let candidates = vec![candidate(5000.0, 300.0, 1.0, 1.0), candidate(3000.0, 400.0, 1.0, 1.0)];
        assert_eq!(select_shortest(&candidates).unwrap().distance_m, 3000.0);
    }

    #[test]
    fn leap_excludes_zero_unless_all_zero() {
        let candidates = vec![candidate(1.0, 1.0, 0.0, 1.0), candidate(1.0, 1.0, 5.0, 1.0)];
        // the zero-exposure candidate is treated as unknown and excluded
        assert_eq!(select_leap(&candidates).unwrap().total_exposure, 5.0);
    }

    #[test]
    fn leap_returns_first_when_all_zero() {
        let candidates = vec![candidate(1.0, 1.0, 0.0, 1.0), candidate(1.0, 1.0, 0.0, 1.0)];
        assert_eq!(select_leap(&candidates).unwrap().distance_m, 1.0);
    }

    #[test]
    fn balanced_empty_is_none() {
        assert!(select_balanced(&[]).is_none());
    }

    #[test]
    fn balanced_two_close_candidates_prefers_exposure() {
        let candidates = vec![
            candidate(1000.0, 600.0, 9.0, 1.0),
            candidate(1100.0, 650.0, 3.0, 1.0),
        ];
        let winner = select_balanced(&candidates).unwrap();
        assert_eq!(winner.total_exposure, 3.0);
    }

    #[test]
    fn balanced_two_distant_candidates_prefers_duration() {
        let candidates = vec![
            candidate(1000.0, 600.0, 9.0, 1.0),
            candidate(5000.0, 2000.0, 3.0, 1.0),
        ];
        let winner = select_balanced(&candidates).unwrap();
        assert_eq!(winner.duration_s, 600.0);
    }

    #[test]
    fn balanced_three_or_more_follows_exposure_then_duration_then_energy() {
        let candidates = vec![
            candidate(1000.0, 500.0, 1.0, 9.0),
            candidate(2000.0, 400.0, 2.0, 1.0),
            candidate(3000.0, 300.0, 3.0, 5.0),
            candidate(4000.0, 200.0, 10.0, 0.1),
        ];
        // exposure order: [1,2,3] of first three kept as top-3, fourth (10.0) dropped
        // duration order within top-3: 3rd(300) < 2nd(400) < 1st(500)
        // energy order within first 2 of that (3rd, 2nd): 2nd(1.0) < 3rd(5.0)
        let winner = select_balanced(&candidates).unwrap();
        assert_eq!(winner.total_energy, 1.0);
    }
}
