//! Segment-to-sample-point reduction (§4.B).
//!
//! A route candidate's segments are reduced to a sparse set of sample points
//! before the exposure stage fetches air quality for each one. Short
//! segments are accumulated and folded into the next sample rather than
//! sampled individually; long segments are split into 2km chunks and
//! sampled once per chunk.

use crate::types::{Coordinate, NormalizedSegment, SamplePoint};

/// Reduces a candidate's segments to sample points, carrying skipped
/// distance/time across segments below the 1km threshold.
///
/// Three regimes per segment, mirroring the upstream per-leg branch:
/// - `< 1000m`: accumulate into the running skip counters. Once the
///   accumulated skipped distance reaches 2km, emit one sample at this
///   segment's midpoint coordinate, with the skipped time folded in.
/// - `1000..2000m`: reset the skip counters and emit one sample at the
///   segment's midpoint coordinate.
/// - `>= 2000m`: reset the skip counters and split the segment into
///   `distance / 2000` whole chunks, emitting one sample per chunk at its
///   midpoint coordinate, with the segment's duration split evenly.
pub fn sample(segments: &[NormalizedSegment]) -> Vec<SamplePoint> {
    let mut points = Vec::new();
    let mut skipped_distance_km = 0.0_f64;
    let mut skipped_time_s = 0.0_f64;

    for segment in segments {
        let distance_m = segment.distance_m();
        let duration_s = segment.duration_s();

        if distance_m < 1000.0 {
            if skipped_distance_km >= 2.0 {
                if let Some(coordinate) = midpoint_coordinate(segment) {
                    points.push(SamplePoint {
                        coordinate,
                        dwell_s: duration_s + skipped_time_s,
                    });
                }
                skipped_distance_km = 0.0;
                skipped_time_s = 0.0;
            } else {
                skipped_distance_km += distance_m * 0.001;
                skipped_time_s += duration_s;
            }
            continue;
        }

        skipped_distance_km = 0.0;
        skipped_time_s = 0.0;

        if distance_m < 2000.0 {
            if let Some(coordinate) = midpoint_coordinate(segment) {
                points.push(SamplePoint { coordinate, dwell_s: duration_s });
            }
            continue;
        }

        let chunks = (distance_m / 2000.0) as usize;
        if chunks == 0 {
            continue;
        }
        let time_per_chunk = duration_s / chunks as f64;
        for chunk in chunk_coordinates(segment, chunks) {
            points.push(SamplePoint { coordinate: chunk, dwell_s: time_per_chunk });
        }
    }

    points
}

fn midpoint_coordinate(segment: &NormalizedSegment) -> Option<Coordinate> {
    match segment {
        NormalizedSegment::OwnGeometry { coordinates, .. } => {
            coordinates.get(coordinates.len() / 2).copied()
        }
        NormalizedSegment::Interval { .. } => None,
    }
}

fn chunk_coordinates(segment: &NormalizedSegment, chunks: usize) -> Vec<Coordinate> {
    match segment {
        NormalizedSegment::OwnGeometry { coordinates, .. } => {
            let chunk_length = coordinates.len() / chunks;
            if chunk_length == 0 {
                return Vec::new();
            }
            (0..chunks)
                .filter_map(|k| {
                    let start = k * chunk_length;
                    let end = start + chunk_length;
                    let index = (start + end) / 2;
                    coordinates.get(index).copied()
                })
                .collect()
        }
        NormalizedSegment::Interval { .. } => Vec::new(),
    }
}

/// Resolves a sample coordinate for the `Interval`-shaped segment against
/// the candidate's shared coordinate list. `Interval` segments index into a
/// route-wide array rather than carrying their own geometry, so this needs
/// the full candidate coordinates, unlike the `OwnGeometry` helpers above.
pub fn sample_with_shared_coordinates(
    segments: &[NormalizedSegment],
    shared_coordinates: &[Coordinate],
) -> Vec<SamplePoint> {
    let mut points = Vec::new();
    let mut skipped_distance_km = 0.0_f64;
    let mut skipped_time_s = 0.0_f64;

    for segment in segments {
        let NormalizedSegment::Interval { distance_m, start_idx, end_idx, .. } = segment else {
            continue;
        };
        let distance_m = *distance_m;
        let duration_s = segment.duration_s();

        if distance_m < 1000.0 {
            if skipped_distance_km >= 2.0 {
                if let Some(&coordinate) = shared_coordinates.get(*end_idx) {
                    points.push(SamplePoint {
                        coordinate,
                        dwell_s: duration_s + skipped_time_s,
                    });
                }
                skipped_distance_km = 0.0;
                skipped_time_s = 0.0;
            } else {
                skipped_distance_km += distance_m * 0.001;
                skipped_time_s += duration_s;
            }
            continue;
        }

        skipped_distance_km = 0.0;
        skipped_time_s = 0.0;

        if distance_m < 2000.0 {
            let index = (start_idx + end_idx) / 2 + 1;
            if let Some(&coordinate) = shared_coordinates.get(index) {
                points.push(SamplePoint { coordinate, dwell_s: duration_s });
            }
            continue;
        }

        let chunks = (distance_m / 2000.0) as usize;
        if chunks == 0 {
            continue;
        }
        let time_per_chunk = duration_s / chunks as f64;
        let chunk_length = (end_idx - start_idx) / chunks;
        if chunk_length == 0 {
            continue;
        }
        for k in 0..chunks {
            let start_chunk_index = start_idx + k * chunk_length;
            let index = start_chunk_index + chunk_length / 2 + 1;
            if let Some(&coordinate) = shared_coordinates.get(index) {
                points.push(SamplePoint { coordinate, dwell_s: time_per_chunk });
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own_geometry(distance_m: f64, duration_s: f64, n_coords: usize) -> NormalizedSegment {
        let coordinates = (0..n_coords)
            .map(|i| Coordinate::new(i as f64, i as f64))
            .collect();
        NormalizedSegment::OwnGeometry { distance_m, duration_s, coordinates }
    }

    #[test]
    fn short_segments_accumulate_until_threshold() {
        let segments = vec![
            own_geometry(500.0, 30.0, 3),
            own_geometry(600.0, 30.0, 3),
            own_geometry(900.0, 30.0, 3),
        ];
        let points = sample(&segments);
        // 0.5 + 0.6 = 1.1km skipped after two segments (below 2km), third
        // segment pushes the total to 2.0km, which reaches the threshold
        // and emits exactly one sample with all three durations folded in,
        // at the flushing segment's midpoint (not its last coordinate).
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].coordinate, Coordinate::new(1.0, 1.0));
        assert_eq!(points[0].dwell_s, 90.0);
    }

    #[test]
    fn mid_segment_emits_midpoint() {
        let segments = vec![own_geometry(1500.0, 60.0, 5)];
        let points = sample(&segments);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].coordinate, Coordinate::new(2.0, 2.0));
        assert_eq!(points[0].dwell_s, 60.0);
    }

    #[test]
    fn long_segment_splits_into_chunks() {
        let segments = vec![own_geometry(4500.0, 90.0, 9)];
        let points = sample(&segments);
        // 4500 / 2000 = 2 whole chunks.
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].dwell_s, 45.0);
        assert_eq!(points[1].dwell_s, 45.0);
    }

    #[test]
    fn interval_segments_use_plus_one_offset() {
        let shared: Vec<Coordinate> = (0..10).map(|i| Coordinate::new(i as f64, i as f64)).collect();
        let segments = vec![NormalizedSegment::Interval {
            distance_m: 1500.0,
            time_ms: 60_000,
            start_idx: 0,
            end_idx: 4,
        }];
        let points = sample_with_shared_coordinates(&segments, &shared);
        assert_eq!(points.len(), 1);
        // (0 + 4) / 2 + 1 = 3
        assert_eq!(points[0].coordinate, Coordinate::new(3.0, 3.0));
    }

    #[test]
    fn empty_segments_produce_no_samples() {
        assert!(sample(&[]).is_empty());
    }
}
