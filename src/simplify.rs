//! Shape-preserving point reduction.
//!
//! Recursive Douglas-Peucker over index ranges into one backing
//! buffer, with an optional radial pre-filter for dense tracks.

use kurbo::Point;

use crate::geom::chord_lengths;

/// Reduce a track to the fewest points that stay within `tolerance`
/// perpendicular distance of the original shape.
///
/// `high_quality` first strips near-duplicate points whose spacing is
/// below the track's mean segment length, which speeds up the
/// recursive pass on dense GPS input at a minor shape cost.
///
/// The first and last point always survive. Output length never
/// exceeds input length.
pub fn simplify(points: &[Point], tolerance: f64, high_quality: bool) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let filtered;
    let working = if high_quality {
        filtered = radial_prefilter(points);
        filtered.as_slice()
    } else {
        points
    };

    let mut kept = vec![0];
    douglas_peucker(working, 0, working.len() - 1, tolerance, &mut kept);
    kept.push(working.len() - 1);

    kept.into_iter().map(|i| working[i]).collect()
}

/// Drop interior points until accumulated spacing reaches the mean
/// segment length. The accumulator resets on every kept point; the
/// endpoints are kept unconditionally, including a final bucket that
/// never filled up.
fn radial_prefilter(points: &[Point]) -> Vec<Point> {
    let distances = chord_lengths(points);
    let avg = distances.iter().sum::<f64>() / distances.len() as f64;

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    let mut accumulated = 0.0;
    for i in 1..points.len() - 1 {
        accumulated += distances[i - 1];
        if accumulated >= avg {
            kept.push(points[i]);
            accumulated = 0.0;
        }
    }
    kept.push(points[points.len() - 1]);
    kept
}

/// Append the indices of interior points worth keeping in
/// `points[start..=end]`, in traversal order. Endpoints are the
/// caller's responsibility, so concatenated sub-segments never
/// duplicate their shared boundary point.
fn douglas_peucker(points: &[Point], start: usize, end: usize, tolerance: f64, kept: &mut Vec<usize>) {
    if end - start < 2 {
        return;
    }

    let chord = points[end] - points[start];
    let chord_len = chord.hypot();

    let mut max_distance = 0.0;
    let mut max_index = start;
    // A zero-length chord has no meaningful perpendicular distance;
    // the segment collapses to its two (equal) endpoints.
    if chord_len > 0.0 {
        let unit = chord / chord_len;
        for i in start + 1..end {
            let distance = (points[i] - points[start]).cross(unit).abs();
            // Strict comparison: ties resolve to the first index seen.
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }
    }

    if max_distance > tolerance {
        douglas_peucker(points, start, max_index, tolerance, kept);
        kept.push(max_index);
        douglas_peucker(points, max_index, end, tolerance, kept);
    }
}
