//! Spline smoothing of point tracks.
//!
//! Fits a parametric curve through the points and resamples it,
//! turning a jagged GPS polyline into a continuous-looking path.
//! Smoothing never fails the pipeline: when the fit cannot be
//! produced the input passes through unchanged.

use kurbo::Point;
use log::{debug, warn};

use crate::fit;
use crate::geom::cumulative_distance;

/// First and last point closer than this are treated as the same
/// point, in coordinate units.
const CLOSED_EPS: f64 = 1e-6;

/// Smooth a track with strength `smoothing_factor` in [0, 1] and
/// resample to `target_count` points (None keeps the input count).
///
/// Closed tracks (first and last point coincide within floating-point
/// noise) are parameterized by chord length so the seam carries over
/// to the curve, and the output is re-closed exactly after
/// resampling. Open tracks use a uniform parameter progression.
///
/// The nominal factor is rescaled by the track's average segment
/// length before fitting, so the same value behaves consistently
/// across tracks of very different scale and density.
pub fn smooth(points: &[Point], smoothing_factor: f64, target_count: Option<usize>) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let cumulative = cumulative_distance(points);
    let total = cumulative[n - 1];

    let is_closed = (points[0] - points[n - 1]).hypot() < CLOSED_EPS;
    let params: Vec<f64> = if is_closed {
        // Chord-length parameterization: starts at 0, ends at 1,
        // consistent with the closure.
        cumulative.iter().map(|d| d / total).collect()
    } else {
        (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
    };

    // Average segment length as a complexity measure, so the nominal
    // factor means the same thing for a city block and a marathon.
    let complexity = total / n as f64;
    let effective_smoothing = smoothing_factor * complexity * 0.1;

    let degree = 3.min(n - 1);
    let count = target_count.unwrap_or(n).max(2);

    match fit::fit(points, &params, effective_smoothing, degree) {
        Ok(spline) => {
            let mut resampled = spline.sample(count);
            if is_closed {
                // Resampling may miss the seam by a hair; pin it.
                resampled[count - 1] = resampled[0];
            }
            resampled
        }
        Err(err) => {
            warn!("curve fit failed, keeping unsmoothed track: {err}");
            debug!("fit input: {n} points, factor {smoothing_factor}, closed {is_closed}");
            points.to_vec()
        }
    }
}
