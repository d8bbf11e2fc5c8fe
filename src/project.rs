//! Canvas projection and path construction.
//!
//! Normalizes a processed track into a margin-inset canvas rectangle
//! and emits it as straight path segments. The vertical axis flips
//! because SVG y grows downward while latitude grows northward.

use kurbo::{BezPath, Point};

use crate::error::RenderError;
use crate::geom::bounds;

/// Map a track into a `width` x `height` canvas with a `margin` inset
/// on every side and build a single `MoveTo` + `LineTo` path in input
/// order.
///
/// A zero-span axis (single point, or a perfectly straight
/// horizontal/vertical track) maps to the canvas center on that axis.
/// The only failure is an empty track.
pub fn build_path(
    points: &[Point],
    width: f64,
    height: f64,
    margin: f64,
) -> Result<BezPath, RenderError> {
    let rect = bounds(points).ok_or(RenderError::EmptyTrack)?;

    let usable_w = width - 2.0 * margin;
    let usable_h = height - 2.0 * margin;

    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        let norm_x = normalize(p.x, rect.x0, rect.x1);
        let norm_y = normalize(p.y, rect.y0, rect.y1);
        let x = norm_x * usable_w + margin;
        let y = (1.0 - norm_y) * usable_h + margin;
        if i == 0 {
            path.move_to(Point::new(x, y));
        } else {
            path.line_to(Point::new(x, y));
        }
    }
    Ok(path)
}

/// Position of `value` within [min, max], with a degenerate span
/// collapsing to the center rather than dividing by zero.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max != min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}
