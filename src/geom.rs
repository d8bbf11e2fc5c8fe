//! Shared geometry utilities over kurbo points.

use kurbo::{Point, Rect};

/// Euclidean distances between consecutive points.
///
/// Returns `points.len() - 1` entries, or an empty vec for fewer than
/// two points.
pub fn chord_lengths(points: &[Point]) -> Vec<f64> {
    points
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).hypot())
        .collect()
}

/// Cumulative distance along the polyline, starting at 0.
///
/// Returns `points.len()` entries; the last one is the total length.
pub fn cumulative_distance(points: &[Point]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    if !points.is_empty() {
        cumulative.push(0.0);
    }
    for pair in points.windows(2) {
        total += (pair[1] - pair[0]).hypot();
        cumulative.push(total);
    }
    cumulative
}

/// Axis-aligned bounding box of a point set. None when empty.
pub fn bounds(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut rect = Rect::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        rect.x0 = rect.x0.min(p.x);
        rect.x1 = rect.x1.max(p.x);
        rect.y0 = rect.y0.min(p.y);
        rect.y1 = rect.y1.max(p.y);
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_distance_matches_segments() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
        ];
        let cumulative = cumulative_distance(&points);
        assert_eq!(cumulative.len(), 4);
        assert!((cumulative[1] - 5.0).abs() < 1e-12);
        // Duplicate point contributes zero length.
        assert!((cumulative[2] - 5.0).abs() < 1e-12);
        assert!((cumulative[3] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn bounds_covers_all_points() {
        let points = vec![
            Point::new(2.0, -1.0),
            Point::new(-3.0, 5.0),
            Point::new(0.0, 0.0),
        ];
        let rect = bounds(&points).unwrap();
        assert_eq!(rect.x0, -3.0);
        assert_eq!(rect.x1, 2.0);
        assert_eq!(rect.y0, -1.0);
        assert_eq!(rect.y1, 5.0);
    }
}
