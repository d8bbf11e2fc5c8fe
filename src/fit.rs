//! Parametric curve fitting behind a narrow seam.
//!
//! `fit` takes points with their curve parameters and produces a
//! clamped B-spline by penalized least squares: the residual term
//! keeps the curve on the data, a ridge on second differences of the
//! control points rewards smoothness. Zero smoothing degenerates to
//! exact interpolation. The pipeline only depends on this interface,
//! so the fitting machinery can be swapped without touching it.

use kurbo::Point;
use thiserror::Error;

/// Why a fit could not be produced. Always recoverable by the caller
/// falling back to the unfitted points.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("need at least {needed} points for a degree {degree} fit, got {got}")]
    TooFewPoints {
        needed: usize,
        degree: usize,
        got: usize,
    },

    #[error("curve parameters must be finite and strictly increasing")]
    BadParameters,

    #[error("normal equations are singular")]
    Singular,
}

/// A fitted parametric B-spline curve.
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    knots: Vec<f64>,
    coef_x: Vec<f64>,
    coef_y: Vec<f64>,
}

/// Fit a degree-`degree` B-spline through `points` against the given
/// strictly increasing parameter values.
///
/// One control point per data point, clamped knot vector with
/// interior knots at parameter averages, so the collocation matrix is
/// square and (for valid parameters) nonsingular. `smoothing` is the
/// ridge weight on second differences of the control points; 0 means
/// interpolation.
pub fn fit(
    points: &[Point],
    params: &[f64],
    smoothing: f64,
    degree: usize,
) -> Result<BSpline, FitError> {
    let n = points.len();
    if degree == 0 || n < degree + 1 {
        return Err(FitError::TooFewPoints {
            needed: degree + 1,
            degree,
            got: n,
        });
    }
    if params.len() != n || !smoothing.is_finite() || smoothing < 0.0 {
        return Err(FitError::BadParameters);
    }
    if params.iter().any(|t| !t.is_finite()) {
        return Err(FitError::BadParameters);
    }
    if params.windows(2).any(|w| w[1] <= w[0]) {
        return Err(FitError::BadParameters);
    }

    let knots = averaged_knots(params, degree);
    let m = n; // one coefficient per data point
    let half_bandwidth = degree.max(2);

    // Normal matrix, upper band storage: band[i][d] = A[i][i + d].
    let mut band = vec![vec![0.0; half_bandwidth + 1]; m];
    let mut rhs_x = vec![0.0; m];
    let mut rhs_y = vec![0.0; m];

    let mut basis = vec![0.0; degree + 1];
    for (i, &t) in params.iter().enumerate() {
        let span = find_span(&knots, degree, m, t);
        basis_functions(&knots, degree, span, t, &mut basis);
        let col0 = span - degree;
        for a in 0..=degree {
            rhs_x[col0 + a] += basis[a] * points[i].x;
            rhs_y[col0 + a] += basis[a] * points[i].y;
            for b in a..=degree {
                band[col0 + a][b - a] += basis[a] * basis[b];
            }
        }
    }

    // Second-difference ridge: smoothing * ||D c||^2 with
    // D row j = (1, -2, 1) at columns j, j+1, j+2.
    if smoothing > 0.0 && m >= 3 {
        const STENCIL: [f64; 3] = [1.0, -2.0, 1.0];
        for j in 0..m - 2 {
            for a in 0..3 {
                for b in a..3 {
                    band[j + a][b - a] += smoothing * STENCIL[a] * STENCIL[b];
                }
            }
        }
    }

    let factor = cholesky_banded(&band, half_bandwidth)?;
    let coef_x = solve_banded(&factor, half_bandwidth, &rhs_x);
    let coef_y = solve_banded(&factor, half_bandwidth, &rhs_y);

    Ok(BSpline {
        degree,
        knots,
        coef_x,
        coef_y,
    })
}

impl BSpline {
    /// Parameter interval the curve is defined over.
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - 1 - self.degree],
        )
    }

    /// Evaluate at parameter `t`, clamped to the domain.
    pub fn eval(&self, t: f64) -> Point {
        let (lo, hi) = self.domain();
        let t = t.clamp(lo, hi);
        let m = self.coef_x.len();
        let span = find_span(&self.knots, self.degree, m, t);
        let mut basis = vec![0.0; self.degree + 1];
        basis_functions(&self.knots, self.degree, span, t, &mut basis);

        let col0 = span - self.degree;
        let mut x = 0.0;
        let mut y = 0.0;
        for (a, &weight) in basis.iter().enumerate() {
            x += weight * self.coef_x[col0 + a];
            y += weight * self.coef_y[col0 + a];
        }
        Point::new(x, y)
    }

    /// Sample at `count` evenly spaced parameters across the domain.
    pub fn sample(&self, count: usize) -> Vec<Point> {
        let (lo, hi) = self.domain();
        match count {
            0 => Vec::new(),
            1 => vec![self.eval(lo)],
            _ => {
                let step = (hi - lo) / (count - 1) as f64;
                (0..count).map(|i| self.eval(lo + step * i as f64)).collect()
            }
        }
    }
}

/// Clamped knot vector with interior knots at running parameter
/// averages, which satisfies Schoenberg-Whitney for strictly
/// increasing parameters.
fn averaged_knots(params: &[f64], degree: usize) -> Vec<f64> {
    let n = params.len();
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(params[0]).take(degree + 1));
    for j in 1..n - degree {
        let window = &params[j..j + degree];
        knots.push(window.iter().sum::<f64>() / degree as f64);
    }
    knots.extend(std::iter::repeat(params[n - 1]).take(degree + 1));
    knots
}

/// Index of the knot span containing `t`.
fn find_span(knots: &[f64], degree: usize, coef_count: usize, t: f64) -> usize {
    if t >= knots[coef_count] {
        return coef_count - 1;
    }
    let mut lo = degree;
    let mut hi = coef_count;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if t < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// All `degree + 1` nonzero basis functions at `t` in `span`
/// (Cox-de Boor triangular scheme).
fn basis_functions(knots: &[f64], degree: usize, span: usize, t: f64, out: &mut [f64]) {
    out[0] = 1.0;
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = out[r] / (right[r + 1] + left[j - r]);
            out[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        out[j] = saved;
    }
}

/// Cholesky factor of a symmetric positive definite banded matrix in
/// upper band storage. Returns the upper factor in the same layout.
fn cholesky_banded(band: &[Vec<f64>], half_bandwidth: usize) -> Result<Vec<Vec<f64>>, FitError> {
    let m = band.len();
    let mut factor = vec![vec![0.0; half_bandwidth + 1]; m];
    for i in 0..m {
        let mut diag = band[i][0];
        for k in i.saturating_sub(half_bandwidth)..i {
            diag -= factor[k][i - k] * factor[k][i - k];
        }
        if diag <= 1e-12 {
            return Err(FitError::Singular);
        }
        let pivot = diag.sqrt();
        factor[i][0] = pivot;
        for d in 1..=half_bandwidth.min(m - 1 - i) {
            let j = i + d;
            let mut sum = band[i][d];
            for k in j.saturating_sub(half_bandwidth)..i {
                sum -= factor[k][i - k] * factor[k][j - k];
            }
            factor[i][d] = sum / pivot;
        }
    }
    Ok(factor)
}

/// Solve U^T U c = rhs given the banded upper factor U.
fn solve_banded(factor: &[Vec<f64>], half_bandwidth: usize, rhs: &[f64]) -> Vec<f64> {
    let m = rhs.len();

    // Forward: U^T z = rhs.
    let mut z = vec![0.0; m];
    for i in 0..m {
        let mut sum = rhs[i];
        for k in i.saturating_sub(half_bandwidth)..i {
            sum -= factor[k][i - k] * z[k];
        }
        z[i] = sum / factor[i][0];
    }

    // Backward: U c = z.
    let mut c = vec![0.0; m];
    for i in (0..m).rev() {
        let mut sum = z[i];
        for d in 1..=half_bandwidth.min(m - 1 - i) {
            sum -= factor[i][d] * c[i + d];
        }
        c[i] = sum / factor[i][0];
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_params(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn zero_smoothing_interpolates() {
        let points: Vec<Point> = (0..10)
            .map(|i| {
                let x = i as f64;
                Point::new(x, (x * 0.9).sin() * 3.0)
            })
            .collect();
        let params = uniform_params(points.len());
        let spline = fit(&points, &params, 0.0, 3).unwrap();
        for (p, &t) in points.iter().zip(&params) {
            let q = spline.eval(t);
            assert!((q.x - p.x).abs() < 1e-6, "x off at t={}: {} vs {}", t, q.x, p.x);
            assert!((q.y - p.y).abs() < 1e-6, "y off at t={}: {} vs {}", t, q.y, p.y);
        }
    }

    #[test]
    fn quadratic_fit_on_three_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ];
        let params = vec![0.0, 0.5, 1.0];
        let spline = fit(&points, &params, 0.0, 2).unwrap();
        let mid = spline.eval(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_smoothing_flattens_zigzag() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new(i as f64, if i % 2 == 0 { 1.0 } else { -1.0 }))
            .collect();
        let params = uniform_params(points.len());
        let spline = fit(&points, &params, 1e6, 3).unwrap();
        // The ridge dominates, so the curve cannot chase the zigzag.
        let mid = spline.eval(params[9]);
        assert!((mid.y - points[9].y).abs() > 0.1);
        assert!(mid.y.is_finite());
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let points = vec![Point::new(0.0, 0.0); 4];
        let params = vec![0.0, f64::NAN, 0.5, 1.0];
        assert!(matches!(
            fit(&points, &params, 0.0, 3),
            Err(FitError::BadParameters)
        ));
    }

    #[test]
    fn rejects_non_increasing_parameters() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ];
        let params = vec![0.0, 0.5, 0.5, 1.0];
        assert!(matches!(
            fit(&points, &params, 0.0, 3),
            Err(FitError::BadParameters)
        ));
    }

    #[test]
    fn rejects_too_few_points_for_degree() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let params = vec![0.0, 1.0];
        assert!(matches!(
            fit(&points, &params, 0.0, 3),
            Err(FitError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn sample_spans_the_domain() {
        let points: Vec<Point> = (0..8).map(|i| Point::new(i as f64, 0.0)).collect();
        let params = uniform_params(points.len());
        let spline = fit(&points, &params, 0.0, 3).unwrap();
        let sampled = spline.sample(25);
        assert_eq!(sampled.len(), 25);
        assert!((sampled[0].x - 0.0).abs() < 1e-9);
        assert!((sampled[24].x - 7.0).abs() < 1e-9);
    }
}
