//! Mean-squared-error cost and its analytic gradient for `y = w*x + b`.
//!
//! ```text
//! cost(w, b) = 1/N * Σ (y_i - (w*x_i + b))^2
//! ∂cost/∂w   = 2/N * Σ -x_i * (y_i - (w*x_i + b))
//! ∂cost/∂b   = 2/N * Σ -(y_i - (w*x_i + b))
//! ```
//!
//! Both functions require a non-empty point set; over zero points the mean is
//! `0/0` and we return [`FitError::EmptyPointSet`] instead of a NaN.

use crate::domain::{Gradient, Point, PointSet};
use crate::error::FitError;

/// Mean squared residual of the line `(w, b)` over `points`.
pub fn cost(points: &PointSet, w: f64, b: f64) -> Result<f64, FitError> {
    let n = sample_count(points)?;
    let sse: f64 = points
        .iter()
        .map(|p| {
            let d = p.y - (w * p.x + b);
            d * d
        })
        .sum();
    Ok(sse / n)
}

/// Partial derivatives of [`cost`] with respect to `w` and `b`.
pub fn gradient(points: &PointSet, w: f64, b: f64) -> Result<Gradient, FitError> {
    sample_count(points)?;
    Ok(gradient_unchecked(points.as_slice(), w, b))
}

/// [`gradient`] for callers that already rejected an empty point set.
pub(crate) fn gradient_unchecked(points: &[Point], w: f64, b: f64) -> Gradient {
    debug_assert!(!points.is_empty(), "gradient over an empty point set");
    let n = points.len() as f64;
    let mut dw = 0.0;
    let mut db = 0.0;
    for p in points {
        let d = p.y - (w * p.x + b);
        dw += -p.x * d;
        db += -d;
    }
    Gradient {
        dw: 2.0 / n * dw,
        db: 2.0 / n * db,
    }
}

fn sample_count(points: &PointSet) -> Result<f64, FitError> {
    if points.is_empty() {
        return Err(FitError::EmptyPointSet);
    }
    Ok(points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn random_points(rng: &mut StdRng, n: usize) -> PointSet {
        (0..n)
            .map(|_| Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect()
    }

    #[test]
    fn cost_is_zero_on_an_exact_line() {
        let points: PointSet = (0..4)
            .map(|i| Point::new(i as f64, 2.0 * i as f64 + 3.0))
            .collect();
        assert_eq!(cost(&points, 2.0, 3.0).unwrap(), 0.0);
        assert!(cost(&points, 2.0, 2.0).unwrap() > 0.0);
    }

    #[test]
    fn cost_hand_computed() {
        // Residuals at (w=1, b=0): 1 - 0 = 1, 1 - 2 = -1 -> mean of squares = 1.
        let points: PointSet = vec![Point::new(0.0, 1.0), Point::new(2.0, 1.0)].into();
        assert!((cost(&points, 1.0, 0.0).unwrap() - 1.0).abs() < 1e-12);

        let g = gradient(&points, 1.0, 0.0).unwrap();
        // dw = 2/2 * (-(0*1) + -(2*-1)) = 2 ; db = 2/2 * (-1 + 1) = 0
        assert!((g.dw - 2.0).abs() < 1e-12);
        assert!(g.db.abs() < 1e-12);
    }

    #[test]
    fn cost_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..20 {
            let points = random_points(&mut rng, n);
            let w = rng.gen_range(-100.0..100.0);
            let b = rng.gen_range(-100.0..100.0);
            assert!(cost(&points, w, b).unwrap() >= 0.0);
        }
    }

    #[test]
    fn gradient_matches_central_finite_difference() {
        let mut rng = StdRng::seed_from_u64(42);
        let h = 1e-5;
        for n in 1..12 {
            let points = random_points(&mut rng, n);
            let w = rng.gen_range(-3.0..3.0);
            let b = rng.gen_range(-3.0..3.0);

            let g = gradient(&points, w, b).unwrap();
            let fd_w = (cost(&points, w + h, b).unwrap() - cost(&points, w - h, b).unwrap()) / (2.0 * h);
            let fd_b = (cost(&points, w, b + h).unwrap() - cost(&points, w, b - h).unwrap()) / (2.0 * h);

            assert!((g.dw - fd_w).abs() < 1e-4, "dw {} vs fd {}", g.dw, fd_w);
            assert!((g.db - fd_b).abs() < 1e-4, "db {} vs fd {}", g.db, fd_b);
        }
    }

    #[test]
    fn gradient_vanishes_at_the_exact_fit() {
        let points: PointSet = vec![Point::new(-1.0, -2.0), Point::new(4.0, 8.0)].into();
        let g = gradient(&points, 2.0, 0.0).unwrap();
        assert_eq!(g.dw, 0.0);
        assert_eq!(g.db, 0.0);
    }

    #[test]
    fn empty_point_set_is_invalid_input() {
        let empty = PointSet::default();
        assert_eq!(cost(&empty, 1.0, 1.0), Err(FitError::EmptyPointSet));
        assert_eq!(gradient(&empty, 1.0, 1.0), Err(FitError::EmptyPointSet));
    }
}
