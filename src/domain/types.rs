//! Shared domain types.
//!
//! These types are intentionally kept small and `Copy` where possible so that the
//! fitting core can pass them around by value without allocation.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Learning rate used when none is given.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Number of descent iterations used when none is given.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// A single observation `(x, y)`.
///
/// The fitting core assumes both coordinates are finite. The loader enforces
/// this through [`Point::finite`]; code building points by hand is responsible
/// for the same guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point only if both coordinates are finite.
    pub fn finite(x: f64, y: f64) -> Option<Self> {
        (x.is_finite() && y.is_finite()).then_some(Self { x, y })
    }
}

/// An ordered, read-only collection of points.
///
/// Input order is preserved so diagnostics and exports line up with the source
/// file, even though the regression itself is order-independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Summary ranges, or `None` for an empty set.
    pub fn stats(&self) -> Option<DatasetStats> {
        let first = self.points.first()?;
        let mut stats = DatasetStats {
            n_points: self.points.len(),
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in &self.points[1..] {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
        }
        Some(stats)
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Fitted line `y = w*x + b`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    /// Slope.
    pub w: f64,
    /// Intercept.
    pub b: f64,
}

impl Model {
    pub const fn new(w: f64, b: f64) -> Self {
        Self { w, b }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.w * x + self.b
    }

    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.b.is_finite()
    }
}

/// Partial derivatives of the cost with respect to `(w, b)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub dw: f64,
    pub db: f64,
}

/// Descent hyperparameters.
///
/// Fields are private so that every value in circulation went through
/// [`Hyperparameters::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hyperparameters {
    alpha: f64,
    iterations: usize,
}

impl Hyperparameters {
    pub fn new(alpha: f64, iterations: usize) -> Result<Self, FitError> {
        validate_learning_rate(alpha)?;
        Ok(Self { alpha, iterations })
    }

    /// Learning rate (step size scaling the gradient update).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of descent iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Check that `alpha` is usable as a learning rate.
pub fn validate_learning_rate(alpha: f64) -> Result<f64, FitError> {
    if alpha.is_finite() && alpha > 0.0 {
        Ok(alpha)
    } else {
        Err(FitError::InvalidLearningRate(alpha))
    }
}

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

/// A full fit run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub hyperparameters: Hyperparameters,
    pub initial: Model,

    /// Candidate learning rates; when non-empty the best trial replaces
    /// `hyperparameters.alpha()`.
    pub sweep: Vec<f64>,

    /// Print the cost every `progress_every` iterations (0 disables).
    pub progress_every: usize,

    /// PNG output (`None` disables image rendering).
    pub output: Option<PathBuf>,
    pub image_width: u32,
    pub image_height: u32,

    pub ascii_plot: bool,
    pub ascii_width: usize,
    pub ascii_height: usize,

    pub export_trace: Option<PathBuf>,
    pub format: ReportFormat,
    /// Rows in the largest-residuals table.
    pub top_n: usize,
}

/// Settings for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub output: PathBuf,
    pub count: usize,
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the Gaussian noise added to `y`.
    pub noise: f64,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperparameters_reject_non_positive_alpha() {
        assert_eq!(
            Hyperparameters::new(0.0, 10),
            Err(FitError::InvalidLearningRate(0.0))
        );
        assert!(Hyperparameters::new(-1.0, 10).is_err());
        assert!(Hyperparameters::new(f64::NAN, 10).is_err());
        assert!(Hyperparameters::new(f64::INFINITY, 10).is_err());

        let hp = Hyperparameters::new(0.5, 0).unwrap();
        assert_eq!(hp.alpha(), 0.5);
        assert_eq!(hp.iterations(), 0);
    }

    #[test]
    fn defaults_match_documented_values() {
        let hp = Hyperparameters::default();
        assert_eq!(hp.alpha(), 0.01);
        assert_eq!(hp.iterations(), 1000);
        assert_eq!(Model::default(), Model::new(0.0, 0.0));
    }

    #[test]
    fn point_finite_filters_nan_and_infinity() {
        assert!(Point::finite(1.0, 2.0).is_some());
        assert!(Point::finite(f64::NAN, 2.0).is_none());
        assert!(Point::finite(1.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn stats_cover_all_points() {
        let points: PointSet = vec![
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(0.5, 0.0),
        ]
        .into();
        let stats = points.stats().unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-2.0, 3.0));
        assert_eq!((stats.y_min, stats.y_max), (-1.0, 4.0));

        assert!(PointSet::default().stats().is_none());
    }
}
