//! Reporting utilities: residuals, the run summary, and formatted terminal output.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::{DatasetStats, Hyperparameters, Model, Point, PointSet};
use crate::fit::Trial;

/// Observed vs fitted value for a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointResidual {
    /// 0-based position in the point set.
    pub index: usize,
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Everything printed at the end of a fit run.
#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub stats: DatasetStats,
    pub hyperparameters: Hyperparameters,
    pub initial: Model,
    pub model: Model,
    pub cost: f64,
    pub rmse: f64,
    pub worst_points: Vec<PointResidual>,
    /// Learning-rate trials (empty unless a sweep ran).
    pub trials: Vec<TrialRow>,
}

/// Serializable view of a sweep trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialRow {
    pub alpha: f64,
    pub model: Model,
    pub cost: f64,
    pub diverged: bool,
    pub selected: bool,
}

impl TrialRow {
    pub fn from_trials(trials: &[Trial], selected_alpha: f64) -> Vec<TrialRow> {
        let mut marked = false;
        trials
            .iter()
            .map(|t| {
                let selected = !marked && !t.diverged() && t.alpha == selected_alpha;
                marked |= selected;
                TrialRow {
                    alpha: t.alpha,
                    model: t.model,
                    cost: t.cost,
                    diverged: t.diverged(),
                    selected,
                }
            })
            .collect()
    }
}

/// Compute fitted values and residuals for each point, in input order.
pub fn compute_residuals(points: &PointSet, model: &Model) -> Vec<PointResidual> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let y_fit = model.predict(p.x);
            PointResidual {
                index,
                point: *p,
                y_fit,
                residual: p.y - y_fit,
            }
        })
        .collect()
}

/// The `top_n` points with the largest absolute residual (ties keep input order).
pub fn largest_residuals(residuals: &[PointResidual], top_n: usize) -> Vec<PointResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(top_n);
    sorted
}
