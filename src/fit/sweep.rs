//! Learning-rate trials.
//!
//! Every candidate rate runs its own independent fit with a constant `alpha`;
//! the trials share the read-only point set and each owns its model, so they
//! run in parallel without synchronization.
//!
//! Selection rule: the lowest finite final cost wins, ties keep the earlier
//! candidate. A trial that diverged (non-finite parameters or cost) is never
//! selected.

use rayon::prelude::*;

use crate::domain::{Hyperparameters, Model, PointSet};
use crate::error::FitError;
use crate::fit::descent::fit_from;
use crate::math::cost;

/// Outcome of one learning-rate candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub alpha: f64,
    pub model: Model,
    /// Cost at `model` (may be non-finite when the trial diverged).
    pub cost: f64,
}

impl Trial {
    pub fn diverged(&self) -> bool {
        !(self.model.is_finite() && self.cost.is_finite())
    }
}

/// Run one fit per rate in `rates`, in parallel.
///
/// Trials come back in the order of `rates`. All rates are validated before any
/// fit starts.
pub fn sweep(points: &PointSet, rates: &[f64], iterations: usize, initial: Model) -> Result<Vec<Trial>, FitError> {
    if points.is_empty() {
        return Err(FitError::EmptyPointSet);
    }
    let hyperparameters = rates
        .iter()
        .map(|&alpha| Hyperparameters::new(alpha, iterations))
        .collect::<Result<Vec<_>, _>>()?;

    hyperparameters
        .par_iter()
        .map(|hp| -> Result<Trial, FitError> {
            let model = fit_from(points, *hp, initial)?;
            Ok(Trial {
                alpha: hp.alpha(),
                model,
                cost: cost(points, model.w, model.b)?,
            })
        })
        .collect()
}

/// Pick the trial with the lowest finite cost.
pub fn select_best(trials: &[Trial]) -> Option<&Trial> {
    trials
        .iter()
        .filter(|t| !t.diverged())
        .fold(None, |best: Option<&Trial>, t| match best {
            Some(b) if b.cost <= t.cost => Some(b),
            _ => Some(t),
        })
}
