//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place keeps the workflow testable without a process:
//! load points -> (optional learning-rate sweep) -> descent -> summary
//!
//! The binary can then focus on presentation (printing, plotting, exports).

use log::{debug, info};

use crate::domain::{FitConfig, Hyperparameters, Model};
use crate::error::{AppError, FitError};
use crate::fit::{Step, Trial, fit_from, fit_with_progress, select_best, sweep};
use crate::io::ingest::{IngestedPoints, load_points};
use crate::math::cost;
use crate::report::{FitSummary, TrialRow, compute_residuals, largest_residuals};

/// All computed outputs of a single `gdfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    /// Hyperparameters of the final fit (the selected rate when a sweep ran).
    pub hyperparameters: Hyperparameters,
    pub initial: Model,
    pub model: Model,
    pub cost: f64,
    pub trials: Vec<Trial>,
    /// Every step of the final fit; only collected when a trace export is requested.
    pub trace: Vec<Step>,
}

impl RunOutput {
    pub fn summary(&self, top_n: usize) -> Result<FitSummary, AppError> {
        let stats = self
            .ingest
            .points
            .stats()
            .ok_or_else(|| AppError::new(3, "No valid points to summarize."))?;
        let residuals = compute_residuals(&self.ingest.points, &self.model);

        Ok(FitSummary {
            lines_read: self.ingest.rows_read,
            lines_skipped: self.ingest.row_errors.len(),
            stats,
            hyperparameters: self.hyperparameters,
            initial: self.initial,
            model: self.model,
            cost: self.cost,
            rmse: self.cost.sqrt(),
            worst_points: largest_residuals(&residuals, top_n),
            trials: TrialRow::from_trials(&self.trials, self.hyperparameters.alpha()),
        })
    }
}

/// Load the configured input file and fit it.
///
/// `on_progress` is called every `config.progress_every` iterations (and on the
/// last one); it never influences the fitted result.
pub fn run_fit<F>(config: &FitConfig, on_progress: F) -> Result<RunOutput, AppError>
where
    F: FnMut(&Step),
{
    let ingest = load_points(&config.input)?;
    fit_ingested(ingest, config, on_progress)
}

/// Fit already-loaded points.
pub fn fit_ingested<F>(ingest: IngestedPoints, config: &FitConfig, mut on_progress: F) -> Result<RunOutput, AppError>
where
    F: FnMut(&Step),
{
    let points = &ingest.points;
    let iterations = config.hyperparameters.iterations();
    let with_context = |e: FitError| empty_input_context(e, &ingest);

    // 1) Optional learning-rate sweep.
    let (hyperparameters, trials) = if config.sweep.is_empty() {
        (config.hyperparameters, Vec::new())
    } else {
        let trials = sweep(points, &config.sweep, iterations, config.initial).map_err(with_context)?;
        let best = select_best(&trials).ok_or_else(|| {
            AppError::new(4, "Every learning-rate trial diverged; try smaller rates.")
        })?;
        info!("sweep selected alpha={} (cost={})", best.alpha, best.cost);
        (Hyperparameters::new(best.alpha, iterations)?, trials)
    };

    // 2) Final fit, observed only when someone is listening.
    let every = config.progress_every;
    let keep_trace = config.export_trace.is_some();
    let mut trace = Vec::new();

    let model = if every > 0 || keep_trace {
        fit_with_progress(points, hyperparameters, config.initial, |step| {
            if keep_trace {
                trace.push(*step);
            }
            if every > 0 && (step.iteration % every == 0 || step.iteration == iterations) {
                on_progress(step);
            }
        })
    } else {
        fit_from(points, hyperparameters, config.initial)
    }
    .map_err(with_context)?;

    // 3) Refuse to hand NaN/inf to the report or the renderer.
    let final_cost = cost(points, model.w, model.b)?;
    if !(model.is_finite() && final_cost.is_finite()) {
        return Err(AppError::new(
            4,
            format!(
                "Fit diverged with alpha={} after {iterations} iterations; try a smaller --alpha.",
                hyperparameters.alpha()
            ),
        ));
    }
    debug!("fitted w={} b={} cost={final_cost}", model.w, model.b);

    Ok(RunOutput {
        ingest,
        hyperparameters,
        initial: config.initial,
        model,
        cost: final_cost,
        trials,
        trace,
    })
}

fn empty_input_context(err: FitError, ingest: &IngestedPoints) -> AppError {
    match err {
        FitError::EmptyPointSet if ingest.rows_read > 0 => AppError::new(
            3,
            format!("{err} (all {} input lines were malformed)", ingest.rows_read),
        ),
        _ => err.into(),
    }
}
