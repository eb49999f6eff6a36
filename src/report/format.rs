//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::error::AppError;
use crate::fit::Step;
use crate::report::{FitSummary, PointResidual, TrialRow};

/// One progress line: `cost(<w>, <b>) = <cost>`.
pub fn format_progress(step: &Step) -> String {
    format!("cost({:.2}, {:.2}) = {:.2}", step.model.w, step.model.b, step.cost)
}

/// Format the full run summary (dataset stats + descent settings + fitted line).
pub fn format_run_summary(summary: &FitSummary) -> String {
    let mut out = String::new();
    let stats = &summary.stats;
    let hp = &summary.hyperparameters;

    out.push_str("=== gdfit - line fit by gradient descent ===\n");
    out.push_str(&format!(
        "Points: n={} (lines read={}, skipped={}) | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points,
        summary.lines_read,
        summary.lines_skipped,
        stats.x_min,
        stats.x_max,
        stats.y_min,
        stats.y_max,
    ));
    out.push_str(&format!(
        "Descent: alpha={} | iterations={} | start=(w={:.6}, b={:.6})\n",
        hp.alpha(),
        hp.iterations(),
        summary.initial.w,
        summary.initial.b,
    ));

    if !summary.trials.is_empty() {
        out.push_str("\nLearning-rate trials:\n");
        for row in &summary.trials {
            out.push_str(&format_trial(row));
            out.push('\n');
        }
    }

    out.push_str("\nFitted line:\n");
    out.push_str(&format!(
        "- y = {:.6}*x + {:.6}\n",
        summary.model.w, summary.model.b
    ));
    out.push_str(&format!("- cost (MSE): {:.6}\n", summary.cost));
    out.push_str(&format!("- RMSE      : {:.6}\n", summary.rmse));

    if !summary.worst_points.is_empty() {
        out.push_str("\nLargest residuals:\n");
        out.push_str(&format_residual_table(&summary.worst_points));
    }

    out
}

/// Format the summary as pretty JSON.
pub fn format_json(summary: &FitSummary) -> Result<String, AppError> {
    serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))
}

fn format_trial(row: &TrialRow) -> String {
    let chosen = if row.selected { "*" } else { " " };
    if row.diverged {
        return format!("{chosen} alpha={:<10} diverged", row.alpha);
    }
    format!(
        "{chosen} alpha={:<10} w={:.6} b={:.6} cost={:.6}",
        row.alpha, row.model.w, row.model.b, row.cost
    )
}

fn format_residual_table(rows: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>6} {:>12} {:>12} {:>12} {:>12}\n",
        "line#", "x", "y", "y_fit", "residual"
    ));
    out.push_str(&format!(
        "{:->6} {:->12} {:->12} {:->12} {:->12}\n",
        "", "", "", "", ""
    ));
    for r in rows {
        out.push_str(&format!(
            "{:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.index + 1,
            r.point.x,
            r.point.y,
            r.y_fit,
            r.residual
        ));
    }
    out
}
