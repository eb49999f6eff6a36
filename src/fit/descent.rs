//! Fixed-budget batch gradient descent for `y = w*x + b`.
//!
//! Each step moves `(w, b)` against the MSE gradient:
//!
//! ```text
//! (dw, db) = gradient(points, w, b)
//! w = w - alpha * dw
//! b = b - alpha * db
//! ```
//!
//! There is no convergence threshold: exactly `iterations` steps are applied,
//! strictly in sequence. `Descent` exposes the loop as an iterator so callers can
//! stop between steps; the `fit*` functions drive it to the end.

use crate::domain::{Hyperparameters, Model, PointSet};
use crate::error::FitError;
use crate::math::cost;
use crate::math::loss::gradient_unchecked;

/// One observed descent step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// 1-based iteration index.
    pub iteration: usize,
    /// Parameters after this step's update.
    pub model: Model,
    /// Cost at `model`.
    pub cost: f64,
}

/// The descent state machine.
///
/// Iterating yields the updated model after every step, and ends once the
/// iteration budget is spent. A fresh `Descent` with a zero budget yields nothing
/// and leaves the initial model in place.
#[derive(Debug, Clone)]
pub struct Descent<'a> {
    points: &'a PointSet,
    alpha: f64,
    budget: usize,
    iteration: usize,
    model: Model,
}

impl<'a> Descent<'a> {
    /// Set up a descent from `initial`.
    ///
    /// Fails before any step is taken when `points` is empty.
    pub fn new(points: &'a PointSet, hyperparameters: Hyperparameters, initial: Model) -> Result<Self, FitError> {
        if points.is_empty() {
            return Err(FitError::EmptyPointSet);
        }
        Ok(Self {
            points,
            alpha: hyperparameters.alpha(),
            budget: hyperparameters.iterations(),
            iteration: 0,
            model: initial,
        })
    }

    /// Number of steps applied so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current parameters.
    pub fn model(&self) -> Model {
        self.model
    }

    pub fn is_terminal(&self) -> bool {
        self.iteration >= self.budget
    }

    /// Apply every remaining step and return the terminal model.
    pub fn run(mut self) -> Model {
        for _ in self.by_ref() {}
        self.model
    }
}

impl Iterator for Descent<'_> {
    type Item = Model;

    fn next(&mut self) -> Option<Model> {
        if self.is_terminal() {
            return None;
        }
        // `new` rejected empty point sets, so the gradient is always defined here.
        let g = gradient_unchecked(self.points.as_slice(), self.model.w, self.model.b);
        self.model.w -= self.alpha * g.dw;
        self.model.b -= self.alpha * g.db;
        self.iteration += 1;
        Some(self.model)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.budget.saturating_sub(self.iteration);
        (remaining, Some(remaining))
    }
}

/// Fit from the origin `(w, b) = (0, 0)`.
pub fn fit(points: &PointSet, hyperparameters: Hyperparameters) -> Result<Model, FitError> {
    fit_from(points, hyperparameters, Model::default())
}

/// Fit from an explicit starting model.
pub fn fit_from(points: &PointSet, hyperparameters: Hyperparameters, initial: Model) -> Result<Model, FitError> {
    Ok(Descent::new(points, hyperparameters, initial)?.run())
}

/// Fit from `initial`, calling `observer` after every step with the updated
/// model and its cost.
///
/// The observer only sees the steps; the returned model is bit-identical to
/// [`fit_from`] with the same inputs.
pub fn fit_with_progress<F>(
    points: &PointSet,
    hyperparameters: Hyperparameters,
    initial: Model,
    mut observer: F,
) -> Result<Model, FitError>
where
    F: FnMut(&Step),
{
    let mut model = initial;
    for (idx, next) in Descent::new(points, hyperparameters, initial)?.enumerate() {
        model = next;
        let step = Step {
            iteration: idx + 1,
            model,
            cost: cost(points, model.w, model.b)?,
        };
        observer(&step);
    }
    Ok(model)
}

/// Fit and collect every observed step.
pub fn cost_trace(
    points: &PointSet,
    hyperparameters: Hyperparameters,
    initial: Model,
) -> Result<(Model, Vec<Step>), FitError> {
    let mut steps = Vec::with_capacity(hyperparameters.iterations());
    let model = fit_with_progress(points, hyperparameters, initial, |step| steps.push(*step))?;
    Ok((model, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::math::gradient;

    fn line_2x_plus_3() -> PointSet {
        vec![
            Point::new(0.0, 3.0),
            Point::new(1.0, 5.0),
            Point::new(2.0, 7.0),
            Point::new(3.0, 9.0),
        ]
        .into()
    }

    fn hp(alpha: f64, n: usize) -> Hyperparameters {
        Hyperparameters::new(alpha, n).unwrap()
    }

    #[test]
    fn converges_on_exact_line() {
        let points = line_2x_plus_3();
        let model = fit(&points, hp(0.01, 5000)).unwrap();
        assert!((model.w - 2.0).abs() < 0.05, "w = {}", model.w);
        assert!((model.b - 3.0).abs() < 0.05, "b = {}", model.b);
        assert!(cost(&points, model.w, model.b).unwrap() < 1e-6);
    }

    #[test]
    fn zero_iterations_returns_initial_model() {
        let points = line_2x_plus_3();
        for alpha in [1e-6, 0.01, 10.0] {
            assert_eq!(fit(&points, hp(alpha, 0)).unwrap(), Model::default());
            let start = Model::new(-4.5, 1.25);
            assert_eq!(fit_from(&points, hp(alpha, 0), start).unwrap(), start);
        }
    }

    #[test]
    fn cost_is_non_increasing_for_small_alpha() {
        let points = line_2x_plus_3();
        let (_, steps) = cost_trace(&points, hp(0.001, 2000), Model::default()).unwrap();
        assert_eq!(steps.len(), 2000);

        let initial_cost = cost(&points, 0.0, 0.0).unwrap();
        assert!(steps[0].cost <= initial_cost);
        for pair in steps.windows(2) {
            assert!(
                pair[1].cost <= pair[0].cost,
                "cost increased at iteration {}: {} -> {}",
                pair[1].iteration,
                pair[0].cost,
                pair[1].cost
            );
        }
    }

    #[test]
    fn fit_is_deterministic() {
        let points: PointSet = (0..50)
            .map(|i| {
                let x = i as f64 * 0.37;
                Point::new(x, -1.5 * x + 0.25 + (i % 7) as f64 * 0.1)
            })
            .collect();
        let a = fit(&points, hp(0.005, 700)).unwrap();
        let b = fit(&points, hp(0.005, 700)).unwrap();
        assert_eq!(a.w.to_bits(), b.w.to_bits());
        assert_eq!(a.b.to_bits(), b.b.to_bits());
    }

    #[test]
    fn observed_fit_matches_silent_fit() {
        let points = line_2x_plus_3();
        let silent = fit(&points, hp(0.02, 300)).unwrap();

        let mut seen = 0;
        let observed = fit_with_progress(&points, hp(0.02, 300), Model::default(), |step| {
            seen += 1;
            assert_eq!(step.iteration, seen);
            assert!(step.cost.is_finite());
        })
        .unwrap();

        assert_eq!(seen, 300);
        assert_eq!(silent.w.to_bits(), observed.w.to_bits());
        assert_eq!(silent.b.to_bits(), observed.b.to_bits());
    }

    #[test]
    fn trace_reports_cost_at_updated_model() {
        let points = line_2x_plus_3();
        let (model, steps) = cost_trace(&points, hp(0.01, 25), Model::default()).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.iteration, 25);
        assert_eq!(last.model, model);
        assert_eq!(last.cost, cost(&points, model.w, model.b).unwrap());
    }

    #[test]
    fn descent_steps_until_budget() {
        let points = line_2x_plus_3();
        let mut descent = Descent::new(&points, hp(0.01, 3), Model::default()).unwrap();
        assert_eq!(descent.size_hint(), (3, Some(3)));
        assert!(!descent.is_terminal());

        let first = descent.next().unwrap();
        assert_eq!(descent.iteration(), 1);
        assert_eq!(descent.model(), first);
        // First step from the origin: dw = -2/4 * Σ x*y = -23, db = -2/4 * Σ y = -12.
        assert!((first.w - 0.23).abs() < 1e-12);
        assert!((first.b - 0.12).abs() < 1e-12);

        assert!(descent.next().is_some());
        assert!(descent.next().is_some());
        assert!(descent.is_terminal());
        assert!(descent.next().is_none());
        assert_eq!(descent.iteration(), 3);
    }

    #[test]
    fn every_step_follows_the_public_gradient() {
        let points = line_2x_plus_3();
        let alpha = 0.05;
        let mut descent = Descent::new(&points, hp(alpha, 50), Model::new(1.0, -1.0)).unwrap();

        let mut before = descent.model();
        for after in descent.by_ref() {
            let g = gradient(&points, before.w, before.b).unwrap();
            assert_eq!(after.w.to_bits(), (before.w - alpha * g.dw).to_bits());
            assert_eq!(after.b.to_bits(), (before.b - alpha * g.db).to_bits());
            before = after;
        }
        assert_eq!(descent.iteration(), 50);
        assert_eq!(Descent::new(&points, hp(alpha, 50), Model::new(1.0, -1.0)).unwrap().run(), before);
    }

    #[test]
    fn empty_point_set_fails_before_the_loop() {
        let empty = PointSet::default();
        assert_eq!(fit(&empty, hp(0.01, 10)), Err(FitError::EmptyPointSet));
        assert_eq!(fit(&empty, hp(0.01, 0)), Err(FitError::EmptyPointSet));
        assert!(Descent::new(&empty, hp(0.01, 10), Model::default()).is_err());
        assert_eq!(
            cost_trace(&empty, hp(0.01, 10), Model::default()).map(|(m, _)| m),
            Err(FitError::EmptyPointSet)
        );
    }
}
