//! PNG rendering of the fit using Plotters' bitmap backend.
//!
//! Points are drawn as red crosses; the fitted line is a single segment spanning
//! the data's x-range (padded by 5% on each side).
//!
//! Plotters is built without a font backend, so nothing here may render text:
//! the axes are plain line series along the plot edges and there are no tick
//! labels or captions.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{Model, PointSet};
use crate::error::AppError;
use crate::plot::ascii::x_range;

/// Write a scatter of `points` with the line `y = w*x + b` to a PNG file.
pub fn render_png(path: &Path, points: &PointSet, model: &Model, width: u32, height: u32) -> Result<(), AppError> {
    if width == 0 || height == 0 {
        return Err(AppError::new(2, "Image width and height must be > 0."));
    }
    draw_png(path, points, model, (width, height))
        .map_err(|e| AppError::new(2, format!("Could not plot data to '{}': {e}", path.display())))
}

fn draw_png(
    path: &Path,
    points: &PointSet,
    model: &Model,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let (x0, x1) = x_range(points).map(|(a, b)| pad(a, b)).unwrap_or((0.0, 1.0));
    let segment = [(x0, model.predict(x0)), (x1, model.predict(x1))];
    let (y0, y1) = y_bounds(points, &segment);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).margin(8).build_cartesian_2d(x0..x1, y0..y1)?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x0, y1), (x0, y0), (x1, y0)],
        BLACK,
    )))?;
    chart.draw_series(points.iter().map(|p| Cross::new((p.x, p.y), 3, RED)))?;
    chart.draw_series(LineSeries::new(segment, &BLUE))?;

    root.present()?;
    Ok(())
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let p = (max - min).abs() * 0.05;
    (min - p, max + p)
}

fn y_bounds(points: &PointSet, segment: &[(f64, f64)]) -> (f64, f64) {
    let (lo, hi) = points
        .iter()
        .map(|p| p.y)
        .chain(segment.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));

    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    if hi - lo < 1e-9 {
        return (lo - 0.5, hi + 0.5);
    }
    pad(lo, hi)
}
