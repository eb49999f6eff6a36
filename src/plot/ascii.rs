//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `x`
//! - fitted line: `-`

use crate::domain::{Model, PointSet};

/// Render the points and the fitted line `y = w*x + b` over the data's x-range.
pub fn render_ascii_plot(points: &PointSet, model: &Model, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(points).unwrap_or((0.0, 1.0));
    let line = sample_line(model, x_min, x_max, width);

    // Determine y-range from observed points and line points.
    let (y_min, y_max) = y_range(points, &line).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first (so points can overlay).
    draw_polyline(&mut grid, &line, x_min, x_max, y_min, y_max);

    for p in points {
        let col = map_x(p.x, x_min, x_max, width);
        let row = map_y(p.y, y_min, y_max, height);
        grid[row][col] = 'x';
    }

    let mut out = format!("Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n");
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Data x-range; a single distinct x is widened by half a unit on each side.
pub(crate) fn x_range(points: &PointSet) -> Option<(f64, f64)> {
    let stats = points.stats()?;
    let (mut x0, mut x1) = (stats.x_min, stats.x_max);
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    Some((x0, x1))
}

fn sample_line(model: &Model, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, model.predict(x))
        })
        .collect()
}

fn y_range(points: &PointSet, line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    for &(_, y) in line {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    // A flat plot is centred in a unit band around its single y value.
    if max_y - min_y < 1e-9 {
        return Some((min_y - 0.5, max_y + 0.5));
    }
    Some((min_y, max_y))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], line: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if line.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in line {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_segment(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_segment(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn plot_golden_snapshot_small() {
        let points: PointSet = vec![Point::new(1.0, 100.0), Point::new(10.0, 110.0)].into();
        let model = Model::new(0.0, 100.0);

        let txt = render_ascii_plot(&points, &model, 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "         x\n",
            "          \n",
            "          \n",
            "          \n",
            "x---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_data_is_centred_around_its_y_value() {
        let points: PointSet = vec![Point::new(0.0, 100.0), Point::new(1.0, 100.0)].into();
        let txt = render_ascii_plot(&points, &Model::new(0.0, 100.0), 10, 5);
        let (header, grid) = txt.split_once('\n').unwrap();
        assert!(header.starts_with("Plot: x=[0.000, 1.000] | y=[99.4"), "{header}");
        assert!(header.contains(", 100.5"), "{header}");
        let expected = concat!(
            "          \n",
            "          \n",
            "x--------x\n",
            "          \n",
            "          \n",
        );
        assert_eq!(grid, expected);
    }

    #[test]
    fn single_x_value_is_widened() {
        let points: PointSet = vec![Point::new(2.0, 1.0), Point::new(2.0, 3.0)].into();
        assert_eq!(x_range(&points), Some((1.5, 2.5)));
        assert_eq!(x_range(&PointSet::default()), None);

        // Still renders a full grid.
        let txt = render_ascii_plot(&points, &Model::new(0.0, 2.0), 12, 6);
        assert_eq!(txt.lines().count(), 7);
    }
}
