//! Synthetic `x,y` sample generation: points scattered around a known line.
//!
//! Useful for trying the fitter without external data; the output file is in
//! exactly the format `io::ingest` reads back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point, PointSet, SampleConfig};
use crate::error::AppError;

/// Draw `count` points with `x ~ U[x_min, x_max]` and
/// `y = slope * x + intercept + N(0, noise²)`.
///
/// Deterministic for a given seed.
pub fn generate_sample(config: &SampleConfig) -> Result<PointSet, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(config.slope.is_finite() && config.intercept.is_finite()) {
        return Err(AppError::new(2, "Slope and intercept must be finite."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut points = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let x = rng.gen_range(config.x_min..=config.x_max);
        let y = config.slope * x + config.intercept + normal.sample(&mut rng);
        points.push(Point::new(x, y));
    }

    Ok(PointSet::new(points))
}

/// Write points as `x,y` lines.
pub fn write_points(path: &Path, points: &PointSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    write_lines(BufWriter::new(file), points)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}

fn write_lines<W: Write>(mut out: W, points: &PointSet) -> std::io::Result<()> {
    for p in points {
        writeln!(out, "{},{}", p.x, p.y)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_points;
    use std::path::PathBuf;

    fn config(seed: u64) -> SampleConfig {
        SampleConfig {
            output: PathBuf::from("unused.txt"),
            count: 200,
            slope: 2.0,
            intercept: 3.0,
            x_min: 0.0,
            x_max: 20.0,
            noise: 1.0,
            seed,
        }
    }

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let a = generate_sample(&config(42)).unwrap();
        let b = generate_sample(&config(42)).unwrap();
        let c = generate_sample(&config(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 200);
    }

    #[test]
    fn points_stay_in_range_and_near_the_line() {
        let points = generate_sample(&config(1)).unwrap();
        let stats = points.stats().unwrap();
        assert!(stats.x_min >= 0.0 && stats.x_max <= 20.0);

        let mean_residual: f64 =
            points.iter().map(|p| p.y - (2.0 * p.x + 3.0)).sum::<f64>() / points.len() as f64;
        assert!(mean_residual.abs() < 0.5, "mean residual {mean_residual}");
    }

    #[test]
    fn zero_noise_lands_exactly_on_the_line() {
        let points = generate_sample(&SampleConfig { noise: 0.0, ..config(5) }).unwrap();
        assert!(points.iter().all(|p| p.y == 2.0 * p.x + 3.0));
    }

    #[test]
    fn written_lines_read_back_identically() {
        let points = generate_sample(&config(9)).unwrap();
        let mut buf = Vec::new();
        write_lines(&mut buf, &points).unwrap();

        let ingested = read_points(buf.as_slice()).unwrap();
        assert!(ingested.row_errors.is_empty());
        assert_eq!(ingested.points, points);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(generate_sample(&SampleConfig { count: 0, ..config(1) }).is_err());
        assert!(generate_sample(&SampleConfig { x_min: 5.0, x_max: 5.0, ..config(1) }).is_err());
        assert!(generate_sample(&SampleConfig { noise: -1.0, ..config(1) }).is_err());
    }
}
