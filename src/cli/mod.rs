//! Command-line parsing for the gradient-descent line fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code. Invalid hyperparameters are rejected here as
//! usage errors, before any data is read.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE, ReportFormat, validate_learning_rate};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gdfit", version, about = "Fit a straight line to x,y points by gradient descent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a line to an `x,y` data file, print a summary, and plot the result.
    Fit(FitArgs),
    /// Write a synthetic `x,y` data file scattered around a known line.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input file with one `x,y` pair per line.
    #[arg(short = 'i', long, default_value = "data.txt")]
    pub input: PathBuf,

    /// Output PNG with the scatter and fitted line.
    #[arg(short = 'o', long, default_value = "out.png")]
    pub output: PathBuf,

    /// Skip writing the PNG.
    #[arg(long)]
    pub no_png: bool,

    /// Number of descent iterations.
    #[arg(short = 'n', long = "iterations", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Learning rate (> 0).
    #[arg(short = 'a', long, default_value_t = DEFAULT_LEARNING_RATE, value_parser = parse_learning_rate, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Initial slope.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub init_w: f64,

    /// Initial intercept.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub init_b: f64,

    /// Try several learning rates in parallel and keep the best (comma-separated).
    ///
    /// Overrides `--alpha`.
    #[arg(long, value_delimiter = ',', value_parser = parse_learning_rate, allow_negative_numbers = true)]
    pub sweep: Vec<f64>,

    /// Print the cost every K iterations.
    #[arg(long, value_name = "K", default_value_t = 100)]
    pub every: usize,

    /// Do not print per-iteration cost.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// PNG width (pixels).
    #[arg(long, default_value_t = 256)]
    pub width: u32,

    /// PNG height (pixels).
    #[arg(long, default_value_t = 256)]
    pub height: u32,

    /// Also render an ASCII plot in the terminal.
    #[arg(long)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub ascii_width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub ascii_height: usize,

    /// Export the per-iteration cost trace to CSV.
    #[arg(long = "export-trace", value_name = "CSV")]
    pub export_trace: Option<PathBuf>,

    /// Summary format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Rows in the largest-residuals table.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output file (`x,y` lines).
    #[arg(short = 'o', long, default_value = "data.txt")]
    pub output: PathBuf,

    /// Number of points.
    #[arg(short = 'c', long, default_value_t = 100)]
    pub count: usize,

    /// Slope of the underlying line.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub slope: f64,

    /// Intercept of the underlying line.
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub intercept: f64,

    /// Smallest x.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise on y.
    #[arg(long, default_value_t = 1.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

fn parse_learning_rate(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.trim().parse().map_err(|e| format!("invalid number '{s}': {e}"))?;
    validate_learning_rate(alpha).map_err(|e| e.to_string())
}
