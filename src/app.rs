//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads points and runs the fit pipeline
//! - prints progress, the summary, and an optional terminal plot
//! - writes the PNG and optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::domain::{FitConfig, Hyperparameters, Model, ReportFormat, SampleConfig};
use crate::error::AppError;
use crate::report::{format_json, format_progress, format_run_summary};

pub mod pipeline;

/// Entry point for the `gdfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `gdfit` and `gdfit -n 500` to behave like `gdfit fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config, |step| println!("{}", format_progress(step)))?;
    let summary = run.summary(config.top_n)?;

    match config.format {
        ReportFormat::Text => {
            println!("{}", format_run_summary(&summary));
            if config.ascii_plot {
                let plot = crate::plot::render_ascii_plot(
                    &run.ingest.points,
                    &run.model,
                    config.ascii_width,
                    config.ascii_height,
                );
                println!("{plot}");
            }
        }
        ReportFormat::Json => println!("{}", format_json(&summary)?),
    }

    if let Some(path) = &config.output {
        crate::plot::render_png(path, &run.ingest.points, &run.model, config.image_width, config.image_height)?;
        info!("wrote plot to '{}'", path.display());
    }
    if let Some(path) = &config.export_trace {
        crate::io::export::write_trace_csv(path, &run.trace)?;
        info!("wrote cost trace to '{}'", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let points = crate::data::generate_sample(&config)?;
    crate::data::write_points(&config.output, &points)?;
    println!("wrote {} points to '{}'", points.len(), config.output.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    // Progress lines would corrupt a JSON document on stdout.
    let progress_every = if args.quiet || args.format == ReportFormat::Json {
        0
    } else {
        args.every
    };

    Ok(FitConfig {
        input: args.input.clone(),
        hyperparameters: Hyperparameters::new(args.alpha, args.iterations)?,
        initial: Model::new(args.init_w, args.init_b),
        sweep: args.sweep.clone(),
        progress_every,
        output: (!args.no_png).then(|| args.output.clone()),
        image_width: args.width,
        image_height: args.height,
        ascii_plot: args.ascii,
        ascii_width: args.ascii_width,
        ascii_height: args.ascii_height,
        export_trace: args.export_trace.clone(),
        format: args.format,
        top_n: args.top,
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        output: args.output.clone(),
        count: args.count,
        slope: args.slope,
        intercept: args.intercept,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    }
}

/// Rewrite argv so `gdfit` defaults to `gdfit fit`.
///
/// Rules:
/// - `gdfit`                       -> `gdfit fit`
/// - `gdfit -n 500 ...`            -> `gdfit fit -n 500 ...`
/// - `gdfit --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
