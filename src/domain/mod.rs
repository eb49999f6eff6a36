//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Point`, `PointSet`)
//! - the fitted line and its gradient (`Model`, `Gradient`)
//! - descent settings (`Hyperparameters`)
//! - run configuration (`FitConfig`, `SampleConfig`, `ReportFormat`)

pub mod types;

pub use types::*;
