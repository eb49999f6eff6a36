//! `gd-line` library crate.
//!
//! Fits `y = w*x + b` to a set of points with plain batch gradient descent on
//! mean-squared error, and renders the result.
//!
//! The binary (`gdfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitting core (`math`, `fit`) has no I/O and can be reused on its own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
