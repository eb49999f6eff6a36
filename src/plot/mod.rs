//! Rendering of the points and the fitted line.
//!
//! - PNG image via Plotters (`png`)
//! - terminal preview (`ascii`)

pub mod ascii;
pub mod png;

pub use ascii::*;
pub use png::*;
