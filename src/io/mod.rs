//! Input/output helpers.
//!
//! - `x,y` text ingest (`ingest`)
//! - cost trace export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
