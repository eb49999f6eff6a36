//! Line fitting by batch gradient descent.
//!
//! Responsibilities:
//!
//! - run the fixed-budget descent loop (`descent`)
//! - try several learning rates in parallel and pick the best (`sweep`)

pub mod descent;
pub mod sweep;

pub use descent::*;
pub use sweep::*;
