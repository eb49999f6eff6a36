//! Mathematical utilities: the MSE cost and its gradient.

pub mod loss;

pub use loss::*;
