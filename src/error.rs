//! Error types.
//!
//! - `FitError`: precondition failures of the fitting core (cost, gradient, descent)
//! - `AppError`: what the binary reports (message + process exit code)

/// Invalid input to the fitting core.
///
/// These are never retried or papered over with defaults: the caller decides
/// whether to abort or try again with corrected inputs.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Cost and gradient are `0/0` over an empty point set.
    #[error("invalid input: the point set is empty (cost and gradient are undefined)")]
    EmptyPointSet,

    /// The learning rate must be finite and strictly positive.
    #[error("invalid input: learning rate must be finite and > 0 (got {0})")]
    InvalidLearningRate(f64),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_invalid_input_exit_code() {
        let err: AppError = FitError::EmptyPointSet.into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("empty"));

        let err: AppError = FitError::InvalidLearningRate(-0.5).into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("-0.5"));
    }
}
