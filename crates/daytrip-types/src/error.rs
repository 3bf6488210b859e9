//! Validation errors for request value objects.

use thiserror::Error;

/// Error raised when a value object fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// The trip budget was negative.
    #[error("Budget must be non-negative, got {0}")]
    NegativeBudget(f64),
}
