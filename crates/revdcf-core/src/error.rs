//! Error types for valuation calculations.

use revdcf_math::MathError;
use thiserror::Error;

/// A specialized Result type for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Errors that can occur while valuing a company or solving for its growth rate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// An input is missing, non-finite, or outside its domain.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// An input that would divide by zero somewhere in the calculation.
    #[error("Degenerate {field}: {reason}")]
    DegenerateInput {
        /// Name of the offending input.
        field: &'static str,
        /// Which division it breaks.
        reason: String,
    },

    /// No growth rate in the search interval reproduces the target valuation.
    #[error(
        "Target valuation {target:.2} lies outside [{lower_value:.2}, {upper_value:.2}], \
         the range of values for growth rates between {lower_rate} and {upper_rate}"
    )]
    UnbracketedRoot {
        /// The valuation that was asked for.
        target: f64,
        /// Lower end of the growth-rate search interval.
        lower_rate: f64,
        /// Upper end of the growth-rate search interval.
        upper_rate: f64,
        /// Model value at the lower rate.
        lower_value: f64,
        /// Model value at the upper rate.
        upper_value: f64,
    },

    /// The underlying solver failed.
    #[error("Solver error: {0}")]
    Math(#[from] MathError),
}

impl ValuationError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an error for a required input that was not supplied.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::invalid_input(field, "is required")
    }

    /// Creates a degenerate input error.
    #[must_use]
    pub fn degenerate_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            field,
            reason: reason.into(),
        }
    }

    /// The input field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } | Self::DegenerateInput { field, .. } => Some(field),
            Self::UnbracketedRoot { .. } | Self::Math(_) => None,
        }
    }

    /// Whether the error was caused by the inputs rather than by the solve.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::DegenerateInput { .. }
        )
    }
}

/// Fails with [`ValuationError::InvalidInput`] unless `value` is finite.
pub(crate) fn require_finite(field: &'static str, value: f64) -> ValuationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::invalid_input(
            field,
            format!("must be a finite number, got {value}"),
        ))
    }
}
