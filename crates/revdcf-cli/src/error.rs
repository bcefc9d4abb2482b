//! CLI error types.

use revdcf_core::ValuationError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument is outside the range the command accepts.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The valuation could not be computed.
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
