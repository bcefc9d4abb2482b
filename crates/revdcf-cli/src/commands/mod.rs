//! CLI command implementations.

pub mod solve;
pub mod value;

// Re-export submodules for convenience
pub use solve::SolveArgs;
pub use value::ValueArgs;

use clap::Args;
use revdcf_core::DcfModel;

use crate::error::{CliError, CliResult};

/// Valuation model arguments shared by every command.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Current annual earnings
    #[arg(short, long, allow_negative_numbers = true)]
    pub earnings: f64,

    /// Discount rate / expected rate of return (as percentage, e.g., 12.0 for 12%)
    #[arg(short, long, allow_negative_numbers = true)]
    pub discount_rate: f64,

    /// Projection horizon in years
    #[arg(short, long, default_value = "5")]
    pub years: u32,

    /// Terminal P/E multiple
    #[arg(short, long, allow_negative_numbers = true)]
    pub multiple: f64,
}

impl ModelArgs {
    /// Builds the valuation model, converting the discount rate to a fraction.
    pub fn model(&self) -> CliResult<DcfModel> {
        Ok(DcfModel::new(
            self.earnings,
            self.discount_rate / 100.0,
            self.multiple,
            self.years,
        )?)
    }
}

/// Validates a solver tolerance.
pub fn validate_tolerance(tolerance: f64) -> CliResult<f64> {
    if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
        return Err(CliError::InvalidArgument {
            field: "tolerance",
            reason: format!("must be between 0 and 1 (exclusive), got {tolerance}"),
        });
    }
    Ok(tolerance)
}

/// Formats a fraction as a percentage with `decimals` places.
pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_args_convert_percent() {
        let args = ModelArgs {
            earnings: 100.0,
            discount_rate: 12.0,
            years: 5,
            multiple: 15.0,
        };
        let model = args.model().unwrap();
        assert!((model.discount_rate() - 0.12).abs() < 1e-15);
        assert_eq!(model.years(), 5);
    }

    #[test]
    fn test_model_args_reject_zero_years() {
        let args = ModelArgs {
            earnings: 100.0,
            discount_rate: 12.0,
            years: 0,
            multiple: 15.0,
        };
        assert!(args.model().is_err());
    }

    #[test]
    fn test_validate_tolerance() {
        assert!(validate_tolerance(1e-6).is_ok());
        assert!(validate_tolerance(0.0).is_err());
        assert!(validate_tolerance(1.5).is_err());
        assert!(validate_tolerance(f64::NAN).is_err());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.224_344_7, 2), "22.43%");
        assert_eq!(percent(0.12, 1), "12.0%");
    }
}
