//! Solve command implementation.
//!
//! Finds the constant earnings growth rate at which a discounted-cash-flow
//! valuation equals the company's current valuation.

use anyhow::Result;
use clap::Args;

use revdcf_core::{
    implied_growth_saturating, implied_growth_with, GrowthRateSolver, ImpliedGrowthReport,
    SolveStatus, ValuationInputs,
};

use crate::cli::OutputFormat;
use crate::commands::{percent, validate_tolerance, ModelArgs};
use crate::output::{
    format_amount, print_csv, print_header, print_json, print_table, print_warning, KeyValue,
};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Current market valuation of the company
    #[arg(long, allow_negative_numbers = true)]
    pub valuation: f64,

    /// Width of the growth-rate interval at which bisection stops
    #[arg(long, env = "REVDCF_TOLERANCE", default_value = "1e-6")]
    pub tolerance: f64,

    /// Report the nearest bound instead of failing when no growth rate in [0%, 100%] fits
    #[arg(long)]
    pub allow_saturation: bool,
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, format: OutputFormat) -> Result<()> {
    let tolerance = validate_tolerance(args.tolerance)?;
    let inputs = ValuationInputs::new(args.model.model()?, args.valuation)?;
    let solver = GrowthRateSolver::new().with_tolerance(tolerance);

    let report = if args.allow_saturation {
        implied_growth_saturating(&inputs, &solver)?
    } else {
        implied_growth_with(&inputs, &solver)?
    };

    match format {
        OutputFormat::Table => {
            if !report.status.is_converged() {
                print_warning(&saturation_warning(&report, solver.bounds()));
            }
            print_header("Implied Earnings Growth");
            print_table(&summary_rows(&report));
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(std::slice::from_ref(&report))?,
        OutputFormat::Minimal => println!("{:.6}", report.implied_growth_rate),
    }

    Ok(())
}

fn summary_rows(report: &ImpliedGrowthReport) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Current Earnings", format_amount(report.current_earnings, 2)),
        KeyValue::new("Discount Rate", percent(report.discount_rate, 2)),
        KeyValue::new("Years", report.years.to_string()),
        KeyValue::new("Terminal P/E Multiple", format_amount(report.terminal_multiple, 2)),
        KeyValue::new("Current Valuation", format_amount(report.target_valuation, 2)),
        KeyValue::new("", ""), // Separator
        KeyValue::new("Implied Growth Rate", percent(report.implied_growth_rate, 2)),
        KeyValue::new(
            format!("Earnings after {} years", report.years),
            format_amount(report.future_earnings, 2),
        ),
        KeyValue::new(
            format!("Market Cap after {} years", report.years),
            format_amount(report.future_market_cap, 0),
        ),
        KeyValue::new(
            format!("Absolute Return after {} years", report.years),
            format!("{:.2}%", report.absolute_return_percent),
        ),
        KeyValue::new("Iterations", report.iterations.to_string()),
    ]
}

fn saturation_warning(report: &ImpliedGrowthReport, (lower, upper): (f64, f64)) -> String {
    let bound = match report.status {
        SolveStatus::SaturatedLow => format!("lower bound of {}", percent(lower, 0)),
        SolveStatus::SaturatedHigh => format!("upper bound of {}", percent(upper, 0)),
        SolveStatus::Converged => return String::new(),
    };
    format!(
        "No growth rate between {} and {} reproduces a valuation of {}; the rate shown is the {bound}, not a solution.",
        percent(lower, 0),
        percent(upper, 0),
        format_amount(report.target_valuation, 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdcf_core::implied_growth;

    fn report(valuation: f64) -> ImpliedGrowthReport {
        let inputs = ValuationInputs::builder()
            .current_earnings(100.0)
            .discount_rate_percent(12.0)
            .years(5)
            .terminal_multiple(15.0)
            .target_valuation(valuation)
            .build()
            .unwrap();
        implied_growth(&inputs).unwrap()
    }

    #[test]
    fn test_summary_rows() {
        let rows = summary_rows(&report(3000.0));
        let growth = rows.iter().find(|r| r.key == "Implied Growth Rate").unwrap();
        assert_eq!(growth.value, "22.43%");

        let cap = rows
            .iter()
            .find(|r| r.key == "Market Cap after 5 years")
            .unwrap();
        assert_eq!(cap.value, "4127");
    }

    #[test]
    fn test_saturation_warning() {
        let mut r = report(3000.0);
        assert!(saturation_warning(&r, (0.0, 1.0)).is_empty());

        r.status = SolveStatus::SaturatedLow;
        assert!(saturation_warning(&r, (0.0, 1.0)).contains("lower bound of 0%"));

        r.status = SolveStatus::SaturatedHigh;
        assert!(saturation_warning(&r, (0.0, 1.0)).contains("upper bound of 100%"));
    }
}
