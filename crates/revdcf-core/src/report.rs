//! End-to-end implied-growth calculation.

use serde::Serialize;

use crate::error::ValuationResult;
use crate::inputs::ValuationInputs;
use crate::metrics::DerivedMetrics;
use crate::solver::{GrowthRateSolver, GrowthSolution, SolveStatus};

/// Everything a caller needs to present an implied-growth calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpliedGrowthReport {
    /// Earnings of the most recent year.
    pub current_earnings: f64,
    /// Discount rate as a fraction.
    pub discount_rate: f64,
    /// Projection horizon in years.
    pub years: u32,
    /// Multiple applied to final-year earnings.
    pub terminal_multiple: f64,
    /// The valuation the growth rate reproduces.
    pub target_valuation: f64,
    /// Constant annual earnings growth implied by the valuation.
    pub implied_growth_rate: f64,
    /// Earnings at the end of the horizon.
    pub future_earnings: f64,
    /// Market capitalization at the end of the horizon.
    pub future_market_cap: f64,
    /// Return from the target valuation to the future market cap, in percent.
    pub absolute_return_percent: f64,
    /// Bisection steps taken.
    pub iterations: u32,
    /// Whether the growth rate is a root or a saturated bound.
    pub status: SolveStatus,
}

impl ImpliedGrowthReport {
    /// Assembles a report from a finished solve.
    pub fn from_solution(inputs: &ValuationInputs, solution: &GrowthSolution) -> Self {
        let metrics = DerivedMetrics::compute(inputs, solution.rate);
        Self {
            current_earnings: inputs.current_earnings(),
            discount_rate: inputs.discount_rate(),
            years: inputs.years(),
            terminal_multiple: inputs.terminal_multiple(),
            target_valuation: inputs.target_valuation(),
            implied_growth_rate: solution.rate,
            future_earnings: metrics.future_earnings,
            future_market_cap: metrics.future_market_cap,
            absolute_return_percent: metrics.absolute_return_percent,
            iterations: solution.iterations,
            status: solution.status,
        }
    }

    /// The derived metrics as a standalone value.
    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics {
            future_earnings: self.future_earnings,
            future_market_cap: self.future_market_cap,
            absolute_return_percent: self.absolute_return_percent,
        }
    }
}

/// Solves for the implied growth rate with the default solver.
///
/// # Errors
///
/// Returns [`ValuationError::UnbracketedRoot`](crate::ValuationError::UnbracketedRoot)
/// when no rate in `[0, 1]` reproduces the target valuation.
pub fn implied_growth(inputs: &ValuationInputs) -> ValuationResult<ImpliedGrowthReport> {
    implied_growth_with(inputs, &GrowthRateSolver::default())
}

/// Solves for the implied growth rate with a configured solver.
pub fn implied_growth_with(
    inputs: &ValuationInputs,
    solver: &GrowthRateSolver,
) -> ValuationResult<ImpliedGrowthReport> {
    let solution = solver.solve(inputs.model(), inputs.target_valuation())?;
    Ok(ImpliedGrowthReport::from_solution(inputs, &solution))
}

/// Like [`implied_growth_with`], but reports a saturated bound instead of
/// failing when the target is out of reach.
pub fn implied_growth_saturating(
    inputs: &ValuationInputs,
    solver: &GrowthRateSolver,
) -> ValuationResult<ImpliedGrowthReport> {
    let solution = solver.solve_saturating(inputs.model(), inputs.target_valuation())?;
    Ok(ImpliedGrowthReport::from_solution(inputs, &solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValuationError;
    use approx::assert_relative_eq;

    fn inputs(target: f64) -> ValuationInputs {
        ValuationInputs::builder()
            .current_earnings(100.0)
            .discount_rate_percent(12.0)
            .years(5)
            .terminal_multiple(15.0)
            .target_valuation(target)
            .build()
            .unwrap()
    }

    #[test]
    fn test_report_fields() {
        let inputs = inputs(3000.0);
        let report = implied_growth(&inputs).unwrap();

        assert_relative_eq!(report.current_earnings, 100.0);
        assert_relative_eq!(report.discount_rate, 0.12);
        assert_eq!(report.years, 5);
        assert_relative_eq!(report.terminal_multiple, 15.0);
        assert_relative_eq!(report.target_valuation, 3000.0);
        assert_eq!(report.status, SolveStatus::Converged);
        assert_eq!(report.iterations, 20);

        let value = inputs.model().present_value(report.implied_growth_rate);
        assert!((value - 3000.0).abs() / 3000.0 < 1e-4);
    }

    #[test]
    fn test_report_metrics_consistent() {
        let inputs = inputs(3000.0);
        let report = implied_growth(&inputs).unwrap();
        let metrics = DerivedMetrics::compute(&inputs, report.implied_growth_rate);
        assert_eq!(report.metrics(), metrics);
    }

    #[test]
    fn test_out_of_reach_target() {
        let inputs = inputs(500.0);
        let err = implied_growth(&inputs).unwrap_err();
        assert!(matches!(err, ValuationError::UnbracketedRoot { .. }));

        let report = implied_growth_saturating(&inputs, &GrowthRateSolver::default()).unwrap();
        assert_eq!(report.status, SolveStatus::SaturatedLow);
        assert!(report.implied_growth_rate < 1e-6);
    }

    #[test]
    fn test_custom_solver() {
        let inputs = inputs(3000.0);
        let solver = GrowthRateSolver::new().with_tolerance(1e-9);
        let report = implied_growth_with(&inputs, &solver).unwrap();
        assert!(report.iterations > 20);
    }

    #[test]
    fn test_report_serializes() {
        let report = implied_growth(&inputs(3000.0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "converged");
        assert!(json["implied_growth_rate"].as_f64().unwrap() > 0.0);
        assert_eq!(json["years"], 5);
    }
}
