//! Integration tests for the implied-growth calculation.
//!
//! Covers the worked scenarios the calculator is expected to reproduce and
//! the structural properties (monotonicity, root accuracy, saturation,
//! determinism) the bisection relies on.

use approx::assert_relative_eq;
use proptest::prelude::*;

use revdcf_core::prelude::*;

fn model(discount_rate: f64) -> DcfModel {
    DcfModel::new(100.0, discount_rate, 15.0, 5).unwrap()
}

fn inputs(discount_rate: f64, target: f64) -> ValuationInputs {
    ValuationInputs::new(model(discount_rate), target).unwrap()
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn scenario_target_equals_zero_growth_value() {
    let target = model(0.10).present_value(0.0);
    let report = implied_growth(&inputs(0.10, target)).unwrap();

    assert!(report.implied_growth_rate >= 0.0);
    assert!(report.implied_growth_rate <= 1e-6);
}

#[test]
fn scenario_target_equals_full_growth_value() {
    let target = model(0.10).present_value(1.0);
    let report = implied_growth(&inputs(0.10, target)).unwrap();

    assert!(report.implied_growth_rate >= 0.999_999);
    assert!(report.implied_growth_rate < 1.0);
}

#[test]
fn scenario_twelve_percent_discount_three_thousand_target() {
    let m = model(0.12);

    // The target sits between the values at a few sample rates.
    assert!(m.present_value(0.0) < 3000.0);
    assert!(m.present_value(0.5) > 3000.0);

    let report = implied_growth(&inputs(0.12, 3000.0)).unwrap();
    let rate = report.implied_growth_rate;

    assert!(m.present_value(rate - 0.01) < 3000.0);
    assert!(m.present_value(rate + 0.01) > 3000.0);
    assert!((m.present_value(rate) - 3000.0).abs() / 3000.0 < 1e-4);
}

#[test]
fn scenario_derived_metrics_match_inline_formula() {
    let report = implied_growth(&inputs(0.12, 3000.0)).unwrap();
    let rate = report.implied_growth_rate;

    let inline_cap = 100.0 * (1.0 + rate).powi(5) * 15.0;
    assert_relative_eq!(report.future_market_cap, inline_cap, max_relative = 1e-12);
    assert_relative_eq!(
        report.absolute_return_percent,
        100.0 * (inline_cap - 3000.0) / 3000.0,
        max_relative = 1e-12
    );
}

#[test]
fn scenario_out_of_range_target_is_reported() {
    let err = implied_growth(&inputs(0.12, 100.0)).unwrap_err();
    assert!(matches!(err, ValuationError::UnbracketedRoot { .. }));
    assert!(err.to_string().contains("outside"));
}

#[test]
fn scenario_longer_horizon_needs_less_growth() {
    let short = implied_growth(
        &ValuationInputs::new(DcfModel::new(100.0, 0.12, 15.0, 5).unwrap(), 3000.0).unwrap(),
    )
    .unwrap();
    let long = implied_growth(
        &ValuationInputs::new(DcfModel::new(100.0, 0.12, 15.0, 10).unwrap(), 3000.0).unwrap(),
    )
    .unwrap();

    assert!(long.implied_growth_rate < short.implied_growth_rate);
}

// ============================================================================
// Properties
// ============================================================================

fn model_strategy() -> impl Strategy<Value = DcfModel> {
    (1.0f64..1e6, -0.5f64..1.0, 0.0f64..100.0, 1u32..=30).prop_map(
        |(earnings, discount, multiple, years)| {
            DcfModel::new(earnings, discount, multiple, years).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn prop_value_non_decreasing_in_rate(
        m in model_strategy(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let v_lo = m.present_value(lo);
        let v_hi = m.present_value(hi);
        prop_assert!(v_lo <= v_hi * (1.0 + 1e-12));
    }

    #[test]
    fn prop_solver_recovers_value(m in model_strategy(), rate in 0.01f64..0.99) {
        let target = m.present_value(rate);
        let solution = GrowthRateSolver::new().solve(&m, target).unwrap();
        let value = m.present_value(solution.rate);
        prop_assert!((value - target).abs() / target < 1e-4);
        prop_assert!((solution.rate - rate).abs() <= 1e-6);
    }

    #[test]
    fn prop_saturates_below_range(m in model_strategy(), shortfall in 0.01f64..0.99) {
        let target = m.present_value(0.0) * (1.0 - shortfall);
        let solution = GrowthRateSolver::new().solve_saturating(&m, target).unwrap();
        prop_assert!(solution.rate <= 1e-6);
        prop_assert_eq!(solution.status, SolveStatus::SaturatedLow);
    }

    #[test]
    fn prop_saturates_above_range(m in model_strategy(), excess in 0.01f64..10.0) {
        let target = m.present_value(1.0) * (1.0 + excess);
        let solution = GrowthRateSolver::new().solve_saturating(&m, target).unwrap();
        prop_assert!(solution.rate >= 1.0 - 1e-6);
        prop_assert_eq!(solution.status, SolveStatus::SaturatedHigh);
    }

    #[test]
    fn prop_solve_is_deterministic(m in model_strategy(), rate in 0.0f64..1.0) {
        let target = m.present_value(rate);
        let solver = GrowthRateSolver::new();
        prop_assert_eq!(solver.solve(&m, target).unwrap(), solver.solve(&m, target).unwrap());
    }
}
