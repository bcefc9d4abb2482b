//! Closed-form metrics derived from an implied growth rate.

use serde::Serialize;

use crate::inputs::ValuationInputs;

/// What the implied growth rate means for the business at the end of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// `E · (1 + g)^n`.
    pub future_earnings: f64,
    /// Future earnings times the terminal multiple.
    pub future_market_cap: f64,
    /// Percentage change from the target valuation to the future market cap.
    pub absolute_return_percent: f64,
}

impl DerivedMetrics {
    /// Computes the metrics for `inputs` at `growth_rate`.
    ///
    /// `inputs` guarantees a non-zero target valuation, so the return is
    /// always defined.
    pub fn compute(inputs: &ValuationInputs, growth_rate: f64) -> Self {
        let years = inputs.years() as i32;
        let future_earnings = inputs.current_earnings() * (1.0 + growth_rate).powi(years);
        let future_market_cap = future_earnings * inputs.terminal_multiple();
        let target = inputs.target_valuation();
        let absolute_return_percent = 100.0 * (future_market_cap - target) / target;

        Self {
            future_earnings,
            future_market_cap,
            absolute_return_percent,
        }
    }
}
