//! Discounted-cash-flow valuation of a growing earnings stream.
//!
//! Earnings grow at a constant rate `g` for `n` years. Each year's earnings
//! are discounted at rate `d`, and the final year's earnings times a
//! terminal multiple stand in for everything after the horizon:
//!
//! ```text
//! PV(g) = Σ_{t=1..n} E(1+g)^t / (1+d)^t  +  E(1+g)^n · M / (1+d)^n
//! ```
//!
//! For positive earnings, `d > -1` and `M >= 0` this is non-decreasing in
//! `g`, which is what lets [`GrowthRateSolver`](crate::GrowthRateSolver)
//! bisect it.

use serde::Serialize;

use crate::error::{require_finite, ValuationError, ValuationResult};

/// Longest projection horizon accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// Parameters of a DCF valuation that stay fixed while the growth rate varies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DcfModel {
    current_earnings: f64,
    discount_rate: f64,
    terminal_multiple: f64,
    years: u32,
}

impl DcfModel {
    /// Creates a model after checking that every parameter can be evaluated.
    ///
    /// # Arguments
    ///
    /// * `current_earnings` - Earnings of the most recent year
    /// * `discount_rate` - Required annual return as a fraction (0.12 for 12%)
    /// * `terminal_multiple` - Multiple applied to final-year earnings
    /// * `years` - Projection horizon, `1..=MAX_HORIZON_YEARS`
    pub fn new(
        current_earnings: f64,
        discount_rate: f64,
        terminal_multiple: f64,
        years: u32,
    ) -> ValuationResult<Self> {
        require_finite("current_earnings", current_earnings)?;
        require_finite("discount_rate", discount_rate)?;
        require_finite("terminal_multiple", terminal_multiple)?;

        if discount_rate == -1.0 {
            return Err(ValuationError::degenerate_input(
                "discount_rate",
                "a rate of -100% makes every discount factor divide by zero",
            ));
        }
        if discount_rate < -1.0 {
            return Err(ValuationError::invalid_input(
                "discount_rate",
                format!("must be greater than -100%, got {}%", discount_rate * 100.0),
            ));
        }
        if years == 0 {
            return Err(ValuationError::invalid_input(
                "years",
                "must be at least 1",
            ));
        }
        if years > MAX_HORIZON_YEARS {
            return Err(ValuationError::invalid_input(
                "years",
                format!("must be at most {MAX_HORIZON_YEARS}, got {years}"),
            ));
        }

        Ok(Self {
            current_earnings,
            discount_rate,
            terminal_multiple,
            years,
        })
    }

    /// Earnings of the most recent year.
    pub const fn current_earnings(&self) -> f64 {
        self.current_earnings
    }

    /// Discount rate as a fraction.
    pub const fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Multiple applied to final-year earnings.
    pub const fn terminal_multiple(&self) -> f64 {
        self.terminal_multiple
    }

    /// Projection horizon in years.
    pub const fn years(&self) -> u32 {
        self.years
    }

    // Bounded by MAX_HORIZON_YEARS, so the cast cannot wrap.
    const fn horizon(&self) -> i32 {
        self.years as i32
    }

    /// Present value of the business if earnings grow at `rate` every year.
    ///
    /// `rate` must be greater than -1; use [`try_present_value`](Self::try_present_value)
    /// when it comes from outside.
    pub fn present_value(&self, rate: f64) -> f64 {
        let growth = 1.0 + rate;
        let discount = 1.0 + self.discount_rate;
        let n = self.horizon();

        let mut pv = 0.0;
        for t in 1..=n {
            pv += self.current_earnings * growth.powi(t) / discount.powi(t);
        }

        let terminal_value = self.current_earnings * growth.powi(n) * self.terminal_multiple;
        pv + terminal_value / discount.powi(n)
    }

    /// [`present_value`](Self::present_value) with the growth rate checked first.
    pub fn try_present_value(&self, rate: f64) -> ValuationResult<f64> {
        check_growth_rate(rate)?;
        Ok(self.present_value(rate))
    }

    /// Year-by-year breakdown of the valuation at `rate`.
    pub fn projection(&self, rate: f64) -> ValuationResult<DcfProjection> {
        check_growth_rate(rate)?;

        let growth = 1.0 + rate;
        let discount = 1.0 + self.discount_rate;
        let n = self.horizon();

        let mut periods = Vec::with_capacity(self.years as usize);
        let mut pv = 0.0;
        for t in 1..=n {
            let cash_flow = self.current_earnings * growth.powi(t);
            let compounded = discount.powi(t);
            let present_value = cash_flow / compounded;
            pv += present_value;
            periods.push(ProjectedCashFlow {
                period: t as u32,
                cash_flow,
                discount_factor: 1.0 / compounded,
                present_value,
            });
        }

        let terminal_value = self.current_earnings * growth.powi(n) * self.terminal_multiple;
        let terminal_present_value = terminal_value / discount.powi(n);

        Ok(DcfProjection {
            growth_rate: rate,
            periods,
            terminal_value,
            terminal_present_value,
            present_value: pv + terminal_present_value,
        })
    }
}

fn check_growth_rate(rate: f64) -> ValuationResult<()> {
    require_finite("growth_rate", rate)?;
    if rate <= -1.0 {
        return Err(ValuationError::invalid_input(
            "growth_rate",
            format!("must be greater than -100%, got {}%", rate * 100.0),
        ));
    }
    Ok(())
}

/// One projected year of a DCF valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedCashFlow {
    /// Year number, starting at 1.
    pub period: u32,
    /// Projected earnings for the year.
    pub cash_flow: f64,
    /// `1 / (1 + d)^t`.
    pub discount_factor: f64,
    /// Discounted earnings for the year.
    pub present_value: f64,
}

/// Full breakdown of a DCF valuation at one growth rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcfProjection {
    /// The growth rate the projection was made at.
    pub growth_rate: f64,
    /// Projected years, in order.
    pub periods: Vec<ProjectedCashFlow>,
    /// Final-year earnings times the terminal multiple.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub terminal_present_value: f64,
    /// Sum of all discounted cash flows and the discounted terminal value.
    pub present_value: f64,
}

impl DcfProjection {
    /// Projected earnings for each year.
    pub fn cash_flows(&self) -> impl Iterator<Item = f64> + '_ {
        self.periods.iter().map(|p| p.cash_flow)
    }

    /// Share of the present value that comes from the terminal value.
    pub fn terminal_weight(&self) -> f64 {
        self.terminal_present_value / self.present_value
    }
}
