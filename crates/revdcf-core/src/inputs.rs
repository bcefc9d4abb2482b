//! Validated inputs for an implied-growth calculation.

use serde::Serialize;

use crate::dcf::DcfModel;
use crate::error::{require_finite, ValuationError, ValuationResult};

/// Projection horizon used when none is given.
pub const DEFAULT_YEARS: u32 = 5;

/// The five scalars of a reverse DCF: a valuation model and the market
/// value it has to match.
///
/// Holding a `ValuationInputs` means every boundary check has passed, so
/// the solver and the derived metrics never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationInputs {
    #[serde(flatten)]
    model: DcfModel,
    target_valuation: f64,
}

impl ValuationInputs {
    /// Pairs a model with the valuation it should reproduce.
    pub fn new(model: DcfModel, target_valuation: f64) -> ValuationResult<Self> {
        require_finite("target_valuation", target_valuation)?;
        if target_valuation == 0.0 {
            return Err(ValuationError::degenerate_input(
                "target_valuation",
                "a zero valuation makes the absolute return undefined",
            ));
        }
        Ok(Self {
            model,
            target_valuation,
        })
    }

    /// Builds inputs from the calculator's five fields, with the discount
    /// rate given in percent (12.0 for 12%).
    pub fn from_percent(
        current_earnings: f64,
        discount_rate_percent: f64,
        years: u32,
        terminal_multiple: f64,
        target_valuation: f64,
    ) -> ValuationResult<Self> {
        let model = DcfModel::new(
            current_earnings,
            discount_rate_percent / 100.0,
            terminal_multiple,
            years,
        )?;
        Self::new(model, target_valuation)
    }

    /// Creates a new builder.
    pub fn builder() -> ValuationInputsBuilder {
        ValuationInputsBuilder::default()
    }

    /// The valuation model.
    pub const fn model(&self) -> &DcfModel {
        &self.model
    }

    /// The market valuation to match.
    pub const fn target_valuation(&self) -> f64 {
        self.target_valuation
    }

    /// Earnings of the most recent year.
    pub const fn current_earnings(&self) -> f64 {
        self.model.current_earnings()
    }

    /// Discount rate as a fraction.
    pub const fn discount_rate(&self) -> f64 {
        self.model.discount_rate()
    }

    /// Multiple applied to final-year earnings.
    pub const fn terminal_multiple(&self) -> f64 {
        self.model.terminal_multiple()
    }

    /// Projection horizon in years.
    pub const fn years(&self) -> u32 {
        self.model.years()
    }
}

/// Builder for [`ValuationInputs`].
#[derive(Debug, Clone, Default)]
pub struct ValuationInputsBuilder {
    current_earnings: Option<f64>,
    discount_rate: Option<f64>,
    terminal_multiple: Option<f64>,
    years: Option<u32>,
    target_valuation: Option<f64>,
}

impl ValuationInputsBuilder {
    /// Sets the current earnings.
    pub fn current_earnings(mut self, value: f64) -> Self {
        self.current_earnings = Some(value);
        self
    }

    /// Sets the discount rate as a fraction (0.12 for 12%).
    pub fn discount_rate(mut self, value: f64) -> Self {
        self.discount_rate = Some(value);
        self
    }

    /// Sets the discount rate as a percentage (12.0 for 12%).
    pub fn discount_rate_percent(mut self, value: f64) -> Self {
        self.discount_rate = Some(value / 100.0);
        self
    }

    /// Sets the terminal multiple.
    pub fn terminal_multiple(mut self, value: f64) -> Self {
        self.terminal_multiple = Some(value);
        self
    }

    /// Sets the projection horizon. Defaults to [`DEFAULT_YEARS`].
    pub fn years(mut self, value: u32) -> Self {
        self.years = Some(value);
        self
    }

    /// Sets the valuation to match.
    pub fn target_valuation(mut self, value: f64) -> Self {
        self.target_valuation = Some(value);
        self
    }

    /// Builds the inputs.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first field that is missing or invalid.
    pub fn build(self) -> ValuationResult<ValuationInputs> {
        let current_earnings = self
            .current_earnings
            .ok_or_else(|| ValuationError::missing_field("current_earnings"))?;
        let discount_rate = self
            .discount_rate
            .ok_or_else(|| ValuationError::missing_field("discount_rate"))?;
        let terminal_multiple = self
            .terminal_multiple
            .ok_or_else(|| ValuationError::missing_field("terminal_multiple"))?;
        let target_valuation = self
            .target_valuation
            .ok_or_else(|| ValuationError::missing_field("target_valuation"))?;
        let years = self.years.unwrap_or(DEFAULT_YEARS);

        let model = DcfModel::new(current_earnings, discount_rate, terminal_multiple, years)?;
        ValuationInputs::new(model, target_valuation)
    }
}
