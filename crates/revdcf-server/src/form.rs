//! Calculator request parsing.
//!
//! The HTML form, the share-link query string and the JSON API all carry the
//! same five inputs, with the discount rate given in percent. Form and query
//! values arrive as text and are parsed here; anything missing or non-numeric
//! is reported before the model is built.

use serde::{Deserialize, Serialize};

use revdcf_core::{ValuationError, ValuationInputs, ValuationResult};

/// The five calculator fields as submitted, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    /// Current annual earnings
    pub current_earnings: Option<String>,
    /// Discount rate in percent
    pub discount_rate: Option<String>,
    /// Projection horizon in whole years
    pub years: Option<String>,
    /// Terminal P/E multiple
    pub terminal_multiple: Option<String>,
    /// Current market valuation
    pub current_valuation: Option<String>,
}

impl FormFields {
    /// True when every field is present and non-blank.
    pub fn is_complete(&self) -> bool {
        self.values().iter().all(|v| v.is_some_and(|s| !s.trim().is_empty()))
    }

    /// Parses every field into a number.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first missing or non-numeric field.
    pub fn parse(&self) -> Result<CalculatorRequest, String> {
        Ok(CalculatorRequest {
            current_earnings: parse_number("current_earnings", &self.current_earnings)?,
            discount_rate: parse_number("discount_rate", &self.discount_rate)?,
            years: parse_integer("years", &self.years)?,
            terminal_multiple: parse_number("terminal_multiple", &self.terminal_multiple)?,
            current_valuation: parse_number("current_valuation", &self.current_valuation)?,
        })
    }

    /// Field values with surrounding whitespace removed, for echoing back into the form.
    pub fn echo(&self) -> FormEcho {
        let show = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
        FormEcho {
            current_earnings: show(&self.current_earnings),
            discount_rate: show(&self.discount_rate),
            years: show(&self.years),
            terminal_multiple: show(&self.terminal_multiple),
            current_valuation: show(&self.current_valuation),
        }
    }

    fn values(&self) -> [Option<&String>; 5] {
        [
            self.current_earnings.as_ref(),
            self.discount_rate.as_ref(),
            self.years.as_ref(),
            self.terminal_multiple.as_ref(),
            self.current_valuation.as_ref(),
        ]
    }
}

/// Submitted values as shown in the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct FormEcho {
    pub current_earnings: String,
    pub discount_rate: String,
    pub years: String,
    pub terminal_multiple: String,
    pub current_valuation: String,
}

/// A parsed calculator request. `discount_rate` is in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CalculatorRequest {
    pub current_earnings: f64,
    pub discount_rate: f64,
    pub years: i64,
    pub terminal_multiple: f64,
    pub current_valuation: f64,
}

impl CalculatorRequest {
    /// Builds validated valuation inputs.
    ///
    /// # Errors
    ///
    /// Returns an error for a horizon below one year or beyond the model's
    /// limit, and for anything [`ValuationInputs`] rejects.
    pub fn to_inputs(&self) -> ValuationResult<ValuationInputs> {
        if self.years < 1 {
            return Err(ValuationError::invalid_input(
                "years",
                format!("must be at least 1, got {}", self.years),
            ));
        }
        let years = u32::try_from(self.years).map_err(|_| {
            ValuationError::invalid_input("years", format!("{} is too large", self.years))
        })?;

        ValuationInputs::from_percent(
            self.current_earnings,
            self.discount_rate,
            years,
            self.terminal_multiple,
            self.current_valuation,
        )
    }

    /// Query string that reproduces this request on `GET /`.
    pub fn query_string(&self) -> String {
        format!(
            "current_earnings={}&discount_rate={}&years={}&terminal_multiple={}&current_valuation={}",
            self.current_earnings,
            self.discount_rate,
            self.years,
            self.terminal_multiple,
            self.current_valuation
        )
    }
}

fn field_text<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(format!("{name} is required")),
    }
}

fn parse_number(name: &str, value: &Option<String>) -> Result<f64, String> {
    let text = field_text(name, value)?;
    text.parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| format!("{name} must be a number, got {text:?}"))
}

fn parse_integer(name: &str, value: &Option<String>) -> Result<i64, String> {
    let text = field_text(name, value)?;
    text.parse::<i64>()
        .map_err(|_| format!("{name} must be a whole number, got {text:?}"))
}
