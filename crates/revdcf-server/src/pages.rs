//! HTML calculator page.

use handlebars::{Handlebars, RenderError};
use serde::Serialize;

use revdcf_core::ImpliedGrowthReport;

use crate::error::ServerError;
use crate::form::FormEcho;

const INDEX: &str = "index";

/// Message shown when a submitted field is missing or is not a number.
pub const INVALID_INPUT_MESSAGE: &str = "Please provide valid numeric inputs.";

/// Compiled page templates.
pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    /// Compiles the page templates.
    pub fn new() -> Result<Self, ServerError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(INDEX, include_str!("../templates/index.hbs"))
            .map_err(|e| ServerError::Template(e.to_string()))?;
        Ok(Self { registry })
    }

    /// Renders the calculator page.
    pub fn index(&self, view: &IndexView) -> Result<String, RenderError> {
        self.registry.render(INDEX, view)
    }
}

/// Everything the calculator page shows.
#[derive(Debug, Default, Serialize)]
pub struct IndexView {
    /// Values to pre-fill the form with
    pub form: FormEcho,
    /// Message shown under the form
    pub error: Option<String>,
    /// Calculation result, if one was made
    pub result: Option<ResultView>,
}

impl IndexView {
    /// An empty form, or one pre-filled with earlier input.
    pub fn form(form: FormEcho) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// The form with an error message beneath it.
    pub fn with_error(form: FormEcho, error: impl Into<String>) -> Self {
        Self {
            form,
            error: Some(error.into()),
            result: None,
        }
    }

    /// The form followed by a result.
    pub fn with_result(form: FormEcho, result: ResultView) -> Self {
        Self {
            form,
            error: None,
            result: Some(result),
        }
    }
}

/// A result, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    current_earnings: String,
    discount_rate: String,
    years: u32,
    terminal_multiple: String,
    current_valuation: String,
    growth_percent: String,
    future_earnings: String,
    market_cap: String,
    absolute_return: String,
    earnings_rounded: String,
    valuation_rounded: String,
    multiple_rounded: String,
    share_url: String,
}

impl ResultView {
    /// Formats a report; `share_url` is the link that reproduces it.
    pub fn new(report: &ImpliedGrowthReport, share_url: String) -> Self {
        Self {
            current_earnings: report.current_earnings.to_string(),
            discount_rate: trimmed(report.discount_rate * 100.0, 6),
            years: report.years,
            terminal_multiple: report.terminal_multiple.to_string(),
            current_valuation: report.target_valuation.to_string(),
            growth_percent: format!("{:.2}", report.implied_growth_rate * 100.0),
            future_earnings: format!("{:.0}", report.future_earnings),
            market_cap: format!("{:.0}", report.future_market_cap),
            absolute_return: format!("{:.2}", report.absolute_return_percent),
            earnings_rounded: format!("{:.0}", report.current_earnings),
            valuation_rounded: format!("{:.0}", report.target_valuation),
            multiple_rounded: format!("{:.0}", report.terminal_multiple),
            share_url,
        }
    }
}

/// Fixed-point with at most `decimals` places and no trailing zeros.
fn trimmed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdcf_core::{implied_growth, ValuationInputs};

    fn report() -> ImpliedGrowthReport {
        let inputs = ValuationInputs::builder()
            .current_earnings(100.0)
            .discount_rate_percent(12.0)
            .years(5)
            .terminal_multiple(15.0)
            .target_valuation(3000.0)
            .build()
            .unwrap();
        implied_growth(&inputs).unwrap()
    }

    #[test]
    fn test_result_view_rounding() {
        let view = ResultView::new(&report(), "http://localhost/?x=1".into());
        assert_eq!(view.growth_percent, "22.43");
        assert_eq!(view.future_earnings, "275");
        assert_eq!(view.market_cap, "4127");
        assert_eq!(view.absolute_return, "37.56");
        assert_eq!(view.discount_rate, "12");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(0.07 * 100.0, 6), "7");
        assert_eq!(trimmed(12.5, 6), "12.5");
        assert_eq!(trimmed(-3.0, 2), "-3");
    }

    #[test]
    fn test_render_empty_form() {
        let pages = Pages::new().unwrap();
        let html = pages.index(&IndexView::default()).unwrap();
        assert!(html.contains("Implied Earnings Growth Calculator"));
        assert!(!html.contains("Share This Link"));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn test_render_result() {
        let pages = Pages::new().unwrap();
        let view = IndexView::with_result(
            FormEcho::default(),
            ResultView::new(&report(), "http://localhost:8080/?years=5".into()),
        );
        let html = pages.index(&view).unwrap();
        assert!(html.contains("The implied earnings growth rate is 22.43%"));
        assert!(html.contains("after 5 years: 4127"));
        assert!(html.contains("Share This Link"));
    }

    #[test]
    fn test_render_escapes_input() {
        let pages = Pages::new().unwrap();
        let form = FormEcho {
            current_earnings: "<script>alert(1)</script>".into(),
            ..FormEcho::default()
        };
        let html = pages
            .index(&IndexView::with_error(form, INVALID_INPUT_MESSAGE))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(INVALID_INPUT_MESSAGE));
    }
}
