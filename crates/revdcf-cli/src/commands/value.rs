//! Value command implementation.
//!
//! Projects earnings at a chosen growth rate and shows how each year and
//! the terminal value contribute to today's valuation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use revdcf_core::DcfProjection;

use crate::cli::OutputFormat;
use crate::commands::{percent, ModelArgs};
use crate::output::{format_amount, print_csv, print_header, print_json, print_table, KeyValue};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Annual earnings growth rate (as percentage, e.g., 20.0 for 20%)
    #[arg(short, long, allow_negative_numbers = true)]
    pub growth: f64,
}

/// One projected year, formatted for display.
#[derive(Debug, Serialize, Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Earnings")]
    cash_flow: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Present Value")]
    present_value: String,
}

/// Execute the value command.
pub fn execute(args: ValueArgs, format: OutputFormat) -> Result<()> {
    let model = args.model.model()?;
    let projection = model.projection(args.growth / 100.0)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "DCF at {} earnings growth",
                percent(projection.growth_rate, 2)
            ));
            print_table(&projection_rows(&projection));
            print_table(&totals(&projection));
        }
        OutputFormat::Json => print_json(&projection)?,
        OutputFormat::Csv => print_csv(&projection_rows(&projection))?,
        OutputFormat::Minimal => println!("{:.2}", projection.present_value),
    }

    Ok(())
}

fn projection_rows(projection: &DcfProjection) -> Vec<ProjectionRow> {
    projection
        .periods
        .iter()
        .map(|p| ProjectionRow {
            year: p.period,
            cash_flow: format_amount(p.cash_flow, 2),
            discount_factor: format!("{:.6}", p.discount_factor),
            present_value: format_amount(p.present_value, 2),
        })
        .collect()
}

fn totals(projection: &DcfProjection) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Terminal Value", format_amount(projection.terminal_value, 2)),
        KeyValue::new(
            "Terminal Value (PV)",
            format_amount(projection.terminal_present_value, 2),
        ),
        KeyValue::new("Terminal Share", percent(projection.terminal_weight(), 1)),
        KeyValue::new("Present Value", format_amount(projection.present_value, 2)),
    ]
}
