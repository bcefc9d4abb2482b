//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{SolveArgs, ValueArgs};

/// RevDCF - Implied earnings growth from a reverse DCF
#[derive(Parser)]
#[command(name = "revdcf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Solve for the earnings growth rate implied by a valuation
    Solve(SolveArgs),

    /// Value a company at a given earnings growth rate
    Value(ValueArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
