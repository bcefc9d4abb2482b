//! RevDCF CLI - Command-line interface for reverse DCF valuation.
//!
//! # Usage
//!
//! ```bash
//! # Growth rate implied by a 3000 valuation of a company earning 100
//! revdcf solve --earnings 100 --discount-rate 12 --years 5 --multiple 15 --valuation 3000
//!
//! # Same, as JSON
//! revdcf --format json solve -e 100 -d 12 -y 5 -m 15 --valuation 3000
//!
//! # Year-by-year DCF at a chosen growth rate
//! revdcf value --earnings 100 --discount-rate 12 --years 5 --multiple 15 --growth 20
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = cli.format;

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, format)?,
        Commands::Value(args) => commands::value::execute(args, format)?,
    }

    Ok(())
}
