//! # RevDCF Core
//!
//! Reverse discounted-cash-flow valuation: given what the market pays for a
//! company today, find the constant earnings growth rate that justifies it.
//!
//! This crate provides:
//!
//! - **Valuation model**: [`DcfModel`] projects earnings at a trial growth rate
//!   and discounts them, plus a terminal value, back to today
//! - **Inputs**: [`ValuationInputs`] holds the five validated scalars of a calculation
//! - **Solver**: [`GrowthRateSolver`] bisects the growth rate that reproduces a
//!   target valuation and reports when no such rate exists in its interval
//! - **Metrics**: [`DerivedMetrics`] turns the implied rate into future earnings,
//!   future market capitalization and absolute return
//!
//! ## Example
//!
//! ```rust
//! use revdcf_core::prelude::*;
//!
//! let inputs = ValuationInputs::builder()
//!     .current_earnings(100.0)
//!     .discount_rate_percent(12.0)
//!     .years(5)
//!     .terminal_multiple(15.0)
//!     .target_valuation(3000.0)
//!     .build()
//!     .unwrap();
//!
//! let report = implied_growth(&inputs).unwrap();
//! assert!(report.implied_growth_rate > 0.0 && report.implied_growth_rate < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod dcf;
pub mod error;
pub mod inputs;
pub mod metrics;
pub mod report;
pub mod solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dcf::{DcfModel, DcfProjection, ProjectedCashFlow, MAX_HORIZON_YEARS};
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::inputs::{ValuationInputs, ValuationInputsBuilder, DEFAULT_YEARS};
    pub use crate::metrics::DerivedMetrics;
    pub use crate::report::{
        implied_growth, implied_growth_saturating, implied_growth_with, ImpliedGrowthReport,
    };
    pub use crate::solver::{GrowthRateSolver, GrowthSolution, SolveStatus, DEFAULT_GROWTH_BOUNDS};
}

pub use dcf::{DcfModel, DcfProjection, ProjectedCashFlow};
pub use error::{ValuationError, ValuationResult};
pub use inputs::{ValuationInputs, ValuationInputsBuilder};
pub use metrics::DerivedMetrics;
pub use report::{implied_growth, implied_growth_saturating, implied_growth_with, ImpliedGrowthReport};
pub use solver::{GrowthRateSolver, GrowthSolution, SolveStatus};

pub use revdcf_math::solvers::SolverConfig;
