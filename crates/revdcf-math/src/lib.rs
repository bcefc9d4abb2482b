//! # RevDCF Math
//!
//! Numerical building blocks for the RevDCF valuation library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finders over a fixed search interval
//! - **Errors**: A single [`MathError`] type shared by every solver
//!
//! The solvers work on plain `f64` closures so callers can close over
//! whatever model parameters they need without allocating.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisect, bisection, BisectionSolver, Solver, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
