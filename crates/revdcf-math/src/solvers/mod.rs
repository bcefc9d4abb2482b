//! Root-finding algorithms.
//!
//! This module provides bracketing solvers for monotone equations:
//!
//! - [`bisection`]: Bisection that refuses to run unless the interval brackets a root
//! - [`bisect`]: The same loop without the bracket check; saturates at the
//!   nearest interval end when no root is enclosed
//!
//! Both stop on interval width rather than on residual size, so the number
//! of iterations depends only on the interval and the tolerance:
//!
//! | Interval width | Tolerance | Iterations |
//! |----------------|-----------|------------|
//! | 1.0            | 1e-6      | 20         |
//! | 1.0            | 1e-10     | 34         |
//!
//! # Example: implied discount rate
//!
//! ```rust
//! use revdcf_math::solvers::{bisection, SolverConfig};
//!
//! // A 5-year annuity of 10 priced at 37.91 implies a 10% rate.
//! let price = |r: f64| (1..=5).map(|t| 10.0 / (1.0 + r).powi(t)).sum::<f64>();
//! let f = |r: f64| 37.907_867_694 - price(r);
//!
//! let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-5);
//! ```

mod bisection;

pub use bisection::{bisect, bisection};

use crate::error::{MathError, MathResult};

/// Default interval-width tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Width of the search interval below which the solver stops.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the configuration can drive a solver to completion.
    pub fn validate(&self) -> MathResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of halvings needed to shrink an interval of `width` below the tolerance.
    #[must_use]
    pub fn iterations_for_width(&self, width: f64) -> u32 {
        if width <= self.tolerance {
            return 0;
        }
        let mut halvings = 0;
        let mut w = width;
        while w > self.tolerance {
            w /= 2.0;
            halvings += 1;
        }
        halvings
    }
}

/// Trait for bracketing root-finding solvers.
///
/// # Example
///
/// ```rust
/// use revdcf_math::solvers::{BisectionSolver, Solver, SolverConfig};
///
/// let solver = BisectionSolver::default();
/// let f = |x: f64| x * x - 2.0;
///
/// let result = solver.solve(f, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of `f` inside `bounds`.
    fn solve<F>(&self, f: F, bounds: (f64, f64), config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisectionSolver {
    require_bracket: bool,
}

impl Default for BisectionSolver {
    fn default() -> Self {
        Self::checked()
    }
}

impl BisectionSolver {
    /// A solver that fails with [`MathError::InvalidBracket`] when no root is enclosed.
    #[must_use]
    pub const fn checked() -> Self {
        Self {
            require_bracket: true,
        }
    }

    /// A solver that converges to the nearest bound when no root is enclosed.
    #[must_use]
    pub const fn saturating() -> Self {
        Self {
            require_bracket: false,
        }
    }

    /// Whether this solver checks the bracket before iterating.
    #[must_use]
    pub const fn requires_bracket(&self) -> bool {
        self.require_bracket
    }
}

impl Solver for BisectionSolver {
    fn solve<F>(&self, f: F, bounds: (f64, f64), config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        let (a, b) = bounds;
        if self.require_bracket {
            bisection(f, a, b, config)
        } else {
            bisect(f, a, b, config)
        }
    }

    fn name(&self) -> &'static str {
        if self.require_bracket {
            "Bisection"
        } else {
            "Bisection (saturating)"
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
