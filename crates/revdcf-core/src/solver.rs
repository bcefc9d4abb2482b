//! Implied growth-rate solver.
//!
//! Finds the constant growth rate at which [`DcfModel::present_value`]
//! equals a target valuation by bisecting a fixed interval of rates. The
//! interval defaults to `[0, 1]` and the stopping criterion is the width
//! of the remaining interval, so a default solve always takes 20 steps.

use log::debug;
use serde::Serialize;

use revdcf_math::solvers::{BisectionSolver, Solver, SolverConfig};
use revdcf_math::MathError;

use crate::dcf::DcfModel;
use crate::error::{require_finite, ValuationError, ValuationResult};

/// Growth-rate search interval used when none is given.
pub const DEFAULT_GROWTH_BOUNDS: (f64, f64) = (0.0, 1.0);

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The target lies inside the interval's value range; the rate is a true root.
    Converged,
    /// No rate in the interval reaches the target; the rate is pinned to the lower bound.
    ///
    /// For positive earnings the target is below every value in range, and
    /// for a decreasing curve (negative earnings) it is above every value.
    SaturatedLow,
    /// No rate in the interval reaches the target; the rate is pinned to the upper bound.
    SaturatedHigh,
}

impl SolveStatus {
    /// Whether the solution reproduces the target valuation.
    pub const fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Result of an implied growth-rate solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthSolution {
    /// The implied growth rate as a fraction.
    pub rate: f64,
    /// Number of bisection steps taken.
    pub iterations: u32,
    /// Model value at `rate` minus the target.
    pub residual: f64,
    /// Whether `rate` is a root or a saturated bound.
    pub status: SolveStatus,
}

/// Bisection solver for the growth rate implied by a valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRateSolver {
    config: SolverConfig,
    lower: f64,
    upper: f64,
}

impl Default for GrowthRateSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthRateSolver {
    /// Creates a solver over `[0, 1]` with a `1e-6` interval tolerance.
    #[must_use]
    pub fn new() -> Self {
        let (lower, upper) = DEFAULT_GROWTH_BOUNDS;
        Self {
            config: SolverConfig::default(),
            lower,
            upper,
        }
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the interval tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Sets the growth-rate search interval.
    ///
    /// # Errors
    ///
    /// Returns an error unless `-1 < lower < upper` and both are finite.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> ValuationResult<Self> {
        require_finite("growth_bounds", lower)?;
        require_finite("growth_bounds", upper)?;
        if lower <= -1.0 {
            return Err(ValuationError::invalid_input(
                "growth_bounds",
                format!("lower bound must be greater than -1, got {lower}"),
            ));
        }
        if lower >= upper {
            return Err(ValuationError::invalid_input(
                "growth_bounds",
                format!("lower bound {lower} must be below upper bound {upper}"),
            ));
        }
        self.lower = lower;
        self.upper = upper;
        Ok(self)
    }

    /// The solver configuration.
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The growth-rate search interval.
    pub const fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Model values at the two ends of the search interval.
    pub fn valuation_range(&self, model: &DcfModel) -> (f64, f64) {
        (model.present_value(self.lower), model.present_value(self.upper))
    }

    /// Finds the growth rate at which `model` is worth `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::UnbracketedRoot`] when `target` lies outside
    /// the values the model takes over the search interval, and
    /// [`ValuationError::Math`] if the solver cannot finish.
    pub fn solve(&self, model: &DcfModel, target: f64) -> ValuationResult<GrowthSolution> {
        require_finite("target_valuation", target)?;
        let objective = |rate: f64| model.present_value(rate) - target;

        let result = match BisectionSolver::checked().solve(objective, self.bounds(), &self.config)
        {
            Ok(result) => result,
            Err(MathError::InvalidBracket { .. }) => {
                let (lower_value, upper_value) = self.valuation_range(model);
                debug!(
                    "no growth rate in [{}, {}] reaches {target}: values span [{lower_value}, {upper_value}]",
                    self.lower, self.upper
                );
                return Err(ValuationError::UnbracketedRoot {
                    target,
                    lower_rate: self.lower,
                    upper_rate: self.upper,
                    lower_value,
                    upper_value,
                });
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            "implied growth {:.6} for target {target} after {} iterations",
            result.root, result.iterations
        );

        Ok(GrowthSolution {
            rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
            status: SolveStatus::Converged,
        })
    }

    /// Like [`solve`](Self::solve), but a target outside the model's range
    /// yields the nearest bound instead of an error.
    ///
    /// The returned [`SolveStatus`] says whether the rate is a root.
    pub fn solve_saturating(
        &self,
        model: &DcfModel,
        target: f64,
    ) -> ValuationResult<GrowthSolution> {
        require_finite("target_valuation", target)?;
        let objective = |rate: f64| model.present_value(rate) - target;

        let result =
            BisectionSolver::saturating().solve(objective, self.bounds(), &self.config)?;

        let (lower_value, upper_value) = self.valuation_range(model);
        let bracketed = (lower_value - target) * (upper_value - target) <= 0.0;
        let status = if bracketed {
            SolveStatus::Converged
        } else if result.root - self.lower < self.upper - result.root {
            SolveStatus::SaturatedLow
        } else {
            SolveStatus::SaturatedHigh
        };

        debug!(
            "saturating solve for target {target}: rate {:.6}, {status:?}",
            result.root
        );

        Ok(GrowthSolution {
            rate: result.root,
            iterations: result.iterations,
            residual: result.residual,
            status,
        })
    }
}
