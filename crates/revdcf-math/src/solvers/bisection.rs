//! Bisection root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm with a bracket check.
///
/// Repeatedly halves `[a, b]` until its width drops to `config.tolerance`
/// and returns the midpoint of the final interval.
///
/// Requires: `f(a) * f(b) <= 0`. A zero at either end counts as bracketed.
///
/// # Arguments
///
/// * `f` - A monotone function whose root is sought
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or [`MathError::InvalidBracket`] if the
/// function has the same strict sign at both ends.
///
/// # Example
///
/// ```rust
/// use revdcf_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    let (lo, hi) = ordered_bounds(a, b)?;

    let f_lo = evaluate(&f, lo)?;
    let f_hi = evaluate(&f, hi)?;

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    halve(&f, lo, hi, f_lo, f_hi, config)
}

/// Bisection without a bracket check.
///
/// Runs the same loop as [`bisection`]. When `[a, b]` does not enclose a
/// root the interval collapses onto whichever end is closest to one: the
/// lower end if `f` is already past zero there, the upper end otherwise.
/// Callers that need to know whether a true root was found must compare
/// the endpoint values themselves.
///
/// The direction of the search is taken from `f(a)` and `f(b)`: for an
/// increasing function a negative midpoint value moves the lower end up,
/// and a midpoint value of exactly zero moves the upper end down.
pub fn bisect<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    let (lo, hi) = ordered_bounds(a, b)?;

    let f_lo = evaluate(&f, lo)?;
    let f_hi = evaluate(&f, hi)?;

    halve(&f, lo, hi, f_lo, f_hi, config)
}

fn halve<F>(
    f: &F,
    mut lo: f64,
    mut hi: f64,
    f_lo: f64,
    f_hi: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let increasing = f_hi >= f_lo;
    let mut iterations = 0;

    while hi - lo > config.tolerance {
        if iterations == config.max_iterations {
            return Err(MathError::convergence_failed(iterations, hi - lo));
        }

        let mid = (lo + hi) / 2.0;
        let f_mid = evaluate(f, mid)?;
        iterations += 1;

        let root_above = if increasing { f_mid < 0.0 } else { f_mid > 0.0 };
        if root_above {
            lo = mid;
        } else {
            hi = mid;
        }

        trace!("bisection iteration {iterations}: [{lo}, {hi}] f(mid) = {f_mid:e}");
    }

    let root = (lo + hi) / 2.0;
    let residual = evaluate(f, root)?;

    Ok(SolverResult {
        root,
        iterations,
        residual,
    })
}

fn ordered_bounds(a: f64, b: f64) -> MathResult<(f64, f64)> {
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints must be finite, got [{a}, {b}]"
        )));
    }
    if a == b {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints must differ, got [{a}, {b}]"
        )));
    }
    Ok((a.min(b), a.max(b)))
}

fn evaluate<F>(f: &F, x: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::NonFiniteValue { x, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        match result {
            Err(MathError::InvalidBracket { a, b, fa, fb }) => {
                assert_relative_eq!(a, 2.0);
                assert_relative_eq!(b, 3.0);
                assert_relative_eq!(fa, 2.0);
                assert_relative_eq!(fb, 7.0);
            }
            other => panic!("Expected InvalidBracket error, got {other:?}"),
        }
    }

    #[test]
    fn test_root_at_upper_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert!(result.root >= 1.0 - 1e-6);
        assert!(result.root < 1.0);
    }

    #[test]
    fn test_root_at_lower_endpoint() {
        let f = |x: f64| x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert!(result.root <= 1e-6);
        assert!(result.root > 0.0);
    }

    #[test]
    fn test_negative_root() {
        let f = |x: f64| x + 1.0;

        let result = bisection(f, -2.0, 0.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_decreasing_function() {
        let f = |x: f64| 0.3 - x;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_iteration_count() {
        let f = |x: f64| x - 0.123_456;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        // Width 1.0 halves to 2^-20 < 1e-6 after exactly 20 steps.
        assert_eq!(result.iterations, 20);
    }

    #[test]
    fn test_saturates_low_when_function_positive() {
        let f = |x: f64| x + 5.0;

        let result = bisect(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert!(result.root < 1e-6);
        assert_relative_eq!(result.residual, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_saturates_high_when_function_negative() {
        let f = |x: f64| x - 5.0;

        let result = bisect(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert!(result.root > 1.0 - 1e-6);
        assert!(result.root < 1.0);
    }

    #[test]
    fn test_bisect_matches_bisection_when_bracketed() {
        let f = |x: f64| x.powi(3) - 0.2;
        let config = SolverConfig::default();

        let checked = bisection(f, 0.0, 1.0, &config).unwrap();
        let unchecked = bisect(f, 0.0, 1.0, &config).unwrap();

        assert_eq!(checked, unchecked);
    }

    #[test]
    fn test_non_finite_value() {
        let f = |x: f64| if x > 0.5 { f64::NAN } else { x - 0.75 };

        let result = bisect(f, 0.0, 0.6, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::NonFiniteValue { .. })));
    }

    #[test]
    fn test_degenerate_bounds() {
        let f = |x: f64| x;

        assert!(matches!(
            bisection(f, 0.5, 0.5, &SolverConfig::default()),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            bisection(f, f64::NEG_INFINITY, 0.5, &SolverConfig::default()),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let f = |x: f64| x - 0.4;
        let config = SolverConfig::new(1e-6, 5);

        let result = bisection(f, 0.0, 1.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }

    #[test]
    fn test_exact_midpoint_root_narrows_upper() {
        // f(0.5) == 0 exactly: the first step must move the upper end.
        let f = |x: f64| x - 0.5;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert!(result.root <= 0.5);
        assert_relative_eq!(result.root, 0.5, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn prop_root_within_tolerance(root in 0.001f64..0.999, slope in 0.1f64..100.0) {
            let f = |x: f64| slope * (x - root);
            let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
            prop_assert!((result.root - root).abs() <= 1e-6);
        }

        #[test]
        fn prop_deterministic(root in 0.0f64..1.0) {
            let f = |x: f64| x - root;
            let config = SolverConfig::default();
            let first = bisect(f, 0.0, 1.0, &config).unwrap();
            let second = bisect(f, 0.0, 1.0, &config).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
