//! Bisection root-finding solver for monotone objectives.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Direction in which the objective moves as its argument grows.
///
/// Bond prices fall as the yield rises (`Decreasing`); option values rise
/// with volatility (`Increasing`). The direction decides which bound is
/// replaced by the midpoint after each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Monotonicity {
    /// `f` increases with `x`.
    Increasing,
    /// `f` decreases with `x`.
    Decreasing,
}

/// Bisection solver that inverts a monotone function.
///
/// The solver does not need a sign change at the bracket endpoints: it
/// searches for `x` with
/// `|target - f(x)| < tolerance`, halving the search interval each step.
/// The default interval is `[0, 1]`, which covers annual yields and
/// volatilities in the range the library prices.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-12, 100));
///
/// // Invert x² on [0, 1] for the target 0.25
/// let x = solver
///     .find_root(|x: f64| x * x, 0.25, Monotonicity::Increasing)
///     .unwrap();
/// assert!((x - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
    lower: T,
    upper: T,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a solver searching the unit interval `[0, 1]`.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            lower: T::zero(),
            upper: T::one(),
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Return a copy of this solver searching `[lower, upper]` instead.
    ///
    /// The bracket is validated lazily by [`find_root`](Self::find_root).
    pub fn with_bracket(self, lower: T, upper: T) -> Self {
        Self {
            lower,
            upper,
            ..self
        }
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Current search interval as `(lower, upper)`.
    pub fn bracket(&self) -> (T, T) {
        (self.lower, self.upper)
    }

    /// Find `x` in the search interval with `|target - f(x)| < tolerance`.
    ///
    /// Each iteration evaluates `f` at the midpoint. For a decreasing `f`
    /// a model value above the target means `x` is too small, so the lower
    /// bound moves up; for an increasing `f` the upper bound moves down.
    ///
    /// The tolerance is absolute in units of `f`. When `f` is large, an
    /// interval of adjacent floats can still leave a residual above it; if
    /// both bounds have moved, the target lies between their values and the
    /// midpoint is returned as the root.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Midpoint whose residual is within tolerance, or the point
    ///   where an interval straddling the target collapsed
    /// * `Err(SolverError::InvalidBracket)` - `lower >= upper` or a bound is not finite
    /// * `Err(SolverError::NumericalInstability)` - `f` returned NaN or infinity
    /// * `Err(SolverError::MaxIterationsExceeded)` - Tolerance not reached within the cap
    pub fn find_root<F>(&self, f: F, target: T, monotonicity: Monotonicity) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut lower = self.lower;
        let mut upper = self.upper;

        if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
            return Err(SolverError::InvalidBracket {
                lower: to_f64(lower),
                upper: to_f64(upper),
            });
        }

        let two = T::one() + T::one();
        let mut mid = (lower + upper) / two;

        for iteration in 1..=self.config.max_iterations {
            mid = (lower + upper) / two;
            // No representable point strictly inside an interval whose
            // bounds both moved: the target lies between f(lower) and f(upper)
            let collapsed = mid <= lower || mid >= upper;
            if collapsed && lower > self.lower && upper < self.upper {
                tracing::debug!(
                    iterations = iteration,
                    root = to_f64(mid),
                    "bisection interval collapsed onto the root"
                );
                return Ok(mid);
            }
            let value = f(mid);
            if !value.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "objective returned {} at x = {}",
                    to_f64(value),
                    to_f64(mid)
                )));
            }

            let residual = target - value;
            if residual.abs() < self.config.tolerance {
                tracing::debug!(
                    iterations = iteration,
                    root = to_f64(mid),
                    residual = to_f64(residual),
                    "bisection converged"
                );
                return Ok(mid);
            }

            let model_too_high = residual < T::zero();
            match (monotonicity, model_too_high) {
                (Monotonicity::Decreasing, true) | (Monotonicity::Increasing, false) => {
                    lower = mid
                }
                (Monotonicity::Decreasing, false) | (Monotonicity::Increasing, true) => {
                    upper = mid
                }
            }
        }

        tracing::warn!(
            iterations = self.config.max_iterations,
            last_estimate = to_f64(mid),
            "bisection did not converge"
        );
        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_estimate: to_f64(mid),
        })
    }
}

fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
