//! Solver configuration types.

use num_traits::Float;

/// Configuration for iterative root-finding.
///
/// `tolerance` is the largest accepted `|target - f(x)|`; `max_iterations`
/// caps the number of objective evaluations so that every search
/// terminates, successfully or with `SolverError::MaxIterationsExceeded`.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// // Price-level accuracy used when inverting bond prices
/// let ytm = SolverConfig::<f64>::bond_yield();
/// assert_eq!(ytm.tolerance, 1e-4);
///
/// let custom = SolverConfig::<f64>::default().with_max_iterations(500);
/// assert_eq!(custom.max_iterations, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Largest accepted residual between target and model value.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values: `tolerance` 1e-10, `max_iterations` 100.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Accuracy used to solve for a bond's yield to maturity.
    ///
    /// Prices are matched to within 1e-4 currency units; 200 halvings of the
    /// unit interval is far beyond double precision.
    pub fn bond_yield() -> Self {
        Self {
            tolerance: T::from(1e-4).unwrap(),
            max_iterations: 200,
        }
    }

    /// Accuracy used to back out Black-Scholes-Merton implied volatility.
    pub fn implied_volatility() -> Self {
        Self {
            tolerance: T::from(1e-5).unwrap(),
            max_iterations: 200,
        }
    }

    /// Tight tolerance (1e-14) with 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap(),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) with 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 50,
        }
    }

    /// Return a copy with a different iteration cap.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0`.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self::new(self.tolerance, max_iterations)
    }

    /// Return a copy with a different tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0`.
    pub fn with_tolerance(self, tolerance: T) -> Self {
        Self::new(tolerance, self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_presets() {
        let ytm: SolverConfig<f64> = SolverConfig::bond_yield();
        assert_eq!(ytm.tolerance, 1e-4);
        assert_eq!(ytm.max_iterations, 200);

        let iv: SolverConfig<f64> = SolverConfig::implied_volatility();
        assert_eq!(iv.tolerance, 1e-5);

        assert!(SolverConfig::<f64>::high_precision().tolerance < 1e-12);
        assert!(SolverConfig::<f64>::fast().max_iterations <= 50);
    }

    #[test]
    fn test_with_overrides() {
        let config = SolverConfig::<f64>::bond_yield()
            .with_max_iterations(30)
            .with_tolerance(1e-6);
        assert_eq!(config.max_iterations, 30);
        assert_eq!(config.tolerance, 1e-6);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_with_zero_iterations_panics() {
        let _ = SolverConfig::<f64>::default().with_max_iterations(0);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::implied_volatility();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 200);
    }
}
