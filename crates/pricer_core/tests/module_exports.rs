//! Integration tests for module exports.
//!
//! Verifies that all public modules and types are accessible via absolute
//! paths, and that the pieces compose the way higher layers use them.

/// Solver types are reachable from `math::solvers`.
#[test]
fn test_solvers_module_exports() {
    use pricer_core::math::solvers::BisectionSolver;
    use pricer_core::math::solvers::Monotonicity;
    use pricer_core::math::solvers::SolverConfig;

    let solver = BisectionSolver::new(SolverConfig::<f64>::bond_yield());
    let root = solver
        .find_root(|r| 100.0 / (1.0 + r), 95.0, Monotonicity::Decreasing)
        .unwrap();
    assert!((100.0 / (1.0 + root) - 95.0).abs() < 1e-4);
}

/// Distribution functions are reachable from `math::distributions`.
#[test]
fn test_distributions_module_exports() {
    use pricer_core::math::distributions::{norm_cdf, norm_inv, norm_pdf};

    let z = norm_inv(0.99);
    assert!((norm_cdf(z) - 0.99).abs() < 1e-12);
    assert!(norm_pdf(z) > 0.0);
}

/// Statistics are reachable from `math::stats`.
#[test]
fn test_stats_module_exports() {
    use pricer_core::math::stats::{
        correlation, covariance, log_returns, mean, quantile, rsq, sample_stdev,
        simple_regression, simple_returns, stdev, variance, RegressionFit,
    };

    let prices = [100.0, 101.0, 99.0, 102.0, 104.0];
    let returns = simple_returns(&prices).unwrap();
    let logs = log_returns(&prices).unwrap();

    assert_eq!(returns.len(), 4);
    assert!(mean(&returns).unwrap() > 0.0);
    assert!(variance(&returns).unwrap() < sample_stdev(&returns).unwrap().powi(2));
    assert!(stdev(&returns).unwrap() > 0.0);
    assert!(quantile(&returns, 0.5).is_ok());
    assert!(correlation(&returns, &logs).unwrap() > 0.999);
    assert!(covariance(&returns, &logs).unwrap() > 0.0);
    assert!(rsq(&returns, &logs).unwrap() <= 1.0 + 1e-12);

    let fit: RegressionFit = simple_regression(&returns, &logs).unwrap();
    assert!((fit.slope - 1.0).abs() < 0.05);
}

/// Error types convert into the umbrella `PricingError`.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{PricingError, SolverError, StatsError};

    fn fails_with_solver() -> Result<f64, PricingError> {
        Err(SolverError::NumericalInstability("nan".to_string()))?
    }
    fn fails_with_stats() -> Result<f64, PricingError> {
        Err(StatsError::ZeroVariance)?
    }

    assert!(matches!(
        fails_with_solver(),
        Err(PricingError::NumericalInstability(_))
    ));
    assert!(matches!(fails_with_stats(), Err(PricingError::InvalidInput(_))));
}

/// A non-convergent search surfaces as an error rather than looping.
#[test]
fn test_non_convergence_is_reported() {
    use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};
    use pricer_core::types::SolverError;

    let solver = BisectionSolver::new(SolverConfig::new(1e-9, 40));
    let result = solver.find_root(|x: f64| x + 10.0, 0.0, Monotonicity::Increasing);
    match result {
        Err(SolverError::MaxIterationsExceeded { iterations, .. }) => assert_eq!(iterations, 40),
        other => panic!("Expected MaxIterationsExceeded, got {:?}", other),
    }
}
