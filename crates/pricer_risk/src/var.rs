//! Value at Risk as a fraction of position value.
//!
//! Both measures are reported as a return: a VaR of `-0.03` means a 3%
//! loss that is exceeded with probability `1 - confidence` over the
//! horizon. Horizons are scaled from one-period statistics by `√n`.

use pricer_core::math::distributions::norm_inv;
use pricer_core::math::stats::quantile;

use crate::error::RiskError;

fn check(confidence: f64, periods: f64) -> Result<(), RiskError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(RiskError::InvalidConfidence { confidence });
    }
    if !(periods.is_finite() && periods > 0.0) {
        return Err(RiskError::InvalidHorizon { periods });
    }
    Ok(())
}

/// Parametric VaR for normally distributed returns:
/// `μ·n + z(1 − x)·σ·√n`.
///
/// `mu` and `sigma` are per-period mean and standard deviation of returns,
/// `confidence` is `x` and `periods` is the horizon `n`.
///
/// # Examples
/// ```
/// use pricer_risk::var::model_var_pct;
///
/// let var = model_var_pct(0.0005, 0.01, 0.95, 1.0).unwrap();
/// assert!((var - (0.0005 - 1.644_853_626_951_472_2 * 0.01)).abs() < 1e-10);
/// ```
pub fn model_var_pct(mu: f64, sigma: f64, confidence: f64, periods: f64) -> Result<f64, RiskError> {
    check(confidence, periods)?;
    let z = norm_inv(1.0 - confidence);
    Ok(mu * periods + z * sigma * periods.sqrt())
}

/// Historical-simulation VaR: the `1 − x` empirical quantile of
/// one-period returns, scaled by `√n`.
///
/// Non-finite returns (gaps in the series) are skipped.
///
/// # Errors
/// `RiskError::Stats` when no finite returns remain.
pub fn historical_var_pct(returns: &[f64], confidence: f64, periods: f64) -> Result<f64, RiskError> {
    check(confidence, periods)?;
    let clean: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
    let cutoff = quantile(&clean, 1.0 - confidence)?;
    tracing::debug!(
        observations = clean.len(),
        confidence,
        periods,
        cutoff,
        "historical value at risk"
    );
    Ok(cutoff * periods.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_var_scales_with_horizon() {
        let one = model_var_pct(0.0, 0.02, 0.99, 1.0).unwrap();
        let ten = model_var_pct(0.0, 0.02, 0.99, 10.0).unwrap();
        assert_relative_eq!(ten, one * 10f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(one, -2.326_347_874_040_841 * 0.02, epsilon = 1e-10);
    }

    #[test]
    fn test_model_var_monotone_in_confidence() {
        let levels = [0.80, 0.90, 0.95, 0.98, 0.99, 0.999];
        let vars: Vec<f64> = levels
            .iter()
            .map(|&x| model_var_pct(0.0004, 0.012, x, 5.0).unwrap())
            .collect();
        assert!(vars.windows(2).all(|w| w[1] < w[0]), "{:?}", vars);
    }

    #[test]
    fn test_historical_var() {
        // 101 returns: -0.05, -0.049, ..., 0.05
        let returns: Vec<f64> = (0..=100).map(|i| -0.05 + 0.001 * i as f64).collect();
        let var = historical_var_pct(&returns, 0.95, 1.0).unwrap();
        assert_relative_eq!(var, -0.045, epsilon = 1e-12);

        let var5 = historical_var_pct(&returns, 0.95, 5.0).unwrap();
        assert_relative_eq!(var5, -0.045 * 5f64.sqrt(), epsilon = 1e-12);

        let stricter = historical_var_pct(&returns, 0.99, 1.0).unwrap();
        assert!(stricter < var);
    }

    #[test]
    fn test_historical_var_skips_gaps() {
        let returns = [f64::NAN, -0.02, 0.01, f64::NAN, 0.03];
        let clean = [-0.02, 0.01, 0.03];
        assert_eq!(
            historical_var_pct(&returns, 0.9, 1.0).unwrap(),
            historical_var_pct(&clean, 0.9, 1.0).unwrap()
        );
        assert!(matches!(
            historical_var_pct(&[f64::NAN], 0.9, 1.0),
            Err(RiskError::Stats(_))
        ));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            model_var_pct(0.0, 0.01, 1.0, 1.0),
            Err(RiskError::InvalidConfidence { .. })
        ));
        assert!(matches!(
            model_var_pct(0.0, 0.01, 0.0, 1.0),
            Err(RiskError::InvalidConfidence { .. })
        ));
        assert!(matches!(
            historical_var_pct(&[0.01, 0.02], 0.95, 0.0),
            Err(RiskError::InvalidHorizon { .. })
        ));
    }
}
