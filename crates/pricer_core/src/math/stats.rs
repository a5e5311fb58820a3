//! Descriptive statistics over return and price series.
//!
//! Variance, standard deviation and covariance come in two flavours:
//! population (divide by `n`) and sample (divide by `n - 1`). Correlation,
//! r² and regression coefficients are the same under either convention.
//!
//! All functions reject empty input and mismatched pairs with
//! [`StatsError`] instead of returning NaN.

use crate::types::StatsError;

/// Intercept and slope of an ordinary least-squares fit `y = a + b·x`.
///
/// With market returns as `x` and a stock's returns as `y`, `slope` is the
/// stock's beta and `intercept` its alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionFit {
    /// Value of `y` at `x = 0`.
    pub intercept: f64,
    /// Change in `y` per unit of `x`.
    pub slope: f64,
}

impl RegressionFit {
    /// Evaluate the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

fn require_len(values: &[f64], need: usize) -> Result<(), StatsError> {
    if values.len() < need {
        return Err(StatsError::InsufficientData {
            got: values.len(),
            need,
        });
    }
    Ok(())
}

fn require_pair(x: &[f64], y: &[f64], need: usize) -> Result<(), StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    require_len(x, need)
}

/// Arithmetic mean.
///
/// # Examples
/// ```
/// use pricer_core::math::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
/// assert!(mean(&[]).is_err());
/// ```
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    require_len(values, 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

fn sum_sq_dev(values: &[f64], centre: f64) -> f64 {
    values.iter().map(|v| (v - centre).powi(2)).sum()
}

/// Population variance (divides by `n`).
pub fn variance(values: &[f64]) -> Result<f64, StatsError> {
    let m = mean(values)?;
    Ok(sum_sq_dev(values, m) / values.len() as f64)
}

/// Population standard deviation.
pub fn stdev(values: &[f64]) -> Result<f64, StatsError> {
    variance(values).map(f64::sqrt)
}

/// Sample variance (divides by `n - 1`); needs at least two observations.
pub fn sample_variance(values: &[f64]) -> Result<f64, StatsError> {
    require_len(values, 2)?;
    let m = mean(values)?;
    Ok(sum_sq_dev(values, m) / (values.len() - 1) as f64)
}

/// Sample standard deviation.
pub fn sample_stdev(values: &[f64]) -> Result<f64, StatsError> {
    sample_variance(values).map(f64::sqrt)
}

/// Population covariance of two equally long series.
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    require_pair(x, y, 1)?;
    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Ok(sum / x.len() as f64)
}

/// Pearson correlation coefficient.
///
/// Returns [`StatsError::ZeroVariance`] when either series is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    let cov = covariance(x, y)?;
    let denom = stdev(x)? * stdev(y)?;
    if denom == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    Ok(cov / denom)
}

/// Square of the correlation coefficient.
pub fn rsq(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    correlation(x, y).map(|r| r * r)
}

/// Least-squares regression of `y` on `x`.
///
/// # Examples
/// ```
/// use pricer_core::math::stats::simple_regression;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [3.0, 5.0, 7.0, 9.0];
/// let fit = simple_regression(&x, &y).unwrap();
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// ```
pub fn simple_regression(x: &[f64], y: &[f64]) -> Result<RegressionFit, StatsError> {
    let cov = covariance(x, y)?;
    let var_x = variance(x)?;
    if var_x == 0.0 {
        return Err(StatsError::ZeroVariance);
    }
    let slope = cov / var_x;
    let intercept = mean(y)? - slope * mean(x)?;
    Ok(RegressionFit { intercept, slope })
}

/// Periodic simple returns `p[i] / p[i-1] - 1`.
///
/// The result is one element shorter than `prices`.
pub fn simple_returns(prices: &[f64]) -> Result<Vec<f64>, StatsError> {
    require_len(prices, 2)?;
    Ok(prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Periodic log returns `ln(p[i] / p[i-1])`.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, StatsError> {
    require_len(prices, 2)?;
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// For sorted values `v` and level `q`, the position is `h = (n - 1)·q`
/// and the result is `v[⌊h⌋] + (h - ⌊h⌋)·(v[⌊h⌋+1] - v[⌊h⌋])`.
///
/// # Examples
/// ```
/// use pricer_core::math::stats::quantile;
///
/// let v = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&v, 0.5).unwrap(), 2.5);
/// assert_eq!(quantile(&v, 0.0).unwrap(), 1.0);
/// assert_eq!(quantile(&v, 1.0).unwrap(), 4.0);
/// ```
pub fn quantile(values: &[f64], q: f64) -> Result<f64, StatsError> {
    require_len(values, 1)?;
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::InvalidProbability { value: q });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Ok(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}
