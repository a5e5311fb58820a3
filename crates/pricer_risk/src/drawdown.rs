//! Drawdown analysis for historical and simulated price paths.
//!
//! The drawdown at each point is measured from the running maximum
//! (`prev_max`): in dollars `prev_max − price`, and as a percentage
//! `(prev_max − price) / prev_max`.

use pricer_core::math::stats::{mean, quantile, sample_stdev};
use pricer_pricing::mc::{run_trials, GbmParams, MonteCarloConfig, StockSimulator};

use crate::error::RiskError;

/// Drawdown state at one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawdownPoint {
    /// Observed price.
    pub price: f64,
    /// Highest price observed so far, this one included.
    pub prev_max: f64,
    /// `prev_max − price`.
    pub dd_dollars: f64,
    /// `dd_dollars / prev_max`.
    pub dd_pct: f64,
}

/// Running maximum and drawdown for every price in the series.
///
/// # Errors
/// `RiskError::InvalidPrice` for a non-positive or non-finite price.
///
/// # Examples
/// ```
/// use pricer_risk::drawdown::compute_drawdown;
///
/// let dd = compute_drawdown(&[100.0, 120.0, 90.0, 130.0]).unwrap();
/// assert_eq!(dd[2].prev_max, 120.0);
/// assert_eq!(dd[2].dd_dollars, 30.0);
/// assert_eq!(dd[2].dd_pct, 0.25);
/// assert_eq!(dd[3].dd_pct, 0.0);
/// ```
pub fn compute_drawdown(prices: &[f64]) -> Result<Vec<DrawdownPoint>, RiskError> {
    if let Some((index, &price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(RiskError::InvalidPrice { index, price });
    }
    let mut prev_max = f64::NEG_INFINITY;
    Ok(prices
        .iter()
        .map(|&price| {
            prev_max = prev_max.max(price);
            let dd_dollars = prev_max - price;
            DrawdownPoint {
                price,
                prev_max,
                dd_dollars,
                dd_pct: dd_dollars / prev_max,
            }
        })
        .collect())
}

/// Largest percentage drawdown in the series; zero for an empty series.
pub fn max_drawdown(prices: &[f64]) -> Result<f64, RiskError> {
    Ok(compute_drawdown(prices)?
        .iter()
        .map(|p| p.dd_pct)
        .fold(0.0, f64::max))
}

/// Maximum percentage drawdown of each of `config.n_trials()` simulated
/// GBM paths, in trial order.
///
/// # Examples
/// ```
/// use pricer_pricing::mc::{GbmParams, MonteCarloConfig};
/// use pricer_risk::drawdown::{run_mc_drawdown_trials, DrawdownSummary};
///
/// let params = GbmParams { spot: 100.0, maturity: 1.0, drift: 0.08, volatility: 0.2, periods_per_year: 52 };
/// let config = MonteCarloConfig::builder().n_trials(1_000).seed(3).build().unwrap();
///
/// let trials = run_mc_drawdown_trials(params, &config).unwrap();
/// let summary = DrawdownSummary::from_samples(&trials).unwrap();
/// assert_eq!(summary.count, 1_000);
/// assert!(summary.min >= 0.0 && summary.max < 1.0);
/// ```
pub fn run_mc_drawdown_trials(
    params: GbmParams,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, RiskError> {
    let simulator = StockSimulator::new(params)?;
    let trials = run_trials(config, |rng| {
        let path = simulator.generate_path(rng);
        let mut prev_max = f64::NEG_INFINITY;
        path.iter().fold(0.0_f64, |worst, &price| {
            prev_max = prev_max.max(price);
            worst.max((prev_max - price) / prev_max)
        })
    });
    tracing::debug!(
        n_trials = trials.len(),
        periods = simulator.n_periods(),
        "simulated maximum drawdowns"
    );
    Ok(trials)
}

/// Descriptive statistics of a set of maximum drawdowns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawdownSummary {
    /// Number of samples.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Smallest sample.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Largest sample.
    pub max: f64,
}

impl DrawdownSummary {
    /// Summarise at least two samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self, RiskError> {
        Ok(Self {
            count: samples.len(),
            mean: mean(samples)?,
            std: sample_stdev(samples)?,
            min: quantile(samples, 0.0)?,
            q25: quantile(samples, 0.25)?,
            median: quantile(samples, 0.5)?,
            q75: quantile(samples, 0.75)?,
            max: quantile(samples, 1.0)?,
        })
    }
}
