//! Monte Carlo option valuation.
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Path generation (via [`StockSimulator`])
//! 2. Payoff evaluation (via [`PathPayoff`])
//! 3. Discounting at the simulation drift, `e^(−μ·T)`
//! 4. Aggregation into a mean and its standard error
//!
//! Pricing under the risk-neutral measure therefore means setting the
//! drift to the risk-free rate.

use pricer_core::math::stats::{mean, sample_stdev};

use super::config::MonteCarloConfig;
use super::error::SimulationError;
use super::paths::{GbmParams, StockSimulator};
use super::payoff::PathPayoff;
use super::trials::run_trials;

/// Monte Carlo value estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult { price: 10.5, std_error: 0.05, n_trials: 10_000, seed: 7 };
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Mean discounted payoff.
    pub price: f64,
    /// Sample standard deviation of discounted payoffs over √n.
    pub std_error: f64,
    /// Number of trials averaged.
    pub n_trials: usize,
    /// Seed the trials were drawn with; rerunning with it reproduces the
    /// result.
    pub seed: u64,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricing engine for path-dependent options.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer, PathPayoff};
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let gbm = GbmParams { spot: 100.0, maturity: 1.0, drift: 0.05, volatility: 0.2, periods_per_year: 12 };
///
/// let pricer = MonteCarloPricer::new(config, gbm).unwrap();
/// let result = pricer.price(PathPayoff::EuropeanCall { strike: 100.0 }).unwrap();
///
/// // Black-Scholes value is 10.4506
/// assert!((result.price - 10.4506).abs() < 5.0 * result.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    simulator: StockSimulator,
}

impl MonteCarloPricer {
    /// Creates a new pricer.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError` if the configuration or model parameters
    /// are invalid.
    pub fn new(config: MonteCarloConfig, params: GbmParams) -> Result<Self, SimulationError> {
        config.validate()?;
        let simulator = StockSimulator::new(params)?;
        Ok(Self { config, simulator })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the path simulator.
    #[inline]
    pub fn simulator(&self) -> &StockSimulator {
        &self.simulator
    }

    /// Discount factor applied to every payoff, `e^(−μ·T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        let p = self.simulator.params();
        (-p.drift * p.maturity).exp()
    }

    /// Discounted payoff of every trial, in trial order.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` for a non-positive or
    /// non-finite strike.
    pub fn simulate_payoffs(&self, payoff: PathPayoff) -> Result<Vec<f64>, SimulationError> {
        self.payoffs_with(&self.config, payoff)
    }

    fn payoffs_with(
        &self,
        config: &MonteCarloConfig,
        payoff: PathPayoff,
    ) -> Result<Vec<f64>, SimulationError> {
        let strike = payoff.strike();
        if !(strike.is_finite() && strike > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "strike",
                value: strike,
            });
        }
        let df = self.discount_factor();
        let simulator = &self.simulator;
        Ok(run_trials(config, |rng| {
            df * payoff.evaluate(&simulator.generate_path(rng))
        }))
    }

    /// Prices `payoff` as the mean discounted payoff over all trials.
    ///
    /// An unseeded configuration draws its seed here and reports it in
    /// [`PricingResult::seed`].
    pub fn price(&self, payoff: PathPayoff) -> Result<PricingResult, SimulationError> {
        let seed = self.config.resolve_seed();
        let payoffs = self.payoffs_with(&self.config.with_seed(seed), payoff)?;
        let n_trials = payoffs.len();
        let price = mean(&payoffs)?;
        let std_error = sample_stdev(&payoffs)? / (n_trials as f64).sqrt();

        tracing::debug!(
            payoff = payoff.label(),
            strike = payoff.strike(),
            n_trials,
            seed,
            price,
            std_error,
            "monte carlo valuation"
        );
        Ok(PricingResult {
            price,
            std_error,
            n_trials,
            seed,
        })
    }
}
