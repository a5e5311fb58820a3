//! Path generation for Monte Carlo simulation.
//!
//! Asset prices follow Geometric Brownian Motion simulated exactly in log
//! space over equal periods of length `dt = 1 / periods_per_year`:
//!
//! ```text
//! r[i] = (μ - σ²/2)·dt + σ·√dt·Z[i]
//! S[i] = S[i-1]·exp(r[i-1]),   S[0] = spot
//! ```

use std::fmt;

use super::config::MAX_PATH_PERIODS;
use super::error::SimulationError;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = μ S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams {
///     spot: 100.0,
///     maturity: 2.0,
///     drift: 0.10,
///     volatility: 0.30,
///     periods_per_year: 250,
/// };
/// assert_eq!(params.n_periods(), 500);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Horizon in years (T).
    pub maturity: f64,
    /// Drift (μ), annualised. Also the discount rate for option values.
    pub drift: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Simulation periods per year.
    pub periods_per_year: u32,
}

impl GbmParams {
    /// Number of whole periods in the horizon, `⌊periods_per_year · T⌋`.
    ///
    /// Saturates at `usize::MAX`; [`validate`](Self::validate) rejects
    /// anything above [`MAX_PATH_PERIODS`].
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.period_count() as usize
    }

    fn period_count(&self) -> f64 {
        // Absorb representation error such as 0.1 · 10 = 0.9999...
        (f64::from(self.periods_per_year) * self.maturity + 1e-9).floor()
    }

    /// Length of one period in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.periods_per_year)
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// - `SimulationError::InvalidParameter` for a non-positive spot or
    ///   maturity, negative volatility or non-finite drift
    /// - `SimulationError::NoPeriods` when the horizon holds no whole period
    /// - `SimulationError::InvalidParameter` named `"period count"` when a
    ///   path would exceed [`MAX_PATH_PERIODS`]
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "spot",
                value: self.spot,
            });
        }
        if !(self.maturity.is_finite() && self.maturity > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "maturity",
                value: self.maturity,
            });
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "volatility",
                value: self.volatility,
            });
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::InvalidParameter {
                name: "drift",
                value: self.drift,
            });
        }
        if self.periods_per_year == 0 || self.n_periods() == 0 {
            return Err(SimulationError::NoPeriods {
                periods_per_year: self.periods_per_year,
                maturity: self.maturity,
            });
        }
        let periods = self.period_count();
        if periods > MAX_PATH_PERIODS as f64 {
            return Err(SimulationError::InvalidParameter {
                name: "period count",
                value: periods,
            });
        }
        Ok(())
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            maturity: 1.0,
            drift: 0.05,
            volatility: 0.2,
            periods_per_year: 252,
        }
    }
}

/// Simulates log returns and price paths for one set of [`GbmParams`].
///
/// The drift and diffusion terms per period are computed once at
/// construction.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{GbmParams, StockSimulator};
/// use pricer_pricing::rng::PricerRng;
///
/// let sim = StockSimulator::new(GbmParams::default()).unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let path = sim.generate_path(&mut rng);
/// assert_eq!(path.len(), 253);
/// assert_eq!(path[0], 100.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StockSimulator {
    params: GbmParams,
    n_periods: usize,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl StockSimulator {
    /// Creates a simulator after validating `params`.
    pub fn new(params: GbmParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let dt = params.dt();
        Ok(Self {
            params,
            n_periods: params.n_periods(),
            drift_dt: (params.drift - 0.5 * params.volatility * params.volatility) * dt,
            vol_sqrt_dt: params.volatility * dt.sqrt(),
        })
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &GbmParams {
        &self.params
    }

    /// Number of simulated periods per path.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// One simulated log return per period.
    pub fn generate_returns(&self, rng: &mut PricerRng) -> Vec<f64> {
        let mut returns = vec![0.0; self.n_periods];
        rng.fill_normal(&mut returns);
        for r in returns.iter_mut() {
            *r = self.drift_dt + self.vol_sqrt_dt * *r;
        }
        returns
    }

    /// Price path of `n_periods + 1` values starting at the spot.
    pub fn generate_path(&self, rng: &mut PricerRng) -> Vec<f64> {
        let mut path = Vec::with_capacity(self.n_periods + 1);
        self.fill_path(rng, &mut path);
        path
    }

    /// Overwrites `path` with a freshly simulated path, reusing its
    /// allocation.
    pub fn fill_path(&self, rng: &mut PricerRng, path: &mut Vec<f64>) {
        path.clear();
        path.push(self.params.spot);
        let mut price = self.params.spot;
        for _ in 0..self.n_periods {
            price *= (self.drift_dt + self.vol_sqrt_dt * rng.gen_normal()).exp();
            path.push(price);
        }
    }
}

impl fmt::Display for StockSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(
            f,
            "StockSimulator (s=${:.2}, t={:.2} (years), mu={:.2}, sigma={:.2}, periods_per_year={})",
            p.spot, p.maturity, p.drift, p.volatility, p.periods_per_year
        )
    }
}
