//! Black-Scholes-Merton pricing for European options on a dividend-paying
//! underlying.
//!
//! ## Mathematical Formulas
//!
//! **Call Value**: C = S·e^(-qT)·N(d₁) - X·e^(-rT)·N(d₂)
//! **Put Value**: P = X·e^(-rT)·(1 - N(d₂)) - S·e^(-qT)·(1 - N(d₁))
//!
//! Where:
//! - d₁ = (ln(S/X) + T(r - q + σ²/2)) / (σ√T)
//! - d₂ = d₁ - σ√T
//! - q is the continuous dividend yield

use std::fmt;

use pricer_core::math::distributions::norm_cdf;
use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};

use super::error::AnalyticalError;
use crate::instruments::OptionRight;

/// Market and contract inputs to the Black-Scholes-Merton formula.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BsmParams {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike price (X)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub expiry: f64,
    /// Annualised volatility (σ)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend yield (q)
    pub dividend: f64,
}

impl BsmParams {
    /// Check every input the formula divides by or takes a logarithm of.
    ///
    /// # Errors
    /// Returns the first failing check: spot, strike, expiry, volatility,
    /// then rate and dividend finiteness.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(self.spot) {
            return Err(AnalyticalError::InvalidSpot { spot: self.spot });
        }
        if !positive(self.strike) {
            return Err(AnalyticalError::InvalidStrike {
                strike: self.strike,
            });
        }
        if !positive(self.expiry) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        if !positive(self.volatility) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if !self.rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                name: "risk-free rate",
                value: self.rate,
            });
        }
        if !self.dividend.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                name: "dividend yield",
                value: self.dividend,
            });
        }
        Ok(())
    }
}

/// European option priced with the Black-Scholes-Merton formula.
///
/// Instances are immutable: the `with_*` methods return a new, validated
/// option and leave the original untouched.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholesMerton, BsmParams};
///
/// let params = BsmParams {
///     spot: 100.0, strike: 100.0, expiry: 0.5,
///     volatility: 0.25, rate: 0.04, dividend: 0.02,
/// };
/// let call = BlackScholesMerton::call(params).unwrap();
/// let put = BlackScholesMerton::put(params).unwrap();
///
/// assert!((call.value() - 7.4421).abs() < 5e-5);
///
/// // Put-call parity: C - P = S·e^(-qT) - X·e^(-rT)
/// let parity = call.value() - put.value()
///     - (100.0 * (-0.02_f64 * 0.5).exp() - 100.0 * (-0.04_f64 * 0.5).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholesMerton {
    params: BsmParams,
    right: OptionRight,
}

impl BlackScholesMerton {
    /// Creates a European option of the given right.
    ///
    /// # Errors
    /// Any [`BsmParams::validate`] failure.
    pub fn new(params: BsmParams, right: OptionRight) -> Result<Self, AnalyticalError> {
        params.validate()?;
        Ok(Self { params, right })
    }

    /// Creates a European call.
    pub fn call(params: BsmParams) -> Result<Self, AnalyticalError> {
        Self::new(params, OptionRight::Call)
    }

    /// Creates a European put.
    pub fn put(params: BsmParams) -> Result<Self, AnalyticalError> {
        Self::new(params, OptionRight::Put)
    }

    /// Pricing inputs.
    #[inline]
    pub fn params(&self) -> &BsmParams {
        &self.params
    }

    /// Call or put.
    #[inline]
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// New option with the spot replaced.
    pub fn with_spot(&self, spot: f64) -> Result<Self, AnalyticalError> {
        Self::new(BsmParams { spot, ..self.params }, self.right)
    }

    /// New option with the volatility replaced.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, AnalyticalError> {
        Self::new(
            BsmParams {
                volatility,
                ..self.params
            },
            self.right,
        )
    }

    /// New option with the strike replaced.
    pub fn with_strike(&self, strike: f64) -> Result<Self, AnalyticalError> {
        Self::new(BsmParams { strike, ..self.params }, self.right)
    }

    /// New option with the time to expiry replaced.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, AnalyticalError> {
        Self::new(BsmParams { expiry, ..self.params }, self.right)
    }

    /// d₁ = (ln(S/X) + T(r - q + σ²/2)) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        d1_at(&self.params, self.params.volatility)
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.params.volatility * self.params.expiry.sqrt()
    }

    /// N(d₁)
    pub fn nd1(&self) -> f64 {
        norm_cdf(self.d1())
    }

    /// N(d₂)
    pub fn nd2(&self) -> f64 {
        norm_cdf(self.d2())
    }

    /// Option value.
    pub fn value(&self) -> f64 {
        value_at(&self.params, self.right, self.params.volatility)
    }

    /// Sensitivity of the value to the spot price.
    ///
    /// Call: e^(-qT)·N(d₁); put: -e^(-qT)·(1 - N(d₁)).
    pub fn delta(&self) -> f64 {
        let carry = (-self.params.dividend * self.params.expiry).exp();
        match self.right {
            OptionRight::Call => carry * self.nd1(),
            OptionRight::Put => -carry * (1.0 - self.nd1()),
        }
    }

    /// Volatility at which this option's value equals `target`, found by
    /// bisection over σ in `[0, 1]` to within 1e-5.
    ///
    /// # Errors
    /// `AnalyticalError::ImpliedVolatility` when no σ in the interval
    /// reproduces the value within the iteration cap.
    pub fn implied_volatility(&self, target: f64) -> Result<f64, AnalyticalError> {
        self.implied_volatility_with(target, &SolverConfig::implied_volatility())
    }

    /// As [`implied_volatility`](Self::implied_volatility) with explicit
    /// solver accuracy and iteration cap.
    pub fn implied_volatility_with(
        &self,
        target: f64,
        config: &SolverConfig<f64>,
    ) -> Result<f64, AnalyticalError> {
        let params = self.params;
        let right = self.right;
        let sigma = BisectionSolver::new(*config)
            .find_root(
                |sigma| value_at(&params, right, sigma),
                target,
                Monotonicity::Increasing,
            )
            .map_err(|source| AnalyticalError::ImpliedVolatility { target, source })?;
        tracing::debug!(target, sigma, right = %right, "implied volatility");
        Ok(sigma)
    }
}

fn d1_at(p: &BsmParams, sigma: f64) -> f64 {
    let numerator = (p.spot / p.strike).ln() + p.expiry * (p.rate - p.dividend + sigma * sigma / 2.0);
    numerator / (sigma * p.expiry.sqrt())
}

fn value_at(p: &BsmParams, right: OptionRight, sigma: f64) -> f64 {
    let d1 = d1_at(p, sigma);
    let d2 = d1 - sigma * p.expiry.sqrt();
    let carried_spot = p.spot * (-p.dividend * p.expiry).exp();
    let discounted_strike = p.strike * (-p.rate * p.expiry).exp();
    match right {
        OptionRight::Call => carried_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionRight::Put => {
            discounted_strike * (1.0 - norm_cdf(d2)) - carried_spot * (1.0 - norm_cdf(d1))
        }
    }
}

impl fmt::Display for BlackScholesMerton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(
            f,
            "European {}, value = ${:.2}, parameters = (s = ${:.2}, x = ${:.2}, t = {} (years), sigma = {:.3}, rf = {:.3}, div = {})",
            self.right,
            self.value(),
            p.spot,
            p.strike,
            p.expiry,
            p.volatility,
            p.rate,
            p.dividend
        )
    }
}

/// Call and put value and delta at one spot price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionValueRow {
    /// Spot price for this row
    pub spot: f64,
    /// Call value
    pub call_value: f64,
    /// Put value
    pub put_value: f64,
    /// Call delta
    pub call_delta: f64,
    /// Put delta
    pub put_delta: f64,
}

/// Call and put values and deltas at each spot in `spots`, holding all
/// other inputs fixed.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{option_value_table, BsmParams};
///
/// let params = BsmParams {
///     spot: 90.0, strike: 95.0, expiry: 1.25,
///     volatility: 0.3, rate: 0.05, dividend: 0.02,
/// };
/// let spots: Vec<f64> = (80..=100).map(f64::from).collect();
/// let table = option_value_table(&params, &spots).unwrap();
/// assert_eq!(table.len(), 21);
/// assert!(table.windows(2).all(|w| w[1].call_value > w[0].call_value));
/// ```
pub fn option_value_table(
    params: &BsmParams,
    spots: &[f64],
) -> Result<Vec<OptionValueRow>, AnalyticalError> {
    spots
        .iter()
        .map(|&spot| {
            let call = BlackScholesMerton::call(BsmParams { spot, ..*params })?;
            let put = BlackScholesMerton::put(BsmParams { spot, ..*params })?;
            Ok(OptionValueRow {
                spot,
                call_value: call.value(),
                put_value: put.value(),
                call_delta: call.delta(),
                put_delta: put.delta(),
            })
        })
        .collect()
}
