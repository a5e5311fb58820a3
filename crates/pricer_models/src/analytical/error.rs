//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to closed-form option pricing

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidRate`: Non-finite interest or dividend rate
/// - `ImpliedVolatility`: Volatility search failed to match the quoted value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike price: X = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry in years
        expiry: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Interest or dividend rate is not finite.
    #[error("Invalid {name}: {value}")]
    InvalidRate {
        /// Which rate was rejected
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Implied volatility search failed.
    #[error("Implied volatility not found for value {target}: {source}")]
    ImpliedVolatility {
        /// Quoted option value being matched
        target: f64,
        /// Underlying solver failure
        #[source]
        source: SolverError,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::ImpliedVolatility { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = AnalyticalError::InvalidRate {
            name: "dividend yield",
            value: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Invalid dividend yield: inf");
    }

    #[test]
    fn test_implied_volatility_maps_to_instability() {
        let err = AnalyticalError::ImpliedVolatility {
            target: 150.0,
            source: SolverError::MaxIterationsExceeded {
                iterations: 200,
                last_estimate: 1.0,
            },
        };
        let pricing: PricingError = err.into();
        assert!(matches!(pricing, PricingError::NumericalInstability(_)));
    }

    #[test]
    fn test_validation_maps_to_invalid_input() {
        let pricing: PricingError = AnalyticalError::InvalidSpot { spot: -100.0 }.into();
        assert_eq!(
            pricing,
            PricingError::InvalidInput("Invalid spot price: S = -100".to_string())
        );
    }
}
