//! Error types for lattice pricing.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Binomial tree construction and valuation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// The tree must have at least one period.
    #[error("Binomial tree needs at least one period")]
    ZeroPeriods,

    /// The tree would exceed the supported size.
    #[error("Binomial tree with {periods} periods exceeds the maximum of {max}")]
    TooManyPeriods {
        /// Requested periods
        periods: usize,
        /// Largest supported period count
        max: usize,
    },

    /// An input is non-positive or not finite.
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        /// Which input was rejected
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The risk-neutral up probability fell outside [0, 1].
    #[error("Risk-neutral probability {probability} is outside [0, 1]")]
    InvalidProbability {
        /// Computed p*
        probability: f64,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidProbability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
