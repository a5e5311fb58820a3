//! Instrument error types.
//!
//! This module provides structured error handling for bond construction,
//! cash-flow schedule analytics and auction clearing.

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidFaceValue`: Face value is non-positive or not finite
/// - `InvalidSchedule`: Zero years, zero payments per year, or too many periods
/// - `InvalidRate`: Rate is not finite or discounts by a non-positive factor
/// - `InvalidPrice`: Observed price is non-positive or not finite
/// - `YieldNotFound`: Yield search did not match the observed price
/// - `LengthMismatch`: Paired vectors have different lengths
/// - `SingularMatrix`: Cash-flow matrix cannot be inverted
/// - `InvalidParameter`: General parameter validation failure
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidFaceValue { face_value: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Face value is non-positive or not finite.
    #[error("Invalid face value: FV = {face_value}")]
    InvalidFaceValue {
        /// The invalid face value
        face_value: f64,
    },

    /// Schedule has no payment periods, or more than the supported maximum.
    #[error("Invalid schedule: {years} years at {payments_per_year} payments per year")]
    InvalidSchedule {
        /// Years to maturity
        years: u32,
        /// Payments per year
        payments_per_year: u32,
    },

    /// Rate is unusable for discounting.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate
        rate: f64,
    },

    /// Observed price is non-positive or not finite.
    #[error("Invalid price: P = {price}")]
    InvalidPrice {
        /// The invalid price
        price: f64,
    },

    /// Yield search failed to reproduce the observed price.
    #[error("Yield to maturity not found for price {price}: {source}")]
    YieldNotFound {
        /// Observed price being matched
        price: f64,
        /// Underlying solver failure
        #[source]
        source: SolverError,
    },

    /// Paired inputs have different lengths.
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first input
        left: usize,
        /// Length of the second input
        right: usize,
    },

    /// Cash-flow matrix is singular or not square.
    #[error("Cash-flow matrix is singular or not square ({rows}x{cols})")]
    SingularMatrix {
        /// Number of rows (instruments)
        rows: usize,
        /// Number of columns (payment dates)
        cols: usize,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the validation failure
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::YieldNotFound { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            InstrumentError::SingularMatrix { .. } => PricingError::ModelFailure(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_schedule_display() {
        let err = InstrumentError::InvalidSchedule {
            years: 0,
            payments_per_year: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid schedule: 0 years at 2 payments per year"
        );
    }

    #[test]
    fn test_yield_not_found_keeps_source() {
        use std::error::Error;

        let err = InstrumentError::YieldNotFound {
            price: 2500.0,
            source: SolverError::MaxIterationsExceeded {
                iterations: 200,
                last_estimate: 0.0,
            },
        };
        assert!(err.source().is_some());
        assert!(format!("{}", err).contains("2500"));
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = InstrumentError::InvalidRate { rate: f64::NAN }.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err: PricingError = InstrumentError::SingularMatrix { rows: 2, cols: 2 }.into();
        assert!(matches!(err, PricingError::ModelFailure(_)));
    }
}
