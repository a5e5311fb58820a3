//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Umbrella error that every higher layer converts into
//! - `SolverError`: Errors from the root-finding solvers
//! - `StatsError`: Errors from descriptive statistics over sample data

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation failed to converge or produced non-finite values
/// - `ModelFailure`: Model assumptions violated
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Search did not converge within the iteration cap
/// - `InvalidBracket`: Search interval is empty or not finite
/// - `NumericalInstability`: Objective returned NaN or infinity
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, last_estimate: 0.5 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Did not converge after {iterations} iterations (last estimate {last_estimate})")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Midpoint reached when the cap was hit
        last_estimate: f64,
    },

    /// Search interval is empty, inverted or not finite.
    #[error("Invalid bracket [{lower}, {upper}]")]
    InvalidBracket {
        /// Lower bound of the interval
        lower: f64,
        /// Upper bound of the interval
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::InvalidBracket { .. } => PricingError::InvalidInput(err.to_string()),
            other => PricingError::NumericalInstability(other.to_string()),
        }
    }
}

/// Errors from descriptive statistics.
///
/// # Examples
/// ```
/// use pricer_core::types::StatsError;
///
/// let err = StatsError::InsufficientData { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient data: got 1, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatsError {
    /// Too few observations for the requested statistic.
    #[error("Insufficient data: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of observations provided
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// Paired series have different lengths.
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first series
        left: usize,
        /// Length of the second series
        right: usize,
    },

    /// Series has zero variance where a division by it is required.
    #[error("Series has zero variance")]
    ZeroVariance,

    /// Probability or quantile level outside [0, 1].
    #[error("Probability {value} outside [0, 1]")]
    InvalidProbability {
        /// The offending level
        value: f64,
    },
}

impl From<StatsError> for PricingError {
    fn from(err: StatsError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::ModelFailure("tree probability out of range".to_string());
        assert_eq!(
            format!("{}", err),
            "Model failure: tree probability out of range"
        );
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::InvalidBracket {
            lower: 1.0,
            upper: 0.0,
        };
        assert_eq!(format!("{}", err), "Invalid bracket [1, 0]");

        let err = SolverError::MaxIterationsExceeded {
            iterations: 64,
            last_estimate: 0.25,
        };
        assert!(format!("{}", err).starts_with("Did not converge after 64 iterations"));
    }

    #[test]
    fn test_solver_error_into_pricing_error() {
        let err: PricingError = SolverError::MaxIterationsExceeded {
            iterations: 10,
            last_estimate: 0.1,
        }
        .into();
        match err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("10 iterations")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }

        let err: PricingError = SolverError::InvalidBracket {
            lower: 0.0,
            upper: f64::NAN,
        }
        .into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_stats_error_into_pricing_error() {
        let err: PricingError = StatsError::LengthMismatch { left: 3, right: 4 }.into();
        assert_eq!(
            format!("{}", err),
            "Invalid input: Length mismatch: 3 vs 4"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&PricingError::InvalidInput(String::new()));
        assert_error(&SolverError::NumericalInstability(String::new()));
        assert_error(&StatsError::ZeroVariance);
    }
}
