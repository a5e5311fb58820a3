//! Risk analytics error types.
//!
//! This module provides structured error types for risk calculations
//! using `thiserror` for derivation.

use pricer_core::types::{PricingError, StatsError};
use pricer_pricing::mc::SimulationError;
use thiserror::Error;

/// Errors that can occur during risk calculations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// Confidence level outside the open interval (0, 1).
    #[error("Confidence level {confidence} must lie strictly between 0 and 1")]
    InvalidConfidence {
        /// Rejected confidence level.
        confidence: f64,
    },

    /// Non-positive or non-finite risk horizon.
    #[error("Horizon {periods} must be a positive number of periods")]
    InvalidHorizon {
        /// Rejected horizon.
        periods: f64,
    },

    /// A price series contains a non-positive or non-finite value.
    #[error("Price {price} at index {index} must be positive and finite")]
    InvalidPrice {
        /// Position in the series.
        index: usize,
        /// Rejected price.
        price: f64,
    },

    /// Vector and matrix dimensions disagree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// The covariance matrix cannot be inverted.
    #[error("Covariance matrix is singular")]
    SingularCovariance,

    /// Expected returns are collinear with the unit vector, so no frontier exists.
    #[error("Degenerate frontier: determinant bc - a² = {determinant}")]
    DegenerateFrontier {
        /// Value of bc - a².
        determinant: f64,
    },

    /// Statistic could not be computed.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Simulation inputs were rejected.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl From<RiskError> for PricingError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::SingularCovariance | RiskError::DegenerateFrontier { .. } => {
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
    fn test_display() {
        let err = RiskError::InvalidConfidence { confidence: 1.5 };
        assert_eq!(
            err.to_string(),
            "Confidence level 1.5 must lie strictly between 0 and 1"
        );
        let err = RiskError::DimensionMismatch { expected: 3, got: 2 };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn test_wraps_stats_error() {
        let err: RiskError = StatsError::ZeroVariance.into();
        assert_eq!(err.to_string(), "Series has zero variance");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = RiskError::SingularCovariance.into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
        let err: PricingError = RiskError::InvalidHorizon { periods: 0.0 }.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
