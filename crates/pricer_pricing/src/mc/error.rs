//! Error types for Monte Carlo simulation.
//!
//! - [`ConfigError`]: rejected run configuration (trial count, missing fields)
//! - [`SimulationError`]: rejected model or payoff inputs, or a failed
//!   aggregation of trial results

use pricer_core::types::{PricingError, StatsError};
use thiserror::Error;

/// Configuration error for the Monte Carlo engine.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Trial count outside valid range [2, 10_000_000].
    #[error("Invalid trial count {0}: must be in range [2, 10_000_000]")]
    InvalidTrialCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Runtime error for path simulation and option valuation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A model or payoff input is out of range.
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Horizon and frequency leave no whole period to simulate.
    #[error("No periods to simulate: {periods_per_year} per year over {maturity} years")]
    NoPeriods {
        /// Simulation steps per year.
        periods_per_year: u32,
        /// Horizon in years.
        maturity: f64,
    },
    /// Run configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Trial results could not be summarised.
    #[error(transparent)]
    Statistics(#[from] StatsError),
}

impl From<SimulationError> for PricingError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Statistics(_) => PricingError::NumericalInstability(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidTrialCount(1);
        assert!(err.to_string().contains("Invalid trial count 1"));

        let err = ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'n_trials': must be specified");
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::NoPeriods {
            periods_per_year: 2,
            maturity: 0.25,
        };
        assert_eq!(
            err.to_string(),
            "No periods to simulate: 2 per year over 0.25 years"
        );
        let wrapped: SimulationError = ConfigError::InvalidTrialCount(0).into();
        assert!(wrapped.to_string().contains("Invalid trial count 0"));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = SimulationError::InvalidParameter {
            name: "strike",
            value: -1.0,
        }
        .into();
        assert_eq!(err, PricingError::InvalidInput("Invalid strike: -1".to_string()));
    }
}
