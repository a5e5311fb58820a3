//! CLI error type
//!
//! Wraps the error enums of every library layer so that `main` can return a
//! single `Result`.

use pricer_core::types::StatsError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_models::lattice::LatticeError;
use pricer_pricing::mc::{ConfigError as McConfigError, SimulationError};
use pricer_risk::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `quant` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error(transparent)]
    MonteCarloConfig(#[from] McConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Self-check failed: {0}")]
    CheckFailed(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_convert() {
        let err: CliError = InstrumentError::InvalidPrice { price: -1.0 }.into();
        assert!(matches!(err, CliError::Instrument(_)));
        assert_eq!(err.to_string(), "Invalid price: P = -1");

        let err: CliError = RiskError::SingularCovariance.into();
        assert!(matches!(err, CliError::Risk(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error: Invalid log level"));
    }
}
