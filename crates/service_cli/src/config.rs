//! CLI configuration management
//!
//! Settings are resolved from, in increasing priority:
//! 1. Default values
//! 2. A TOML file passed with `--config`
//! 3. Environment variables (`QUANT_LOG_LEVEL`, `QUANT_MC_TRIALS`, `QUANT_MC_SEED`)
//! 4. Command-line flags

use pricer_core::math::solvers::SolverConfig;
use pricer_pricing::mc::{MonteCarloConfig, MAX_TRIALS, MIN_TRIALS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid trial count: {0}. Must be between {min} and {max}", min = MIN_TRIALS, max = MAX_TRIALS)]
    InvalidTrials(usize),

    #[error("Invalid iteration cap: {0}. Must be positive")]
    InvalidMaxIterations(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Tracing filter directive for this level
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Monte Carlo defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McSection {
    /// Number of simulated paths
    pub trials: usize,
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Fan trials out over the rayon pool
    pub parallel: bool,
}

impl Default for McSection {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: None,
            parallel: true,
        }
    }
}

/// Root-finder defaults for yield and implied volatility searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSection {
    /// Bisection iteration cap
    pub max_iterations: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            max_iterations: 200,
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: LogLevel,
    /// Monte Carlo settings
    pub mc: McSection,
    /// Root-finder settings
    pub solver: SolverSection,
}

/// Values given on the command line, which take precedence over everything else
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Raise the log level to debug
    pub verbose: bool,
    /// Trial count override
    pub trials: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Disable parallel trials
    pub sequential: bool,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUANT_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply variables from an arbitrary lookup, keyed like the environment
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QUANT_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(trials) = lookup("QUANT_MC_TRIALS") {
            self.mc.trials = trials
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("QUANT_MC_TRIALS={}", trials)))?;
        }
        if let Some(seed) = lookup("QUANT_MC_SEED") {
            self.mc.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| ConfigError::EnvError(format!("QUANT_MC_SEED={}", seed)))?,
            );
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(trials) = cli.trials {
            self.mc.trials = trials;
        }
        if cli.seed.is_some() {
            self.mc.seed = cli.seed;
        }
        if cli.sequential {
            self.mc.parallel = false;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TRIALS..=MAX_TRIALS).contains(&self.mc.trials) {
            return Err(ConfigError::InvalidTrials(self.mc.trials));
        }
        if self.solver.max_iterations == 0 {
            return Err(ConfigError::InvalidMaxIterations(0));
        }
        Ok(())
    }

    /// Monte Carlo engine configuration
    pub fn monte_carlo(&self) -> Result<MonteCarloConfig, pricer_pricing::mc::ConfigError> {
        MonteCarloConfig::builder()
            .n_trials(self.mc.trials)
            .maybe_seed(self.mc.seed)
            .parallel(self.mc.parallel)
            .build()
    }

    /// Bond yield search configuration with the configured iteration cap
    pub fn bond_solver(&self) -> SolverConfig<f64> {
        SolverConfig::bond_yield().with_max_iterations(self.solver.max_iterations)
    }

    /// Implied volatility search configuration with the configured iteration cap
    pub fn volatility_solver(&self) -> SolverConfig<f64> {
        SolverConfig::implied_volatility().with_max_iterations(self.solver.max_iterations)
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(path: Option<&Path>, cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    let mut config = match path {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}
