//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing and risk simulations.

use super::error::ConfigError;

/// Minimum number of trials; a standard error needs at least two samples.
pub const MIN_TRIALS: usize = 2;

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 10_000_000;

/// Maximum number of periods in one simulated path.
pub const MAX_PATH_PERIODS: usize = 1_000_000;

/// Trials simulated per random stream.
///
/// Trial `i` always belongs to chunk `i / CHUNK_TRIALS`, whose generator is
/// derived from the run seed and the chunk index.
pub const CHUNK_TRIALS: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(10_000)
///     .seed(42)
///     .parallel(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of independent trials.
    n_trials: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Whether trial chunks run on the rayon pool.
    parallel: bool,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the configured seed, or draws a fresh one from the
    /// thread-local generator for an unseeded run.
    #[inline]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Copy of this configuration pinned to `seed`.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Returns whether trial chunks run in parallel.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTrialCount` if `n_trials` is below 2 or
    /// greater than 10,000,000.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TRIALS..=MAX_TRIALS).contains(&self.n_trials) {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Trials run in parallel unless `parallel(false)` is set.
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<usize>,
    seed: Option<u64>,
    parallel: bool,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_trials: None,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of trials, in [2, 10_000_000].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed if one is given, leaving the run unseeded otherwise.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel trial execution.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_trials` is not set or out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_trials = self.n_trials.ok_or(ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_trials,
            seed: self.seed,
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}
