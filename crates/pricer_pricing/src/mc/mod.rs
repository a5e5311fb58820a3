//! Monte Carlo path simulation and option valuation.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (trial count, seed, parallel flag)
//! ├── StockSimulator    (GBM log-return paths from GbmParams)
//! ├── PathPayoff        (European, Asian, Lookback × call/put)
//! └── run_trials()      (chunked rayon fan-out, one PricerRng stream per chunk)
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer, PathPayoff};
//!
//! let config = MonteCarloConfig::builder().n_trials(5_000).seed(7).build().unwrap();
//! let pricer = MonteCarloPricer::new(config, GbmParams::default()).unwrap();
//!
//! let asian = pricer.price(PathPayoff::AsianCall { strike: 100.0 }).unwrap();
//! let european = pricer.price(PathPayoff::EuropeanCall { strike: 100.0 }).unwrap();
//! assert!(asian.price < european.price);
//! ```

mod config;
mod error;
mod paths;
mod payoff;
mod pricer;
mod trials;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, CHUNK_TRIALS, MAX_PATH_PERIODS, MAX_TRIALS, MIN_TRIALS};
pub use error::{ConfigError, SimulationError};
pub use paths::{GbmParams, StockSimulator};
pub use payoff::{PathPayoff, PathStyle};
pub use pricer::{MonteCarloPricer, PricingResult};
pub use trials::run_trials;
