//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the stochastic engine of the workspace:
//! - Geometric Brownian Motion path simulation
//! - Monte Carlo valuation of European, Asian and Lookback options
//! - Seeded random streams with deterministic parallel fan-out
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): sample statistics for price and standard error
//! - Layer 2 (pricer_models): [`OptionRight`](pricer_models::instruments::OptionRight)
//!   intrinsic payoffs
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer, PathPayoff};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_trials(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let gbm = GbmParams { spot: 100.0, maturity: 1.0, drift: 0.05, volatility: 0.2, periods_per_year: 52 };
//!
//! let pricer = MonteCarloPricer::new(config, gbm).unwrap();
//! let result = pricer.price(PathPayoff::LookbackCall { strike: 100.0 }).unwrap();
//! println!("{:.4} ± {:.4}", result.price, result.confidence_95());
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod rng;
