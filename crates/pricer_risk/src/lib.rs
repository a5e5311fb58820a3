//! # Pricer Risk (L4: Application)
//!
//! Risk measures and mean-variance portfolio analytics.
//!
//! This crate provides:
//! - Model and historical Value at Risk
//! - Drawdown series, maximum drawdown and simulated drawdown distributions
//! - Global minimum-variance and efficient-frontier portfolios
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  var/        - model, historical VaR    │
//! │  drawdown/   - running max, MC trials   │
//! │  portfolio/  - GMV, efficient frontier  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  GBM paths and seeded trial fan-out     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_risk::drawdown::max_drawdown;
//! use pricer_risk::var::model_var_pct;
//!
//! let dd = max_drawdown(&[100.0, 110.0, 88.0, 120.0]).unwrap();
//! assert!((dd - 0.2).abs() < 1e-12);
//!
//! let var = model_var_pct(0.0, 0.01, 0.99, 10.0).unwrap();
//! assert!(var < 0.0);
//! ```

#![warn(missing_docs)]

pub mod drawdown;
mod error;
pub mod portfolio;
pub mod var;

pub use error::RiskError;
