//! Recombining binomial lattices for European and American options.
//!
//! The tree drifts at the cost of carry: each period the asset moves up by
//! `u = e^((r-q)h + σ√h)` or down by `d = e^((r-q)h - σ√h)`, with
//! risk-neutral up probability `p* = (e^((r-q)h) - d) / (u - d)`.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{ExerciseStyle, OptionRight};
//! use pricer_models::lattice::{BinomialOption, TreeParams};
//!
//! let params = TreeParams {
//!     spot: 100.0, volatility: 0.25, rate: 0.04, dividend: 0.02,
//!     years: 0.5, periods: 200,
//! };
//! let european = BinomialOption::new(params, 100.0, OptionRight::Put, ExerciseStyle::European).unwrap();
//! let american = BinomialOption::new(params, 100.0, OptionRight::Put, ExerciseStyle::American).unwrap();
//! assert!(american.value() >= european.value());
//! ```

mod binomial;
mod error;

pub use binomial::{BinomialOption, BinomialTree, TreeParams, MAX_PERIODS};
pub use error::LatticeError;
