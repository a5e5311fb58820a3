//! Closed-form option pricing.
//!
//! - [`BlackScholesMerton`]: European call and put values, deltas and
//!   implied volatility on an underlying paying a continuous dividend yield
//! - [`option_value_table`]: Values and deltas across a range of spots
//!
//! Normal distribution functions come from
//! [`pricer_core::math::distributions`].

mod black_scholes;
mod error;

pub use black_scholes::{option_value_table, BlackScholesMerton, BsmParams, OptionValueRow};
pub use error::AnalyticalError;
