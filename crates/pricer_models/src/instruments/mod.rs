//! Financial instrument definitions.
//!
//! # Instrument Types
//!
//! - [`Bond`]: Fixed-coupon bullet bond with price, yield, duration and convexity
//! - [`CashflowSchedule`]: Explicit payment times and amounts, plus
//!   [`bootstrap_discount_factors`] for implied discount curves
//! - [`BondAuction`]: Uniform-price auction clearing for a new bond issue
//!
//! # Option Descriptors
//!
//! - [`OptionRight`]: Call or put, with intrinsic payoff
//! - [`ExerciseStyle`]: European or American
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{bond_price, bond_yield_to_maturity, OptionRight};
//!
//! let price = bond_price(1000.0, 0.05, 5, 2, 0.04).unwrap();
//! let ytm = bond_yield_to_maturity(1000.0, 0.05, 5, 2, price).unwrap();
//! assert!((ytm - 0.04).abs() < 1e-6);
//!
//! assert_eq!(OptionRight::Put.intrinsic(90.0, 100.0), 10.0);
//! ```

mod auction;
mod bond;
mod error;
mod exercise;
mod payoff;
mod schedule;

pub use auction::{Allocation, AuctionResult, Bid, BondAuction};
pub use bond::{
    bond_cashflows, bond_convexity, bond_duration, bond_price, bond_yield_to_maturity,
    cashflow_times, discount_factors, estimate_change_in_price1, estimate_change_in_price2,
    macaulay_duration, modified_duration, Bond, BondRiskMetrics, MAX_PAYMENT_PERIODS,
};
pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use payoff::OptionRight;
pub use schedule::{bootstrap_discount_factors, CashflowSchedule};
