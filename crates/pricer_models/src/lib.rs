//! # Pricer Models (L2: Business Logic)
//!
//! Deterministic pricing models built on the numerical foundation in
//! `pricer_core`.
//!
//! This crate provides:
//! - Fixed-coupon bonds: price, yield to maturity, duration, convexity and
//!   first/second-order price change estimates
//! - Cash-flow schedules, discount-factor bootstrapping and uniform-price
//!   bond auctions
//! - Black-Scholes-Merton closed-form values, deltas and implied volatility
//! - Binomial trees for European and American calls and puts
//!
//! ## Design Principles
//!
//! - **Enum-based option kinds**: [`instruments::OptionRight`] ×
//!   [`instruments::ExerciseStyle`] select payoff and exercise rule
//! - **Immutable parameters**: `with_*` methods construct a new validated
//!   model rather than mutating derived state
//! - **Bounded searches**: every yield and volatility inversion has an
//!   iteration cap and reports failure as an error

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;
