//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing, solver and statistics operations
//!
//! # Re-exports
//!
//! [`PricingError`], [`SolverError`] and [`StatsError`] are re-exported at this level.

pub mod error;

pub use error::{PricingError, SolverError, StatsError};
