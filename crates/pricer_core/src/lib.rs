//! # pricer_core: Numerical Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Bisection root-finding for yield-to-maturity and implied volatility (`math::solvers`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Descriptive statistics over price and return series (`math::stats`)
//! - Error types: `PricingError`, `SolverError`, `StatsError` (`types::error`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: Generic floating-point solvers
//! - thiserror: Error derivation
//! - tracing: Solver diagnostics
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};
//! use pricer_core::math::stats::{mean, simple_returns};
//!
//! let returns = simple_returns(&[100.0, 102.0, 99.96]).unwrap();
//! assert!((mean(&returns).unwrap() - 0.0).abs() < 1e-12);
//!
//! // Level at which the standard normal CDF reaches 97.5%
//! let solver = BisectionSolver::new(SolverConfig::new(1e-12, 100)).with_bracket(0.0, 5.0);
//! let z = solver
//!     .find_root(norm_cdf::<f64>, 0.975, Monotonicity::Increasing)
//!     .unwrap();
//! assert!((z - 1.959964).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for error, solver and statistics types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
