//! Root-finding solvers for inverting pricing functions.
//!
//! ## Available Solvers
//!
//! - [`BisectionSolver`]: Interval halving for monotone objectives, used to
//!   solve for bond yield to maturity and Black-Scholes-Merton implied volatility
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Accepted residual `|target - f(x)|` (default: 1e-10)
//! - `max_iterations`: Iteration cap (default: 100)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};
//!
//! // Annually compounded rate at which 100 grows to 110 in one year
//! let solver = BisectionSolver::new(SolverConfig::new(1e-10, 100));
//! let rate = solver
//!     .find_root(|r: f64| 100.0 * (1.0 + r), 110.0, Monotonicity::Increasing)
//!     .unwrap();
//! assert!((rate - 0.10).abs() < 1e-9);
//! ```

mod bisection;
mod config;

pub use bisection::{BisectionSolver, Monotonicity};
pub use config::SolverConfig;
