//! Numerical building blocks shared by every pricing layer.
//!
//! - [`solvers`]: Bisection root-finding with configurable accuracy
//! - [`distributions`]: Standard normal CDF, PDF and inverse CDF
//! - [`stats`]: Descriptive statistics, returns and empirical quantiles

pub mod distributions;
pub mod solvers;
pub mod stats;
