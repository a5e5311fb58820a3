//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for Monte Carlo simulation.
//!
//! - **Reproducibility**: every generator is created from an explicit seed
//! - **Parallel streams**: [`PricerRng::for_stream`] derives an independent
//!   generator per trial chunk from `(seed, chunk index)`
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;

#[cfg(test)]
mod tests;
