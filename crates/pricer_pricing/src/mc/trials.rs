//! Chunked, optionally parallel execution of independent trials.
//!
//! Trials are split into chunks of [`CHUNK_TRIALS`]; chunk `k` draws from
//! `PricerRng::for_stream(seed, k)`. Results are returned in trial order,
//! so a seeded run gives identical output sequentially and on any number
//! of rayon threads.

use rayon::prelude::*;

use super::config::{MonteCarloConfig, CHUNK_TRIALS};
use crate::rng::PricerRng;

/// Runs `config.n_trials()` calls of `trial` and collects their results.
///
/// An unseeded configuration draws a fresh seed from the thread-local
/// generator; the seed is logged at debug level so the run can be replayed.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{run_trials, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder().n_trials(10_000).seed(1).build().unwrap();
/// let draws = run_trials(&config, |rng| rng.gen_normal());
/// assert_eq!(draws.len(), 10_000);
///
/// let sequential = MonteCarloConfig::builder()
///     .n_trials(10_000).seed(1).parallel(false).build().unwrap();
/// assert_eq!(draws, run_trials(&sequential, |rng| rng.gen_normal()));
/// ```
pub fn run_trials<R, F>(config: &MonteCarloConfig, trial: F) -> Vec<R>
where
    R: Send,
    F: Fn(&mut PricerRng) -> R + Sync,
{
    let seed = config.resolve_seed();
    let n_trials = config.n_trials();
    let n_chunks = n_trials.div_ceil(CHUNK_TRIALS);
    tracing::debug!(
        seed,
        n_trials,
        n_chunks,
        parallel = config.parallel(),
        "running monte carlo trials"
    );

    let run_chunk = |chunk: usize| -> Vec<R> {
        let mut rng = PricerRng::for_stream(seed, chunk as u64);
        let start = chunk * CHUNK_TRIALS;
        let end = (start + CHUNK_TRIALS).min(n_trials);
        (start..end).map(|_| trial(&mut rng)).collect()
    };

    let chunks: Vec<Vec<R>> = if config.parallel() {
        (0..n_chunks).into_par_iter().map(run_chunk).collect()
    } else {
        (0..n_chunks).map(run_chunk).collect()
    };
    chunks.into_iter().flatten().collect()
}
