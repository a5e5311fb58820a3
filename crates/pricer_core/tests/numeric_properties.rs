//! Property-based tests for the distribution and statistics primitives.

use pricer_core::math::distributions::{norm_cdf, norm_inv};
use pricer_core::math::stats::{correlation, quantile, sample_variance, variance};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_norm_inv_inverts_cdf(p in 1e-8_f64..(1.0 - 1e-8)) {
        let x = norm_inv(p);
        prop_assert!((norm_cdf(x) - p).abs() < 1e-12 + 1e-9 * p);
    }

    #[test]
    fn prop_norm_cdf_monotone(x in -8.0_f64..8.0, step in 1e-3_f64..1.0) {
        prop_assert!(norm_cdf(x + step) >= norm_cdf(x));
    }

    #[test]
    fn prop_quantile_within_range_and_ordered(
        values in prop::collection::vec(-1e3_f64..1e3, 1..60),
        q1 in 0.0_f64..=1.0,
        q2 in 0.0_f64..=1.0,
    ) {
        let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
        let a = quantile(&values, lo).unwrap();
        let b = quantile(&values, hi).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(a >= min - 1e-9 && b <= max + 1e-9);
        prop_assert!(a <= b + 1e-9);
    }

    #[test]
    fn prop_sample_variance_exceeds_population(
        values in prop::collection::vec(-1e3_f64..1e3, 2..60),
    ) {
        let pop = variance(&values).unwrap();
        let sample = sample_variance(&values).unwrap();
        prop_assert!(pop >= 0.0);
        let n = values.len() as f64;
        prop_assert!((sample * (n - 1.0) / n - pop).abs() <= 1e-9 * (1.0 + pop));
    }

    #[test]
    fn prop_correlation_bounded(
        pairs in prop::collection::vec((-1e2_f64..1e2, -1e2_f64..1e2), 3..40),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Ok(r) = correlation(&x, &y) {
            prop_assert!(r.abs() <= 1.0 + 1e-9);
        }
    }
}
