//! Statistical and reproducibility tests for [`PricerRng`].

use super::PricerRng;

// ================================================================
// Reproducibility
// ================================================================

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PricerRng::from_seed(2024);
    let mut b = PricerRng::from_seed(2024);
    for _ in 0..100 {
        assert_eq!(a.gen_normal(), b.gen_normal());
    }
    assert_eq!(a.seed(), 2024);
}

#[test]
fn test_streams_differ_from_each_other_and_parent() {
    let mut parent = PricerRng::from_seed(99);
    let first: Vec<f64> = (0..8).map(|_| parent.gen_uniform()).collect();
    for stream in 0..16 {
        let mut child = PricerRng::for_stream(99, stream);
        let draws: Vec<f64> = (0..8).map(|_| child.gen_uniform()).collect();
        assert_ne!(draws, first, "stream {} repeats the parent sequence", stream);
    }
    assert_ne!(
        PricerRng::for_stream(99, 0).seed(),
        PricerRng::for_stream(99, 1).seed()
    );
    assert_ne!(
        PricerRng::for_stream(99, 0).seed(),
        PricerRng::for_stream(100, 0).seed()
    );
}

// ================================================================
// Distribution moments
// ================================================================

#[test]
fn test_uniform_range_and_mean() {
    let mut rng = PricerRng::from_seed(1);
    let n = 100_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let u = rng.gen_uniform();
        assert!((0.0..1.0).contains(&u));
        sum += u;
    }
    assert!((sum / n as f64 - 0.5).abs() < 0.01);
}

#[test]
fn test_normal_moments() {
    let mut rng = PricerRng::from_seed(7);
    let mut buffer = vec![0.0; 200_000];
    rng.fill_normal(&mut buffer);
    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let var = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    assert!(mean.abs() < 0.01, "mean {}", mean);
    assert!((var - 1.0).abs() < 0.02, "variance {}", var);
}

#[test]
fn test_fill_empty_buffer() {
    let mut rng = PricerRng::from_seed(3);
    let mut empty: Vec<f64> = Vec::new();
    rng.fill_normal(&mut empty);
    assert!(empty.is_empty());
}
