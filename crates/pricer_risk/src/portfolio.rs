//! Mean-variance portfolio mathematics.
//!
//! Weights, expected returns and the covariance matrix are nalgebra
//! vectors and matrices. With `V` the covariance matrix, `e` the expected
//! returns and `1` a vector of ones, the frontier constants are
//!
//! ```text
//! a = 1ᵀV⁻¹e    b = eᵀV⁻¹e    c = 1ᵀV⁻¹1    d = bc − a²
//! ```
//!
//! and the minimum-variance portfolio for a required return `r` is the
//! two-fund combination `w = g + h·r` with `g = V⁻¹(b·1 − a·e)/d` and
//! `h = V⁻¹(c·e − a·1)/d`.

use nalgebra::{DMatrix, DVector};
use pricer_core::math::stats::covariance;
use pricer_core::types::StatsError;

use crate::error::RiskError;

fn check_len(expected: usize, got: usize) -> Result<(), RiskError> {
    if expected != got {
        return Err(RiskError::DimensionMismatch { expected, got });
    }
    Ok(())
}

fn check_square(cov: &DMatrix<f64>, n: usize) -> Result<(), RiskError> {
    check_len(n, cov.nrows())?;
    check_len(n, cov.ncols())
}

/// Inverse of a symmetric positive-definite covariance matrix.
fn invert(cov: &DMatrix<f64>) -> Result<DMatrix<f64>, RiskError> {
    cov.clone()
        .cholesky()
        .map(|chol| chol.inverse())
        .ok_or(RiskError::SingularCovariance)
}

/// Sample covariance matrix (divides by `n − 1`) of several return series.
///
/// Each element of `columns` is one asset's returns; all series must have
/// the same length of at least two.
///
/// # Examples
/// ```
/// use pricer_risk::portfolio::covariance_matrix;
///
/// let cov = covariance_matrix(&[vec![0.01, 0.03, 0.02], vec![0.02, 0.00, 0.01]]).unwrap();
/// assert!((cov[(0, 0)] - 1e-4).abs() < 1e-15);
/// assert!((cov[(0, 1)] + 1e-4).abs() < 1e-15);
/// ```
pub fn covariance_matrix(columns: &[Vec<f64>]) -> Result<DMatrix<f64>, RiskError> {
    let n_assets = columns.len();
    let n_obs = columns.first().map_or(0, Vec::len);
    if n_assets == 0 || n_obs < 2 {
        return Err(StatsError::InsufficientData {
            got: n_obs,
            need: 2,
        }
        .into());
    }
    let scale = n_obs as f64 / (n_obs - 1) as f64;
    let mut cov = DMatrix::zeros(n_assets, n_assets);
    for i in 0..n_assets {
        for j in i..n_assets {
            let c = covariance(&columns[i], &columns[j])? * scale;
            cov[(i, j)] = c;
            cov[(j, i)] = c;
        }
    }
    Ok(cov)
}

/// Expected portfolio return `eᵀw`.
pub fn portfolio_return(weights: &DVector<f64>, expected: &DVector<f64>) -> Result<f64, RiskError> {
    check_len(expected.len(), weights.len())?;
    Ok(expected.dot(weights))
}

/// Portfolio standard deviation `√(wᵀVw)`.
pub fn portfolio_stdev(weights: &DVector<f64>, cov: &DMatrix<f64>) -> Result<f64, RiskError> {
    check_square(cov, weights.len())?;
    Ok((weights.transpose() * cov * weights)[(0, 0)].max(0.0).sqrt())
}

/// Global minimum-variance weights `V⁻¹1 / c`.
///
/// # Errors
/// `RiskError::SingularCovariance` when `cov` is not positive definite.
pub fn global_min_variance_portfolio(cov: &DMatrix<f64>) -> Result<DVector<f64>, RiskError> {
    check_len(cov.nrows(), cov.ncols())?;
    let inv = invert(cov)?;
    let raw = inv * DVector::from_element(cov.nrows(), 1.0);
    let c = raw.sum();
    Ok(raw / c)
}

/// Minimum-variance weights achieving the `target` expected return.
///
/// Shorthand for [`EfficientFrontier::new`] followed by
/// [`EfficientFrontier::min_variance_portfolio`].
pub fn min_variance_portfolio(
    expected: &DVector<f64>,
    cov: &DMatrix<f64>,
    target: f64,
) -> Result<DVector<f64>, RiskError> {
    Ok(EfficientFrontier::new(expected.clone(), cov)?.min_variance_portfolio(target))
}

/// Frontier standard deviation for each required return in `targets`.
pub fn efficient_frontier_stdevs(
    expected: &DVector<f64>,
    cov: &DMatrix<f64>,
    targets: &[f64],
) -> Result<Vec<f64>, RiskError> {
    let frontier = EfficientFrontier::new(expected.clone(), cov)?;
    Ok(targets.iter().map(|&r| frontier.stdev(r)).collect())
}

/// One point on the minimum-variance frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierPoint {
    /// Required expected return.
    pub expected_return: f64,
    /// Standard deviation of the minimum-variance portfolio for that return.
    pub stdev: f64,
}

/// Precomputed minimum-variance frontier for a set of assets.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use pricer_risk::portfolio::EfficientFrontier;
///
/// let expected = DVector::from_vec(vec![0.10, 0.15]);
/// let cov = DMatrix::from_diagonal(&DVector::from_vec(vec![0.04, 0.09]));
/// let frontier = EfficientFrontier::new(expected, &cov).unwrap();
///
/// let w = frontier.min_variance_portfolio(0.12);
/// assert!((w[0] - 0.6).abs() < 1e-12 && (w[1] - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct EfficientFrontier {
    expected: DVector<f64>,
    cov: DMatrix<f64>,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    g: DVector<f64>,
    h: DVector<f64>,
}

impl EfficientFrontier {
    /// Build the frontier from expected returns and their covariance.
    ///
    /// # Errors
    /// - `RiskError::DimensionMismatch` when the shapes disagree
    /// - `RiskError::SingularCovariance` when `cov` is not positive definite
    /// - `RiskError::DegenerateFrontier` when all expected returns coincide
    pub fn new(expected: DVector<f64>, cov: &DMatrix<f64>) -> Result<Self, RiskError> {
        let n = expected.len();
        check_square(cov, n)?;
        let inv = invert(cov)?;
        let ones = DVector::from_element(n, 1.0);

        let inv_e = &inv * &expected;
        let inv_1 = &inv * &ones;
        let a = ones.dot(&inv_e);
        let b = expected.dot(&inv_e);
        let c = ones.dot(&inv_1);
        let d = b * c - a * a;
        if !(d > 1e-12 * b.abs().max(1.0) * c) {
            return Err(RiskError::DegenerateFrontier { determinant: d });
        }

        let g = (&inv_1 * b - &inv_e * a) / d;
        let h = (&inv_e * c - &inv_1 * a) / d;
        tracing::debug!(assets = n, a, b, c, d, "efficient frontier constants");

        Ok(Self {
            expected,
            cov: cov.clone(),
            a,
            b,
            c,
            d,
            g,
            h,
        })
    }

    /// Number of assets.
    pub fn n_assets(&self) -> usize {
        self.expected.len()
    }

    /// The constants `(a, b, c, d)`.
    pub fn constants(&self) -> (f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d)
    }

    /// Expected return of the global minimum-variance portfolio, `a / c`.
    pub fn min_variance_return(&self) -> f64 {
        self.a / self.c
    }

    /// Weights `g + h·target`.
    pub fn min_variance_portfolio(&self, target: f64) -> DVector<f64> {
        &self.g + &self.h * target
    }

    /// Frontier standard deviation `√((c·r² − 2a·r + b) / d)`.
    pub fn stdev(&self, target: f64) -> f64 {
        let var = (self.c * target * target - 2.0 * self.a * target + self.b) / self.d;
        var.max(0.0).sqrt()
    }

    /// Frontier points for each required return.
    pub fn points(&self, targets: &[f64]) -> Vec<FrontierPoint> {
        targets
            .iter()
            .map(|&r| FrontierPoint {
                expected_return: r,
                stdev: self.stdev(r),
            })
            .collect()
    }

    /// Expected returns the frontier was built from.
    pub fn expected(&self) -> &DVector<f64> {
        &self.expected
    }

    /// Covariance matrix the frontier was built from.
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.cov
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_assets() -> (DVector<f64>, DMatrix<f64>) {
        let expected = DVector::from_vec(vec![0.08, 0.12, 0.15]);
        #[rustfmt::skip]
        let cov = DMatrix::from_row_slice(3, 3, &[
            0.040, 0.006, 0.010,
            0.006, 0.090, 0.018,
            0.010, 0.018, 0.160,
        ]);
        (expected, cov)
    }

    // ================================================================
    // Single portfolio measures
    // ================================================================

    #[test]
    fn test_return_and_stdev() {
        let (expected, cov) = three_assets();
        let w = DVector::from_vec(vec![0.5, 0.3, 0.2]);
        assert_relative_eq!(
            portfolio_return(&w, &expected).unwrap(),
            0.04 + 0.036 + 0.03,
            epsilon = 1e-12
        );
        // 0.25·0.04 + 0.09·0.09 + 0.04·0.16 + 2(0.15·0.006 + 0.1·0.01 + 0.06·0.018)
        let var: f64 = 0.01 + 0.0081 + 0.0064 + 2.0 * (0.0009 + 0.001 + 0.00108);
        assert_relative_eq!(portfolio_stdev(&w, &cov).unwrap(), var.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let (expected, cov) = three_assets();
        let w = DVector::from_vec(vec![0.5, 0.5]);
        assert_eq!(
            portfolio_return(&w, &expected),
            Err(RiskError::DimensionMismatch { expected: 3, got: 2 })
        );
        assert!(portfolio_stdev(&w, &cov).is_err());
        assert!(EfficientFrontier::new(DVector::from_vec(vec![0.1, 0.2]), &cov).is_err());
    }

    // ================================================================
    // Global minimum variance
    // ================================================================

    #[test]
    fn test_gmv_diagonal_is_inverse_variance() {
        let cov = DMatrix::from_diagonal(&DVector::from_vec(vec![0.04, 0.09]));
        let w = global_min_variance_portfolio(&cov).unwrap();
        assert_relative_eq!(w[0], 25.0 / (25.0 + 100.0 / 9.0), epsilon = 1e-12);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gmv_has_lowest_stdev() {
        let (expected, cov) = three_assets();
        let gmv = global_min_variance_portfolio(&cov).unwrap();
        assert_relative_eq!(gmv.sum(), 1.0, epsilon = 1e-12);

        let frontier = EfficientFrontier::new(expected, &cov).unwrap();
        let gmv_sd = portfolio_stdev(&gmv, &cov).unwrap();
        for r in [0.06, 0.09, 0.11, 0.14, 0.2] {
            assert!(frontier.stdev(r) >= gmv_sd - 1e-12);
        }
        let at_gmv = frontier.min_variance_portfolio(frontier.min_variance_return());
        assert_relative_eq!(at_gmv, gmv, epsilon = 1e-10);
    }

    #[test]
    fn test_singular_covariance() {
        let cov = DMatrix::from_row_slice(2, 2, &[0.04, 0.04, 0.04, 0.04]);
        assert_eq!(
            global_min_variance_portfolio(&cov),
            Err(RiskError::SingularCovariance)
        );
    }

    // ================================================================
    // Efficient frontier
    // ================================================================

    #[test]
    fn test_min_variance_portfolio_hits_target() {
        let (expected, cov) = three_assets();
        for r in [0.05, 0.1, 0.13, 0.25] {
            let w = min_variance_portfolio(&expected, &cov, r).unwrap();
            assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-10);
            assert_relative_eq!(portfolio_return(&w, &expected).unwrap(), r, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_frontier_stdev_matches_weights() {
        let (expected, cov) = three_assets();
        let targets = [0.07, 0.1, 0.12, 0.16];
        let stdevs = efficient_frontier_stdevs(&expected, &cov, &targets).unwrap();
        let frontier = EfficientFrontier::new(expected, &cov).unwrap();
        for (r, sd) in targets.iter().zip(&stdevs) {
            let w = frontier.min_variance_portfolio(*r);
            assert_relative_eq!(portfolio_stdev(&w, &cov).unwrap(), *sd, epsilon = 1e-10);
        }
        assert_eq!(frontier.points(&targets)[2].stdev, stdevs[2]);
    }

    #[test]
    fn test_two_asset_frontier() {
        let expected = DVector::from_vec(vec![0.10, 0.15]);
        let cov = DMatrix::from_diagonal(&DVector::from_vec(vec![0.04, 0.09]));
        let frontier = EfficientFrontier::new(expected, &cov).unwrap();
        assert_relative_eq!(frontier.stdev(0.12), 0.0288_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_equal_returns_are_degenerate() {
        let (_, cov) = three_assets();
        let expected = DVector::from_element(3, 0.1);
        assert!(matches!(
            EfficientFrontier::new(expected, &cov),
            Err(RiskError::DegenerateFrontier { .. })
        ));
    }

    // ================================================================
    // Covariance matrix
    // ================================================================

    #[test]
    fn test_covariance_matrix_is_sample() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 1.0, 4.0, 3.0];
        let cov = covariance_matrix(&[x, y]).unwrap();
        // Σ(x − 2.5)² = 5 over n − 1 = 3
        assert_relative_eq!(cov[(0, 0)], 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(0, 1)], 3.0 / 3.0, epsilon = 1e-12);
        assert_eq!(cov[(0, 1)], cov[(1, 0)]);
    }

    #[test]
    fn test_covariance_matrix_errors() {
        assert!(matches!(
            covariance_matrix(&[vec![1.0]]),
            Err(RiskError::Stats(StatsError::InsufficientData { .. }))
        ));
        assert!(matches!(
            covariance_matrix(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]),
            Err(RiskError::Stats(StatsError::LengthMismatch { .. }))
        ));
    }
}
