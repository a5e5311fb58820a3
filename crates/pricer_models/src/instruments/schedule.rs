//! Arbitrary cash-flow schedules and discount-factor bootstrapping.
//!
//! Unlike [`Bond`](super::Bond), a schedule carries explicit payment
//! times in years and discounts at an annually compounded rate:
//! `df(t) = 1 / (1 + r)^t`.

use nalgebra::{DMatrix, DVector};

use super::error::InstrumentError;

/// Payment times (in years) paired with cash-flow amounts.
///
/// # Examples
/// ```
/// use pricer_models::instruments::CashflowSchedule;
///
/// // Ten-year zero-coupon bond paying 1000
/// let mut cashflows = vec![0.0; 10];
/// cashflows[9] = 1000.0;
/// let times: Vec<f64> = (1..=10).map(f64::from).collect();
///
/// let schedule = CashflowSchedule::new(times, cashflows).unwrap();
/// assert!((schedule.duration(0.035).unwrap() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashflowSchedule {
    times: Vec<f64>,
    cashflows: Vec<f64>,
}

impl CashflowSchedule {
    /// Creates a schedule from paired times and amounts.
    ///
    /// # Errors
    /// - `InstrumentError::LengthMismatch` if the vectors differ in length
    /// - `InstrumentError::InvalidParameter` if empty or a time is negative or not finite
    pub fn new(times: Vec<f64>, cashflows: Vec<f64>) -> Result<Self, InstrumentError> {
        if times.len() != cashflows.len() {
            return Err(InstrumentError::LengthMismatch {
                left: times.len(),
                right: cashflows.len(),
            });
        }
        if times.is_empty() {
            return Err(InstrumentError::InvalidParameter {
                message: "cash-flow schedule is empty".to_string(),
            });
        }
        if let Some(t) = times.iter().find(|t| !(t.is_finite() && **t >= 0.0)) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("payment time {} must be finite and non-negative", t),
            });
        }
        Ok(Self { times, cashflows })
    }

    /// Payment times in years.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Cash-flow amounts.
    pub fn cashflows(&self) -> &[f64] {
        &self.cashflows
    }

    fn discount_factors(&self, rate: f64) -> Result<Vec<f64>, InstrumentError> {
        if !rate.is_finite() || rate <= -1.0 {
            return Err(InstrumentError::InvalidRate { rate });
        }
        Ok(self.times.iter().map(|t| (1.0 + rate).powf(-t)).collect())
    }

    /// Present value at the annually compounded rate `rate`.
    pub fn price(&self, rate: f64) -> Result<f64, InstrumentError> {
        let dfs = DVector::from_vec(self.discount_factors(rate)?);
        let cfs = DVector::from_column_slice(&self.cashflows);
        Ok(dfs.dot(&cfs))
    }

    /// Present-value-weighted average payment time: Σ t·cf·df / P.
    pub fn duration(&self, rate: f64) -> Result<f64, InstrumentError> {
        let price = self.price(rate)?;
        let dfs = self.discount_factors(rate)?;
        let weighted: f64 = self
            .times
            .iter()
            .zip(&self.cashflows)
            .zip(dfs)
            .map(|((t, cf), df)| t * cf * df)
            .sum();
        Ok(weighted / price)
    }
}

/// Implied discount factors from a set of instruments and their prices.
///
/// Row `i` of `cashflows` holds instrument `i`'s payments on each of the
/// common payment dates. With `n` instruments over `n` dates the system
/// `C · d = P` is solved for the discount factors `d`.
///
/// # Errors
/// - `InstrumentError::LengthMismatch` if rows and prices differ in count
///   or a row has the wrong number of dates
/// - `InstrumentError::SingularMatrix` if the cash-flow matrix is not
///   square or cannot be inverted
///
/// # Examples
/// ```
/// use pricer_models::instruments::bootstrap_discount_factors;
///
/// // One-year zero at 95 and a two-year 5% annual coupon bond at 99
/// let cashflows = vec![vec![100.0, 0.0], vec![5.0, 105.0]];
/// let prices = vec![95.0, 99.0];
/// let d = bootstrap_discount_factors(&cashflows, &prices).unwrap();
/// assert!((d[0] - 0.95).abs() < 1e-12);
/// assert!((d[1] - (99.0 - 5.0 * 0.95) / 105.0).abs() < 1e-12);
/// ```
pub fn bootstrap_discount_factors(
    cashflows: &[Vec<f64>],
    prices: &[f64],
) -> Result<Vec<f64>, InstrumentError> {
    let rows = cashflows.len();
    if rows != prices.len() {
        return Err(InstrumentError::LengthMismatch {
            left: rows,
            right: prices.len(),
        });
    }
    let cols = cashflows.first().map_or(0, Vec::len);
    if let Some(row) = cashflows.iter().find(|row| row.len() != cols) {
        return Err(InstrumentError::LengthMismatch {
            left: cols,
            right: row.len(),
        });
    }
    if rows == 0 || rows != cols {
        return Err(InstrumentError::SingularMatrix { rows, cols });
    }

    let matrix = DMatrix::from_fn(rows, cols, |i, j| cashflows[i][j]);
    let rhs = DVector::from_column_slice(prices);
    let solved = matrix
        .lu()
        .solve(&rhs)
        .ok_or(InstrumentError::SingularMatrix { rows, cols })?;

    tracing::debug!(instruments = rows, "bootstrapped discount factors");
    Ok(solved.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_schedule_price_matches_manual_sum() {
        let schedule = CashflowSchedule::new(vec![0.5, 1.0, 1.5], vec![3.0, 3.0, 103.0]).unwrap();
        let expected = 3.0 / 1.06_f64.powf(0.5) + 3.0 / 1.06 + 103.0 / 1.06_f64.powf(1.5);
        assert_relative_eq!(schedule.price(0.06).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_duration_below_final_time_for_coupon_bond() {
        let times: Vec<f64> = (1..=5).map(f64::from).collect();
        let schedule = CashflowSchedule::new(times, vec![5.0, 5.0, 5.0, 5.0, 105.0]).unwrap();
        let d = schedule.duration(0.05).unwrap();
        assert!(d > 4.0 && d < 5.0, "duration {} out of range", d);
    }

    #[test]
    fn test_schedule_validation() {
        assert!(matches!(
            CashflowSchedule::new(vec![1.0], vec![1.0, 2.0]),
            Err(InstrumentError::LengthMismatch { left: 1, right: 2 })
        ));
        assert!(CashflowSchedule::new(vec![], vec![]).is_err());
        assert!(CashflowSchedule::new(vec![-1.0], vec![1.0]).is_err());

        let schedule = CashflowSchedule::new(vec![1.0], vec![100.0]).unwrap();
        assert!(matches!(
            schedule.price(-1.0),
            Err(InstrumentError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_bootstrap_recovers_known_curve() {
        let curve = [0.97, 0.93, 0.88];
        let cashflows = vec![
            vec![104.0, 0.0, 0.0],
            vec![3.0, 103.0, 0.0],
            vec![6.0, 6.0, 106.0],
        ];
        let prices: Vec<f64> = cashflows
            .iter()
            .map(|row| row.iter().zip(&curve).map(|(cf, d)| cf * d).sum())
            .collect();

        let d = bootstrap_discount_factors(&cashflows, &prices).unwrap();
        for (got, want) in d.iter().zip(curve) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bootstrap_singular() {
        let cashflows = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        match bootstrap_discount_factors(&cashflows, &[1.0, 2.0]) {
            Err(InstrumentError::SingularMatrix { rows, cols }) => {
                assert_eq!((rows, cols), (2, 2));
            }
            other => panic!("Expected SingularMatrix, got {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_shape_errors() {
        assert!(matches!(
            bootstrap_discount_factors(&[vec![1.0, 0.0]], &[1.0]),
            Err(InstrumentError::SingularMatrix { rows: 1, cols: 2 })
        ));
        assert!(matches!(
            bootstrap_discount_factors(&[vec![1.0]], &[1.0, 2.0]),
            Err(InstrumentError::LengthMismatch { .. })
        ));
        assert!(matches!(
            bootstrap_discount_factors(&[vec![1.0, 0.0], vec![1.0]], &[1.0, 2.0]),
            Err(InstrumentError::LengthMismatch { .. })
        ));
    }
}
