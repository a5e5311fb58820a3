//! Fixed-coupon bond pricing and interest-rate risk.
//!
//! A bond pays `coupon_rate / m · face_value` at the end of each of its
//! `years · m` periods and returns the face value with the final coupon.
//! Rates are annualised and compounded `m` times per year, so the discount
//! factor for period `k` is `1 / (1 + r/m)^k`.
//!
//! ## Risk measures
//!
//! - **Duration**: Σ k·df_k·cf_k / m / P, in years
//! - **Modified duration**: Macaulay duration / (1 + y/m)
//! - **Convexity**: Σ df_k·k·(k+1)·cf_k / (P·m²·(1 + r/m)²)
//!
//! Both the [`Bond`] value type and free functions taking
//! `(fv, c, n, m, ...)` positional arguments are provided; the free
//! functions validate their inputs by constructing a `Bond`.

use pricer_core::math::solvers::{BisectionSolver, Monotonicity, SolverConfig};

use super::error::InstrumentError;

/// Longest schedule a bond may have, in payment periods.
pub const MAX_PAYMENT_PERIODS: u32 = 100_000;

/// Fixed-coupon bullet bond.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Bond;
///
/// // 5-year 5% semi-annual bond with 1000 face value
/// let bond = Bond::new(1000.0, 0.05, 5, 2).unwrap();
/// let price = bond.price(0.04).unwrap();
/// assert!((price - 1044.9129).abs() < 1e-4);
///
/// let ytm = bond.yield_to_maturity(price).unwrap();
/// assert!((bond.price(ytm).unwrap() - price).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bond {
    face_value: f64,
    coupon_rate: f64,
    years: u32,
    payments_per_year: u32,
}

/// Yield and risk measures implied by an observed bond price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondRiskMetrics {
    /// Observed price the metrics were derived from.
    pub price: f64,
    /// Annualised yield to maturity.
    pub yield_to_maturity: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity at the yield to maturity.
    pub convexity: f64,
}

impl Bond {
    /// Creates a new bond.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidFaceValue` if `face_value <= 0` or not finite
    /// - `InstrumentError::InvalidRate` if `coupon_rate` is not finite
    /// - `InstrumentError::InvalidSchedule` if `years == 0`,
    ///   `payments_per_year == 0` or the bond has more than
    ///   [`MAX_PAYMENT_PERIODS`] periods
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        years: u32,
        payments_per_year: u32,
    ) -> Result<Self, InstrumentError> {
        if !(face_value.is_finite() && face_value > 0.0) {
            return Err(InstrumentError::InvalidFaceValue { face_value });
        }
        if !coupon_rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate: coupon_rate });
        }
        if years == 0 || payments_per_year == 0 {
            return Err(InstrumentError::InvalidSchedule {
                years,
                payments_per_year,
            });
        }
        payment_periods(years, payments_per_year)?;
        Ok(Self {
            face_value,
            coupon_rate,
            years,
            payments_per_year,
        })
    }

    /// Face (par) value repaid at maturity.
    #[inline]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate.
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    #[inline]
    pub fn years(&self) -> u32 {
        self.years
    }

    /// Coupon payments (and compounding periods) per year.
    #[inline]
    pub fn payments_per_year(&self) -> u32 {
        self.payments_per_year
    }

    /// Total number of payment periods.
    #[inline]
    pub fn periods(&self) -> usize {
        self.years as usize * self.payments_per_year as usize
    }

    /// Period indices `1..=n·m`.
    pub fn cashflow_times(&self) -> Vec<u32> {
        (1..=self.years * self.payments_per_year).collect()
    }

    /// Coupon per period, with the face value added to the last one.
    pub fn cashflows(&self) -> Vec<f64> {
        level_cashflows(
            self.face_value,
            self.coupon_rate,
            self.payments_per_year,
            self.years * self.payments_per_year,
        )
    }

    fn check_rate(&self, rate: f64) -> Result<(), InstrumentError> {
        if !rate.is_finite() || 1.0 + rate / self.payments_per_year as f64 <= 0.0 {
            return Err(InstrumentError::InvalidRate { rate });
        }
        Ok(())
    }

    /// Per-period discount factors at the annualised rate `rate`.
    pub fn discount_factors(&self, rate: f64) -> Result<Vec<f64>, InstrumentError> {
        self.check_rate(rate)?;
        Ok(discount_curve(
            rate,
            self.payments_per_year,
            self.years * self.payments_per_year,
        ))
    }

    /// Present value of all cash flows at `rate`.
    pub fn price(&self, rate: f64) -> Result<f64, InstrumentError> {
        let dfs = self.discount_factors(rate)?;
        Ok(dfs.iter().zip(self.cashflows()).map(|(df, cf)| df * cf).sum())
    }

    /// Annualised yield at which [`price`](Self::price) matches `price`
    /// to within 1e-4.
    ///
    /// The search covers yields in `[0, 1]`; a price above the undiscounted
    /// sum of cash flows (a negative yield) reports `YieldNotFound`.
    pub fn yield_to_maturity(&self, price: f64) -> Result<f64, InstrumentError> {
        self.yield_to_maturity_with(price, &SolverConfig::bond_yield())
    }

    /// As [`yield_to_maturity`](Self::yield_to_maturity) with explicit
    /// solver accuracy and iteration cap.
    pub fn yield_to_maturity_with(
        &self,
        price: f64,
        config: &SolverConfig<f64>,
    ) -> Result<f64, InstrumentError> {
        if !(price.is_finite() && price > 0.0) {
            return Err(InstrumentError::InvalidPrice { price });
        }
        let cashflows = self.cashflows();
        let m = self.payments_per_year as f64;
        let pv = |rate: f64| -> f64 {
            let growth = 1.0 + rate / m;
            let mut df = 1.0;
            cashflows
                .iter()
                .map(|cf| {
                    df /= growth;
                    df * cf
                })
                .sum()
        };

        BisectionSolver::new(*config)
            .find_root(pv, price, Monotonicity::Decreasing)
            .map_err(|source| InstrumentError::YieldNotFound { price, source })
    }

    /// Σ k·df_k·cf_k / m / P at `rate`, in years.
    pub fn duration(&self, rate: f64) -> Result<f64, InstrumentError> {
        let price = self.price(rate)?;
        let weighted = self.time_weighted_pv(rate)?;
        Ok(weighted / price)
    }

    fn time_weighted_pv(&self, rate: f64) -> Result<f64, InstrumentError> {
        let m = self.payments_per_year as f64;
        let dfs = self.discount_factors(rate)?;
        Ok(dfs
            .iter()
            .zip(self.cashflows())
            .enumerate()
            .map(|(i, (df, cf))| (i + 1) as f64 * df * cf / m)
            .sum())
    }

    /// Duration weighted at the yield implied by `price`, normalised by
    /// the observed price.
    pub fn macaulay_duration(&self, price: f64) -> Result<f64, InstrumentError> {
        let ytm = self.yield_to_maturity(price)?;
        self.macaulay_at(price, ytm)
    }

    fn macaulay_at(&self, price: f64, ytm: f64) -> Result<f64, InstrumentError> {
        Ok(self.time_weighted_pv(ytm)? / price)
    }

    /// Macaulay duration / (1 + ytm/m).
    pub fn modified_duration(&self, price: f64) -> Result<f64, InstrumentError> {
        let ytm = self.yield_to_maturity(price)?;
        self.modified_at(price, ytm)
    }

    fn modified_at(&self, price: f64, ytm: f64) -> Result<f64, InstrumentError> {
        let m = self.payments_per_year as f64;
        Ok(self.macaulay_at(price, ytm)? / (1.0 + ytm / m))
    }

    /// Σ df_k·k·(k+1)·cf_k / (P·m²·(1 + r/m)²) at `rate`.
    pub fn convexity(&self, rate: f64) -> Result<f64, InstrumentError> {
        let price = self.price(rate)?;
        let m = self.payments_per_year as f64;
        let dfs = self.discount_factors(rate)?;
        let numerator: f64 = dfs
            .iter()
            .zip(self.cashflows())
            .enumerate()
            .map(|(i, (df, cf))| {
                let k = (i + 1) as f64;
                df * k * (k + 1.0) * cf
            })
            .sum();
        Ok(numerator / (price * m * m * (1.0 + rate / m).powi(2)))
    }

    /// First-order price change for a yield shift `dr`: `-D_mod · P · dr`.
    pub fn estimate_change_in_price1(&self, price: f64, dr: f64) -> Result<f64, InstrumentError> {
        Ok(-self.modified_duration(price)? * price * dr)
    }

    /// Second-order price change: `P · (-D_mod·dr + C/2·dr²)`, with
    /// convexity evaluated at the yield to maturity.
    pub fn estimate_change_in_price2(&self, price: f64, dr: f64) -> Result<f64, InstrumentError> {
        let metrics = self.risk_metrics(price)?;
        Ok(price * (-metrics.modified_duration * dr + metrics.convexity / 2.0 * dr * dr))
    }

    /// Yield, durations and convexity implied by `price`, solving for the
    /// yield once.
    pub fn risk_metrics(&self, price: f64) -> Result<BondRiskMetrics, InstrumentError> {
        self.risk_metrics_with(price, &SolverConfig::bond_yield())
    }

    /// As [`risk_metrics`](Self::risk_metrics) with an explicit yield
    /// search configuration.
    pub fn risk_metrics_with(
        &self,
        price: f64,
        config: &SolverConfig<f64>,
    ) -> Result<BondRiskMetrics, InstrumentError> {
        let ytm = self.yield_to_maturity_with(price, config)?;
        let metrics = BondRiskMetrics {
            price,
            yield_to_maturity: ytm,
            macaulay_duration: self.macaulay_at(price, ytm)?,
            modified_duration: self.modified_at(price, ytm)?,
            convexity: self.convexity(ytm)?,
        };
        tracing::debug!(?metrics, "bond risk metrics");
        Ok(metrics)
    }
}

/// `n·m`, rejected when it overflows or exceeds [`MAX_PAYMENT_PERIODS`].
fn payment_periods(n: u32, m: u32) -> Result<u32, InstrumentError> {
    n.checked_mul(m)
        .filter(|&periods| periods <= MAX_PAYMENT_PERIODS)
        .ok_or(InstrumentError::InvalidSchedule {
            years: n,
            payments_per_year: m,
        })
}

fn discount_curve(r: f64, m: u32, periods: u32) -> Vec<f64> {
    let growth = 1.0 + r / m as f64;
    // periods <= MAX_PAYMENT_PERIODS, so k fits in i32
    (1..=periods).map(|k| growth.powi(k as i32).recip()).collect()
}

fn level_cashflows(fv: f64, c: f64, m: u32, periods: u32) -> Vec<f64> {
    let coupon = c / m as f64 * fv;
    let mut flows = vec![coupon; periods as usize];
    if let Some(last) = flows.last_mut() {
        *last += fv;
    }
    flows
}

/// Period indices `1..=n·m` at which a bond pays.
///
/// # Errors
/// `InstrumentError::InvalidSchedule` if `n·m` exceeds [`MAX_PAYMENT_PERIODS`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::cashflow_times;
///
/// assert_eq!(cashflow_times(2, 2).unwrap(), vec![1, 2, 3, 4]);
/// ```
pub fn cashflow_times(n: u32, m: u32) -> Result<Vec<u32>, InstrumentError> {
    Ok((1..=payment_periods(n, m)?).collect())
}

/// Discount factors `1 / (1 + r/m)^k` for `k` in `1..=n·m`.
///
/// # Errors
/// `InstrumentError::InvalidSchedule` if `n·m` exceeds [`MAX_PAYMENT_PERIODS`].
pub fn discount_factors(r: f64, n: u32, m: u32) -> Result<Vec<f64>, InstrumentError> {
    Ok(discount_curve(r, m, payment_periods(n, m)?))
}

/// Cash flows of a bond: `c/m · fv` each period, plus `fv` at maturity.
///
/// # Errors
/// `InstrumentError::InvalidSchedule` if `n·m` exceeds [`MAX_PAYMENT_PERIODS`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::bond_cashflows;
///
/// assert_eq!(
///     bond_cashflows(1000.0, 0.08, 2, 2).unwrap(),
///     vec![40.0, 40.0, 40.0, 1040.0]
/// );
/// ```
pub fn bond_cashflows(fv: f64, c: f64, n: u32, m: u32) -> Result<Vec<f64>, InstrumentError> {
    Ok(level_cashflows(fv, c, m, payment_periods(n, m)?))
}

/// Price of a bond at the annualised rate `r`.
pub fn bond_price(fv: f64, c: f64, n: u32, m: u32, r: f64) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.price(r)
}

/// Annualised yield to maturity implied by `price`.
pub fn bond_yield_to_maturity(
    fv: f64,
    c: f64,
    n: u32,
    m: u32,
    price: f64,
) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.yield_to_maturity(price)
}

/// Duration at the rate `r`.
pub fn bond_duration(fv: f64, c: f64, n: u32, m: u32, r: f64) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.duration(r)
}

/// Macaulay duration at the yield implied by `price`.
pub fn macaulay_duration(
    fv: f64,
    c: f64,
    n: u32,
    m: u32,
    price: f64,
) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.macaulay_duration(price)
}

/// Modified duration at the yield implied by `price`.
pub fn modified_duration(
    fv: f64,
    c: f64,
    n: u32,
    m: u32,
    price: f64,
) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.modified_duration(price)
}

/// Convexity at the rate `r`.
pub fn bond_convexity(fv: f64, c: f64, n: u32, m: u32, r: f64) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.convexity(r)
}

/// Duration-only estimate of the price change for a yield shift `dr`.
pub fn estimate_change_in_price1(
    fv: f64,
    c: f64,
    n: u32,
    m: u32,
    price: f64,
    dr: f64,
) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.estimate_change_in_price1(price, dr)
}

/// Duration-plus-convexity estimate of the price change for a yield shift `dr`.
pub fn estimate_change_in_price2(
    fv: f64,
    c: f64,
    n: u32,
    m: u32,
    price: f64,
    dr: f64,
) -> Result<f64, InstrumentError> {
    Bond::new(fv, c, n, m)?.estimate_change_in_price2(price, dr)
}
