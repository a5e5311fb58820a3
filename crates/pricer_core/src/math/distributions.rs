//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `norm_inv`: Inverse CDF (quantile function)
//!
//! The CDF uses Hart's double-precision rational approximation (as published
//! by G. West, 2005), accurate to about 1e-14 across the real line, so that
//! closed-form option values agree with reference tables to the fourth
//! decimal place and beyond.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Beyond this |x| the tail mass is below the smallest positive double.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued-fraction forms.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

const NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const DEN: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96_f64) - 0.975_002_104_851_780).abs() < 1e-12);
/// assert!((norm_cdf(-1.0_f64) + norm_cdf(1.0_f64) - 1.0).abs() < 1e-15);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let xf = x.to_f64().unwrap_or(f64::NAN);
    T::from(cdf_f64(xf)).unwrap_or_else(T::nan)
}

fn cdf_f64(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let z = x.abs();
    let tail = if z > TAIL_CUTOFF {
        0.0
    } else {
        let gauss = (-0.5 * z * z).exp();
        if z < RATIONAL_LIMIT {
            let num = NUM.iter().fold(0.0, |acc, &c| acc * z + c);
            let den = DEN.iter().fold(0.0, |acc, &c| acc * z + c);
            gauss * num / den
        } else {
            let mut frac = z + 0.65;
            for k in [4.0, 3.0, 2.0, 1.0] {
                frac = z + k / frac;
            }
            gauss / frac / SQRT_2PI
        }
    };
    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::nan);
    let half = T::from(0.5).unwrap_or_else(T::nan);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Inverse of the standard normal CDF.
///
/// Acklam's rational approximation (relative error about 1e-9) followed by
/// one Halley refinement step against [`norm_cdf`], which brings the result
/// to close to full double precision.
///
/// Returns `-inf` at `p = 0`, `+inf` at `p = 1` and NaN outside `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::{norm_cdf, norm_inv};
///
/// assert!((norm_inv(0.975) - 1.959_963_984_540_054).abs() < 1e-12);
/// assert!((norm_cdf(norm_inv(0.01)) - 0.01).abs() < 1e-14);
/// ```
pub fn norm_inv(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let horner = |coeffs: &[f64], x: f64| coeffs.iter().fold(0.0, |acc, &c| acc * x + c);

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        horner(&C, q) / (horner(&D, q) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        horner(&A, r) * q / (horner(&B, r) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -horner(&C, q) / (horner(&D, q) * q + 1.0)
    };

    // Halley step: e = Φ(x) - p, u = e·sqrt(2π)·exp(x²/2)
    let e = cdf_f64(x) - p;
    let u = e * SQRT_2PI * (0.5 * x * x).exp();
    x - u / (1.0 + 0.5 * x * u)
}
