//! Check command implementation
//!
//! Recomputes a handful of reference values and reports whether each
//! engine reproduces them.

use pricer_models::analytical::{BlackScholesMerton, BsmParams};
use pricer_models::instruments::{bond_price, ExerciseStyle, OptionRight};
use pricer_models::lattice::{BinomialOption, TreeParams};
use pricer_pricing::mc::{GbmParams, MonteCarloConfig, MonteCarloPricer, PathPayoff};
use serde::Serialize;
use tracing::{info, warn};

use crate::output::{emit, OutputFormat, Report};
use crate::{CliError, Result};

/// Outcome of one reference check
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub expected: f64,
    pub actual: f64,
    pub tolerance: f64,
    pub passed: bool,
}

impl CheckOutcome {
    fn new(name: &'static str, expected: f64, actual: f64, tolerance: f64) -> Self {
        Self {
            name,
            expected,
            actual,
            tolerance,
            passed: (expected - actual).abs() <= tolerance,
        }
    }
}

/// All reference checks with the crate version
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub version: &'static str,
    pub checks: Vec<CheckOutcome>,
}

impl CheckReport {
    /// Whether every check passed
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

impl Report for CheckReport {
    fn title(&self) -> String {
        format!("quant {} self-check", self.version)
    }

    fn rows(&self) -> Vec<(String, String)> {
        self.checks
            .iter()
            .map(|c| {
                let status = if c.passed { "ok" } else { "FAILED" };
                (
                    c.name.to_string(),
                    format!("{:.4} vs {:.4} {}", c.actual, c.expected, status),
                )
            })
            .collect()
    }
}

/// Recompute the reference values
pub fn check_report() -> Result<CheckReport> {
    let bsm = BsmParams {
        spot: 100.0,
        strike: 100.0,
        expiry: 0.5,
        volatility: 0.25,
        rate: 0.04,
        dividend: 0.02,
    };
    let bsm_call = BlackScholesMerton::call(bsm)?.value();
    let bsm_put = BlackScholesMerton::put(bsm)?.value();

    let tree = |periods| TreeParams {
        spot: 100.0,
        volatility: 0.25,
        rate: 0.04,
        dividend: 0.02,
        years: 0.5,
        periods,
    };
    let tree_call =
        BinomialOption::new(tree(500), 100.0, OptionRight::Call, ExerciseStyle::European)?.value();
    let american_put =
        BinomialOption::new(tree(200), 100.0, OptionRight::Put, ExerciseStyle::American)?.value();
    let european_put =
        BinomialOption::new(tree(200), 100.0, OptionRight::Put, ExerciseStyle::European)?.value();
    let forward_gap = 100.0 * (-0.02_f64 * 0.5).exp() - 100.0 * (-0.04_f64 * 0.5).exp();
    let parity = bsm_call - bsm_put - forward_gap;

    // Drift equals the risk-free rate so the discounting matches the closed form
    let mc_config = MonteCarloConfig::builder()
        .n_trials(40_000)
        .seed(20_240_101)
        .build()?;
    let gbm = GbmParams {
        spot: 100.0,
        maturity: 1.0,
        drift: 0.05,
        volatility: 0.2,
        periods_per_year: 12,
    };
    let mc = MonteCarloPricer::new(mc_config, gbm)?.price(PathPayoff::EuropeanCall { strike: 100.0 })?;

    let checks = vec![
        CheckOutcome::new("Bond price", 1044.9129, bond_price(1000.0, 0.05, 5, 2, 0.04)?, 1e-4),
        CheckOutcome::new("BSM call", 7.4421, bsm_call, 5e-5),
        CheckOutcome::new("Put-call parity", 0.0, parity, 1e-10),
        CheckOutcome::new("Binomial call (500 periods)", bsm_call, tree_call, 0.01),
        CheckOutcome::new("American put premium", 0.0, (american_put - european_put).min(0.0), 0.0),
        CheckOutcome::new("Monte Carlo call", 10.450583572185565, mc.price, 4.0 * mc.std_error),
    ];

    Ok(CheckReport {
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}

/// Run the check command
pub fn run(format: OutputFormat) -> Result<()> {
    info!("Running reference checks");
    let report = check_report()?;
    emit(&report, format)?;

    if report.passed() {
        info!("All checks passed");
        return Ok(());
    }
    let failed: Vec<&str> = report
        .checks
        .iter()
        .filter(|c| !c.passed)
        .map(|c| c.name)
        .collect();
    warn!(?failed, "Reference checks failed");
    Err(CliError::CheckFailed(failed.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_pass() {
        let report = check_report().unwrap();
        assert_eq!(report.checks.len(), 6);
        for check in &report.checks {
            assert!(check.passed, "{:?}", check);
        }
        assert!(report.passed());
    }

    #[test]
    fn test_failed_check_is_reported() {
        let outcome = CheckOutcome::new("x", 1.0, 1.1, 0.05);
        assert!(!outcome.passed);
        let report = CheckReport {
            version: "0.0.0",
            checks: vec![outcome],
        };
        assert!(!report.passed());
        assert!(report.rows()[0].1.ends_with("FAILED"));
    }
}
