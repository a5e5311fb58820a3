//! Bond commands
//!
//! `quant bond` prices a bullet bond at a yield; `quant ytm` solves for the
//! yield implied by a price and reports durations and convexity.

use clap::Args;
use pricer_models::instruments::{Bond, BondRiskMetrics};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::Result;

/// Bond terms shared by the bond commands
#[derive(Debug, Clone, Args)]
pub struct BondTerms {
    /// Face (par) value
    #[arg(long, default_value_t = 1000.0)]
    pub face: f64,

    /// Annual coupon rate, e.g. 0.05
    #[arg(long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(long)]
    pub years: u32,

    /// Coupon payments per year
    #[arg(long, default_value_t = 2)]
    pub frequency: u32,
}

impl BondTerms {
    fn bond(&self) -> Result<Bond> {
        Ok(Bond::new(self.face, self.coupon, self.years, self.frequency)?)
    }
}

/// Arguments for `quant bond`
#[derive(Debug, Clone, Args)]
pub struct BondPriceArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Annual yield used for discounting
    #[arg(long)]
    pub rate: f64,
}

/// Arguments for `quant ytm`
#[derive(Debug, Clone, Args)]
pub struct YieldArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Observed bond price
    #[arg(long)]
    pub price: f64,

    /// Yield shift for the price change estimates
    #[arg(long, default_value_t = 0.01, allow_hyphen_values = true)]
    pub shift: f64,
}

/// Price, duration and convexity at a given yield
#[derive(Debug, Clone, Serialize)]
pub struct BondPriceReport {
    pub rate: f64,
    pub price: f64,
    pub duration: f64,
    pub convexity: f64,
}

impl Report for BondPriceReport {
    fn title(&self) -> String {
        format!("Bond priced at r = {:.4}", self.rate)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            row("Price", self.price, 4),
            row("Duration (years)", self.duration, 4),
            row("Convexity", self.convexity, 4),
        ]
    }
}

/// Yield and risk measures implied by a price
#[derive(Debug, Clone, Serialize)]
pub struct YieldReport {
    #[serde(flatten)]
    pub metrics: BondRiskMetrics,
    pub shift: f64,
    pub change_first_order: f64,
    pub change_second_order: f64,
}

impl Report for YieldReport {
    fn title(&self) -> String {
        format!("Bond yield at P = {:.4}", self.metrics.price)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            row("Yield to maturity", self.metrics.yield_to_maturity, 6),
            row("Macaulay duration", self.metrics.macaulay_duration, 4),
            row("Modified duration", self.metrics.modified_duration, 4),
            row("Convexity", self.metrics.convexity, 4),
            separator(),
            row("Yield shift", self.shift, 4),
            row("Price change (duration)", self.change_first_order, 4),
            row("Price change (+ convexity)", self.change_second_order, 4),
        ]
    }
}

/// Compute the `quant bond` report
pub fn price_report(args: &BondPriceArgs) -> Result<BondPriceReport> {
    let bond = args.terms.bond()?;
    Ok(BondPriceReport {
        rate: args.rate,
        price: bond.price(args.rate)?,
        duration: bond.duration(args.rate)?,
        convexity: bond.convexity(args.rate)?,
    })
}

/// Compute the `quant ytm` report
pub fn yield_report(args: &YieldArgs, config: &CliConfig) -> Result<YieldReport> {
    let bond = args.terms.bond()?;
    let metrics = bond.risk_metrics_with(args.price, &config.bond_solver())?;
    let dr = args.shift;
    Ok(YieldReport {
        metrics,
        shift: dr,
        change_first_order: -metrics.modified_duration * metrics.price * dr,
        change_second_order: metrics.price
            * (-metrics.modified_duration * dr + metrics.convexity / 2.0 * dr * dr),
    })
}

/// Run the bond price command
pub fn run_price(args: &BondPriceArgs, format: OutputFormat) -> Result<()> {
    info!(?args, "Pricing bond");
    emit(&price_report(args)?, format)
}

/// Run the yield-to-maturity command
pub fn run_yield(args: &YieldArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!(?args, "Solving bond yield");
    emit(&yield_report(args, config)?, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;

    fn terms() -> BondTerms {
        BondTerms {
            face: 1000.0,
            coupon: 0.05,
            years: 5,
            frequency: 2,
        }
    }

    #[test]
    fn test_price_report() {
        let report = price_report(&BondPriceArgs {
            terms: terms(),
            rate: 0.04,
        })
        .unwrap();
        assert_relative_eq!(report.price, 1044.9129, epsilon = 1e-4);
        assert!(report.duration > 4.0 && report.duration < 5.0);
    }

    #[test]
    fn test_yield_report_round_trip() {
        let args = YieldArgs {
            terms: terms(),
            price: 1044.9129,
            shift: 0.01,
        };
        let report = yield_report(&args, &CliConfig::default()).unwrap();
        assert_relative_eq!(report.metrics.yield_to_maturity, 0.04, epsilon = 1e-4);
        assert!(report.change_first_order < 0.0);
        // Convexity makes the second-order estimate less negative
        assert!(report.change_second_order > report.change_first_order);
    }

    #[test]
    fn test_invalid_terms() {
        let args = BondPriceArgs {
            terms: BondTerms {
                years: 0,
                ..terms()
            },
            rate: 0.04,
        };
        assert!(matches!(price_report(&args), Err(CliError::Instrument(_))));
    }
}
