//! Black-Scholes-Merton commands
//!
//! `quant bsm` values a European call and put and can sweep the spot
//! price; `quant implied-vol` recovers the volatility behind a quoted value.

use clap::Args;
use pricer_models::analytical::{option_value_table, BlackScholesMerton, BsmParams, OptionValueRow};
use pricer_models::instruments::OptionRight;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::Result;

/// Market inputs shared by the closed-form commands
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,
}

impl MarketArgs {
    fn params(&self, volatility: f64) -> BsmParams {
        BsmParams {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            volatility,
            rate: self.rate,
            dividend: self.dividend,
        }
    }
}

/// Arguments for `quant bsm`
#[derive(Debug, Clone, Args)]
pub struct BsmArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    /// Comma-separated spot prices to tabulate values and deltas at
    #[arg(long, value_delimiter = ',')]
    pub sweep: Vec<f64>,
}

/// Arguments for `quant implied-vol`
#[derive(Debug, Clone, Args)]
pub struct ImpliedVolArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Option right: call or put
    #[arg(long, default_value = "call")]
    pub right: OptionRight,

    /// Quoted option value
    #[arg(long)]
    pub value: f64,
}

/// Closed-form values and sensitivities
#[derive(Debug, Clone, Serialize)]
pub struct BsmReport {
    pub params: BsmParams,
    pub d1: f64,
    pub d2: f64,
    pub call_value: f64,
    pub put_value: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sweep: Vec<OptionValueRow>,
}

impl Report for BsmReport {
    fn title(&self) -> String {
        let p = &self.params;
        format!(
            "Black-Scholes-Merton (s={:.2}, x={:.2}, t={:.4}, sigma={:.4}, rf={:.4}, div={:.4})",
            p.spot, p.strike, p.expiry, p.volatility, p.rate, p.dividend
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            row("d1", self.d1, 6),
            row("d2", self.d2, 6),
            separator(),
            row("Call value", self.call_value, 4),
            row("Put value", self.put_value, 4),
            row("Call delta", self.call_delta, 4),
            row("Put delta", self.put_delta, 4),
        ];
        for r in &self.sweep {
            rows.push(separator());
            rows.push(row("Spot", r.spot, 2));
            rows.push((
                "  call value / delta".to_string(),
                format!("{:.4} / {:.4}", r.call_value, r.call_delta),
            ));
            rows.push((
                "  put value / delta".to_string(),
                format!("{:.4} / {:.4}", r.put_value, r.put_delta),
            ));
        }
        rows
    }
}

/// Volatility implied by a quoted value
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    pub right: OptionRight,
    pub target: f64,
    pub implied_volatility: f64,
    pub repriced: f64,
}

impl Report for ImpliedVolReport {
    fn title(&self) -> String {
        format!("Implied volatility of a European {} at {:.4}", self.right, self.target)
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            row("Implied volatility", self.implied_volatility, 6),
            row("Value at implied volatility", self.repriced, 6),
        ]
    }
}

/// Compute the `quant bsm` report
pub fn bsm_report(args: &BsmArgs) -> Result<BsmReport> {
    let params = args.market.params(args.vol);
    let call = BlackScholesMerton::call(params)?;
    let put = BlackScholesMerton::put(params)?;
    Ok(BsmReport {
        params,
        d1: call.d1(),
        d2: call.d2(),
        call_value: call.value(),
        put_value: put.value(),
        call_delta: call.delta(),
        put_delta: put.delta(),
        sweep: option_value_table(&params, &args.sweep)?,
    })
}

/// Compute the `quant implied-vol` report
pub fn implied_vol_report(args: &ImpliedVolArgs, config: &CliConfig) -> Result<ImpliedVolReport> {
    // The starting volatility only seeds construction; the search ignores it
    let option = BlackScholesMerton::new(args.market.params(0.2), args.right)?;
    let sigma = option.implied_volatility_with(args.value, &config.volatility_solver())?;
    Ok(ImpliedVolReport {
        right: args.right,
        target: args.value,
        implied_volatility: sigma,
        repriced: option.with_volatility(sigma)?.value(),
    })
}

/// Run the BSM valuation command
pub fn run_bsm(args: &BsmArgs, format: OutputFormat) -> Result<()> {
    info!(?args, "Valuing European options");
    emit(&bsm_report(args)?, format)
}

/// Run the implied volatility command
pub fn run_implied_vol(args: &ImpliedVolArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!(?args, "Solving implied volatility");
    emit(&implied_vol_report(args, config)?, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;

    fn market() -> MarketArgs {
        MarketArgs {
            spot: 100.0,
            strike: 100.0,
            expiry: 0.5,
            rate: 0.04,
            dividend: 0.02,
        }
    }

    #[test]
    fn test_bsm_report_reference_values() {
        let report = bsm_report(&BsmArgs {
            market: market(),
            vol: 0.25,
            sweep: vec![],
        })
        .unwrap();
        assert_relative_eq!(report.call_value, 7.442052502810462, epsilon = 1e-9);
        assert_relative_eq!(report.put_value, 6.456936458569174, epsilon = 1e-9);
        assert_relative_eq!(report.call_delta, 0.5520790587734332, epsilon = 1e-9);
        assert!(report.sweep.is_empty());
    }

    #[test]
    fn test_bsm_sweep_rows() {
        let report = bsm_report(&BsmArgs {
            market: market(),
            vol: 0.25,
            sweep: vec![90.0, 100.0, 110.0],
        })
        .unwrap();
        assert_eq!(report.sweep.len(), 3);
        assert_relative_eq!(report.sweep[1].call_value, report.call_value, epsilon = 1e-12);
        // 7 headline rows, then a separator and three rows per spot
        assert_eq!(report.rows().len(), 7 + 3 * 4);
        assert!(report.rows()[10].1.contains(" / "));
    }

    #[test]
    fn test_implied_vol_round_trip() {
        let args = ImpliedVolArgs {
            market: market(),
            right: OptionRight::Call,
            value: 7.442052502810462,
        };
        let report = implied_vol_report(&args, &CliConfig::default()).unwrap();
        assert_relative_eq!(report.implied_volatility, 0.25, epsilon = 1e-4);
        assert_relative_eq!(report.repriced, args.value, epsilon = 1e-4);
    }

    #[test]
    fn test_unreachable_value() {
        let args = ImpliedVolArgs {
            market: market(),
            right: OptionRight::Call,
            value: 150.0,
        };
        assert!(matches!(
            implied_vol_report(&args, &CliConfig::default()),
            Err(CliError::Analytical(_))
        ));
    }
}
