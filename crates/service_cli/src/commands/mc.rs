//! Monte Carlo option valuation command

use clap::Args;
use pricer_models::instruments::OptionRight;
use pricer_pricing::mc::{GbmParams, MonteCarloPricer, PathPayoff, PathStyle, PricingResult};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, CliOverrides};
use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::Result;

/// Arguments for `quant mc`
#[derive(Debug, Clone, Args)]
pub struct McArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Years to maturity
    #[arg(long)]
    pub maturity: f64,

    /// Annual drift, also used for discounting
    #[arg(long, allow_hyphen_values = true)]
    pub drift: f64,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    /// Simulation steps per year
    #[arg(long, default_value_t = 252)]
    pub periods_per_year: u32,

    /// Payoff style: european, asian or lookback
    #[arg(long, default_value = "european")]
    pub style: PathStyle,

    /// Option right: call or put
    #[arg(long, default_value = "call")]
    pub right: OptionRight,

    /// Number of simulated paths
    #[arg(long)]
    pub trials: Option<usize>,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run trials on the calling thread only
    #[arg(long)]
    pub sequential: bool,
}

impl McArgs {
    /// Engine settings given on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            trials: self.trials,
            seed: self.seed,
            sequential: self.sequential,
            ..CliOverrides::default()
        }
    }
}

/// Simulated value with its sampling error
#[derive(Debug, Clone, Serialize)]
pub struct McReport {
    pub payoff: PathPayoff,
    pub params: GbmParams,
    pub periods: usize,
    #[serde(flatten)]
    pub result: PricingResult,
}

impl Report for McReport {
    fn title(&self) -> String {
        format!(
            "Monte Carlo {} (s={:.2}, t={:.2}, mu={:.4}, sigma={:.4})",
            self.payoff,
            self.params.spot,
            self.params.maturity,
            self.params.drift,
            self.params.volatility
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Trials".to_string(), self.result.n_trials.to_string()),
            ("Periods per path".to_string(), self.periods.to_string()),
            ("Seed".to_string(), self.result.seed.to_string()),
            separator(),
            row("Value", self.result.price, 4),
            row("Standard error", self.result.std_error, 4),
            row("95% half-width", self.result.confidence_95(), 4),
        ]
    }
}

/// Compute the `quant mc` report with the resolved configuration
pub fn mc_report(args: &McArgs, config: &CliConfig) -> Result<McReport> {
    let params = GbmParams {
        spot: args.spot,
        maturity: args.maturity,
        drift: args.drift,
        volatility: args.vol,
        periods_per_year: args.periods_per_year,
    };
    let payoff = PathPayoff::new(args.style, args.right, args.strike);
    let pricer = MonteCarloPricer::new(config.monte_carlo()?, params)?;
    let result = pricer.price(payoff)?;
    Ok(McReport {
        payoff,
        params,
        periods: pricer.simulator().n_periods(),
        result,
    })
}

/// Run the Monte Carlo command
pub fn run(args: &McArgs, config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!(?args, trials = config.mc.trials, "Running Monte Carlo valuation");
    emit(&mc_report(args, config)?, format)
}
