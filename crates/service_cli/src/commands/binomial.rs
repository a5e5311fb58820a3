//! Binomial tree command

use clap::Args;
use pricer_models::analytical::{BlackScholesMerton, BsmParams};
use pricer_models::instruments::{ExerciseStyle, OptionRight};
use pricer_models::lattice::{BinomialOption, TreeParams};
use serde::Serialize;
use tracing::info;

use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::Result;

/// Arguments for `quant binomial`
#[derive(Debug, Clone, Args)]
pub struct BinomialArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub years: f64,

    /// Number of tree periods
    #[arg(long, default_value_t = 100)]
    pub periods: usize,

    /// Option right: call or put
    #[arg(long, default_value = "call")]
    pub right: OptionRight,

    /// Exercise style: european or american
    #[arg(long, default_value = "european")]
    pub exercise: ExerciseStyle,

    /// Print the asset and option trees after the summary (table output only)
    #[arg(long)]
    pub show_tree: bool,
}

/// Lattice value with the closed-form European value alongside
#[derive(Debug, Clone, Serialize)]
pub struct BinomialReport {
    pub right: OptionRight,
    pub exercise: ExerciseStyle,
    pub periods: usize,
    pub up: f64,
    pub down: f64,
    pub probability: f64,
    pub value: f64,
    pub european_closed_form: f64,
    #[serde(skip)]
    pub tree: Option<String>,
}

impl Report for BinomialReport {
    fn title(&self) -> String {
        format!(
            "Binomial {} {} ({} periods)",
            self.exercise, self.right, self.periods
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            row("Up factor", self.up, 6),
            row("Down factor", self.down, 6),
            row("Risk-neutral probability", self.probability, 6),
            separator(),
            row("Tree value", self.value, 4),
            row("Closed-form European value", self.european_closed_form, 4),
        ]
    }
}

/// Compute the `quant binomial` report
pub fn binomial_report(args: &BinomialArgs) -> Result<BinomialReport> {
    let params = TreeParams {
        spot: args.spot,
        volatility: args.vol,
        rate: args.rate,
        dividend: args.dividend,
        years: args.years,
        periods: args.periods,
    };
    let option = BinomialOption::new(params, args.strike, args.right, args.exercise)?;
    let closed_form = BlackScholesMerton::new(
        BsmParams {
            spot: args.spot,
            strike: args.strike,
            expiry: args.years,
            volatility: args.vol,
            rate: args.rate,
            dividend: args.dividend,
        },
        args.right,
    )?;

    let tree = option.tree();
    Ok(BinomialReport {
        right: args.right,
        exercise: args.exercise,
        periods: tree.periods(),
        up: tree.up(),
        down: tree.down(),
        probability: tree.probability(),
        value: option.value(),
        european_closed_form: closed_form.value(),
        tree: args.show_tree.then(|| option.to_string()),
    })
}

/// Run the binomial tree command
pub fn run(args: &BinomialArgs, format: OutputFormat) -> Result<()> {
    info!(?args, "Building binomial tree");
    let report = binomial_report(args)?;
    emit(&report, format)?;
    if let (OutputFormat::Table, Some(tree)) = (format, &report.tree) {
        println!("\n{}", tree);
    }
    Ok(())
}
