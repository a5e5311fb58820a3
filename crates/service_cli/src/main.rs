//! quant - command-line front end for the pricing and risk library
//!
//! # Commands
//!
//! - `quant bond` - Price a bullet bond at a yield
//! - `quant ytm` - Solve a bond's yield to maturity and risk measures
//! - `quant bsm` - Black-Scholes-Merton values and deltas
//! - `quant implied-vol` - Volatility implied by a quoted option value
//! - `quant binomial` - Binomial tree valuation, European or American
//! - `quant mc` - Monte Carlo valuation of European, Asian and Lookback options
//! - `quant var` - Model and historical Value at Risk
//! - `quant auction-ytm` - Clear a uniform-price bond auction
//! - `quant check` - Reproduce reference values
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate parses arguments, resolves
//! configuration and renders reports; all numerics live in the pricer crates.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::{auction, binomial, bond, check, mc, option, var};
use config::{build_config, CliOverrides};
use output::OutputFormat;

/// Quant finance pricing and risk CLI
#[derive(Parser)]
#[command(name = "quant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a bullet bond at a given yield
    Bond(bond::BondPriceArgs),

    /// Solve for a bond's yield to maturity, duration and convexity
    Ytm(bond::YieldArgs),

    /// Value European options with Black-Scholes-Merton
    Bsm(option::BsmArgs),

    /// Recover the volatility implied by an option value
    ImpliedVol(option::ImpliedVolArgs),

    /// Value an option on a binomial tree
    Binomial(binomial::BinomialArgs),

    /// Value an option by Monte Carlo simulation
    Mc(mc::McArgs),

    /// Compute model and historical Value at Risk
    Var(var::VarArgs),

    /// Clear a bond auction and report the clearing yield
    AuctionYtm(auction::AuctionArgs),

    /// Check the engines against reference values
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut overrides = match &cli.command {
        Commands::Mc(args) => args.overrides(),
        _ => CliOverrides::default(),
    };
    overrides.verbose = cli.verbose;
    let config = build_config(cli.config.as_deref(), &overrides)?;

    init_tracing(config.log_level.as_filter_str());
    info!(version = env!("CARGO_PKG_VERSION"), "quant starting");
    debug!(?config, "Configuration loaded");

    let format = cli.format;
    match &cli.command {
        Commands::Bond(args) => bond::run_price(args, format),
        Commands::Ytm(args) => bond::run_yield(args, &config, format),
        Commands::Bsm(args) => option::run_bsm(args, format),
        Commands::ImpliedVol(args) => option::run_implied_vol(args, &config, format),
        Commands::Binomial(args) => binomial::run(args, format),
        Commands::Mc(args) => mc::run(args, &config, format),
        Commands::Var(args) => var::run(args, format),
        Commands::AuctionYtm(args) => auction::run(args, format),
        Commands::Check => check::run(format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mc_with_globals() {
        let cli = Cli::try_parse_from([
            "quant", "mc", "--spot", "100", "--strike", "95", "--maturity", "1", "--drift",
            "0.05", "--vol", "0.3", "--style", "lookback", "--right", "put", "--seed", "9",
            "--format", "json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Mc(args) => {
                assert_eq!(args.seed, Some(9));
                assert_eq!(args.periods_per_year, 252);
                assert_eq!(args.right, pricer_models::instruments::OptionRight::Put);
            }
            _ => panic!("expected mc"),
        }
    }

    #[test]
    fn test_parse_auction_bids() {
        let cli = Cli::try_parse_from([
            "quant", "auction-ytm", "--offering", "500", "--coupon", "0.03", "--years", "5",
            "--bid", "1:300:99.5", "--bid", "2:400:99",
        ])
        .unwrap();
        match cli.command {
            Commands::AuctionYtm(args) => assert_eq!(args.bids.len(), 2),
            _ => panic!("expected auction-ytm"),
        }
    }

    #[test]
    fn test_parse_var_returns_list() {
        let cli = Cli::try_parse_from([
            "quant", "var", "--returns", "-0.01,0.02,-0.03", "--confidence", "0.99",
        ])
        .unwrap();
        match cli.command {
            Commands::Var(args) => assert_eq!(args.returns, vec![-0.01, 0.02, -0.03]),
            _ => panic!("expected var"),
        }
    }

    #[test]
    fn test_var_rejects_mixed_inputs() {
        let result = Cli::try_parse_from([
            "quant", "var", "--returns", "0.01,0.02", "--mu", "0.001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_right_rejected() {
        let result = Cli::try_parse_from([
            "quant", "implied-vol", "--spot", "100", "--strike", "100", "--expiry", "1",
            "--rate", "0.05", "--value", "10", "--right", "straddle",
        ]);
        assert!(result.is_err());
    }
}
