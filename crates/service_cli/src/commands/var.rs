//! Value at Risk command
//!
//! With `--returns` the command reports historical VaR and a model VaR
//! fitted to the same series; otherwise `--mu` and `--sigma` drive the
//! model VaR alone.

use clap::Args;
use pricer_core::math::stats::{mean, sample_stdev};
use pricer_risk::var::{historical_var_pct, model_var_pct};
use serde::Serialize;
use tracing::info;

use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::{CliError, Result};

/// Arguments for `quant var`
#[derive(Debug, Clone, Args)]
pub struct VarArgs {
    /// Confidence level, e.g. 0.99
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Horizon in periods of the return series
    #[arg(long, default_value_t = 1.0)]
    pub horizon: f64,

    /// Comma-separated periodic returns
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub returns: Vec<f64>,

    /// Mean periodic return
    #[arg(long, allow_hyphen_values = true, conflicts_with = "returns")]
    pub mu: Option<f64>,

    /// Standard deviation of periodic returns
    #[arg(long, conflicts_with = "returns")]
    pub sigma: Option<f64>,

    /// Position value for the dollar figures
    #[arg(long)]
    pub position: Option<f64>,
}

/// VaR as a return, with dollar figures when a position is given
#[derive(Debug, Clone, Serialize)]
pub struct VarReport {
    pub confidence: f64,
    pub horizon: f64,
    pub mu: f64,
    pub sigma: f64,
    pub model_var_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_var_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl Report for VarReport {
    fn title(&self) -> String {
        format!(
            "Value at Risk ({:.2}% over {} periods)",
            self.confidence * 100.0,
            self.horizon
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            row("Mean return", self.mu, 6),
            row("Return stdev", self.sigma, 6),
            separator(),
            row("Model VaR %", self.model_var_pct * 100.0, 4),
        ];
        if let Some(h) = self.historical_var_pct {
            rows.push(row("Historical VaR %", h * 100.0, 4));
        }
        if let Some(position) = self.position {
            rows.push(separator());
            rows.push(row("Model VaR $", self.model_var_pct * position, 2));
            if let Some(h) = self.historical_var_pct {
                rows.push(row("Historical VaR $", h * position, 2));
            }
        }
        rows
    }
}

/// Compute the `quant var` report
pub fn var_report(args: &VarArgs) -> Result<VarReport> {
    let (mu, sigma, historical) = if args.returns.is_empty() {
        match (args.mu, args.sigma) {
            (Some(mu), Some(sigma)) => (mu, sigma, None),
            _ => {
                return Err(CliError::InvalidArgument(
                    "either --returns or both --mu and --sigma are required".to_string(),
                ))
            }
        }
    } else {
        let clean: Vec<f64> = args.returns.iter().copied().filter(|r| r.is_finite()).collect();
        let historical = historical_var_pct(&args.returns, args.confidence, args.horizon)?;
        (
            mean(&clean)?,
            sample_stdev(&clean)?,
            Some(historical),
        )
    };

    Ok(VarReport {
        confidence: args.confidence,
        horizon: args.horizon,
        mu,
        sigma,
        model_var_pct: model_var_pct(mu, sigma, args.confidence, args.horizon)?,
        historical_var_pct: historical,
        position: args.position,
    })
}

/// Run the Value at Risk command
pub fn run(args: &VarArgs, format: OutputFormat) -> Result<()> {
    info!(
        confidence = args.confidence,
        horizon = args.horizon,
        observations = args.returns.len(),
        "Computing value at risk"
    );
    emit(&var_report(args)?, format)
}
