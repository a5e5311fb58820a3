//! Bond auction clearing command

use clap::Args;
use pricer_models::instruments::{Bid, BondAuction};
use serde::Serialize;
use tracing::info;

use crate::output::{emit, row, separator, OutputFormat, Report};
use crate::Result;

/// Parse a bid written as `ID:AMOUNT:PRICE`.
pub fn parse_bid(s: &str) -> std::result::Result<Bid, String> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    let [id, amount, price] = parts.as_slice() else {
        return Err(format!("bid '{}' must look like ID:AMOUNT:PRICE", s));
    };
    Ok(Bid {
        id: id.parse().map_err(|_| format!("bad bid id '{}'", id))?,
        amount: amount
            .parse()
            .map_err(|_| format!("bad bid amount '{}'", amount))?,
        price: price.parse().map_err(|_| format!("bad bid price '{}'", price))?,
    })
}

/// Arguments for `quant auction-ytm`
#[derive(Debug, Clone, Args)]
pub struct AuctionArgs {
    /// Total face value on offer
    #[arg(long)]
    pub offering: f64,

    /// Annual coupon rate of the new issue
    #[arg(long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(long)]
    pub years: u32,

    /// Coupon payments per year
    #[arg(long, default_value_t = 2)]
    pub frequency: u32,

    /// A bid as ID:AMOUNT:PRICE, price per 100 face; repeat for each bid
    #[arg(long = "bid", value_parser = parse_bid, required = true)]
    pub bids: Vec<Bid>,
}

/// Clearing outcome with per-bid allocations
#[derive(Debug, Clone, Serialize)]
pub struct AuctionReport {
    pub auction: BondAuction,
    #[serde(flatten)]
    pub result: pricer_models::instruments::AuctionResult,
}

impl Report for AuctionReport {
    fn title(&self) -> String {
        format!(
            "Auction of {:.0} face, {:.3}% coupon, {} years",
            self.auction.offering,
            self.auction.coupon_rate * 100.0,
            self.auction.years
        )
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            row("Clearing price", self.result.clearing_price, 4),
            row("Clearing yield", self.result.clearing_yield, 6),
            ("Winning bids".to_string(), self.result.winning_bids.to_string()),
            row("Unallocated", self.result.unallocated, 2),
            separator(),
        ];
        rows.extend(self.result.allocations.iter().map(|a| {
            (
                format!("Bid {} @ {:.3}", a.bid.id, a.bid.price),
                format!("{:.2} of {:.2}", a.allocated, a.bid.amount),
            )
        }));
        rows
    }
}

/// Compute the `quant auction-ytm` report
pub fn auction_report(args: &AuctionArgs) -> Result<AuctionReport> {
    let auction = BondAuction {
        offering: args.offering,
        coupon_rate: args.coupon,
        years: args.years,
        payments_per_year: args.frequency,
    };
    Ok(AuctionReport {
        result: auction.clear(&args.bids)?,
        auction,
    })
}

/// Run the auction clearing command
pub fn run(args: &AuctionArgs, format: OutputFormat) -> Result<()> {
    info!(bids = args.bids.len(), offering = args.offering, "Clearing bond auction");
    emit(&auction_report(args)?, format)
}
