//! Uniform-price bond auction clearing.
//!
//! Bids are ranked by price, then by size, both descending. The offering
//! is allocated down the ranking until it is exhausted; the bid that
//! exhausts it may be partially filled and every later bid receives
//! nothing. The clearing price is the price of the last bid that received
//! an allocation, and every winning bidder pays it.

use super::bond::Bond;
use super::error::InstrumentError;

/// A bid for a face amount of bonds at a price per 100 of face value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bid {
    /// Bidder's identifier.
    pub id: u32,
    /// Face amount requested.
    pub amount: f64,
    /// Price offered per 100 face.
    pub price: f64,
}

/// A ranked bid with the face amount it was awarded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// The original bid.
    pub bid: Bid,
    /// Face amount awarded; zero for losing bids.
    pub allocated: f64,
}

/// Outcome of clearing an auction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionResult {
    /// Every bid in ranking order with its allocation.
    pub allocations: Vec<Allocation>,
    /// Price paid by all winning bidders.
    pub clearing_price: f64,
    /// Yield to maturity of a 100-face bond at the clearing price.
    pub clearing_yield: f64,
    /// Number of bids that received a non-zero allocation.
    pub winning_bids: usize,
    /// Face amount left unsold when demand falls short of the offering.
    pub unallocated: f64,
}

/// Terms of the bonds being auctioned.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondAuction {
    /// Total face value on offer.
    pub offering: f64,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Years to maturity.
    pub years: u32,
    /// Coupon payments per year.
    pub payments_per_year: u32,
}

impl BondAuction {
    /// Allocate the offering across `bids` and derive the clearing yield.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidParameter` if the offering is non-positive,
    ///   there are no bids, or a bid has a non-positive amount or price
    /// - Any bond or yield error from pricing the clearing bond
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{Bid, BondAuction};
    ///
    /// let auction = BondAuction { offering: 500.0, coupon_rate: 0.03, years: 5, payments_per_year: 2 };
    /// let bids = [
    ///     Bid { id: 1, amount: 300.0, price: 99.5 },
    ///     Bid { id: 2, amount: 400.0, price: 99.0 },
    ///     Bid { id: 3, amount: 100.0, price: 98.0 },
    /// ];
    /// let result = auction.clear(&bids).unwrap();
    /// assert_eq!(result.clearing_price, 99.0);
    /// assert_eq!(result.winning_bids, 2);
    /// assert_eq!(result.allocations[1].allocated, 200.0);
    /// ```
    pub fn clear(&self, bids: &[Bid]) -> Result<AuctionResult, InstrumentError> {
        if !(self.offering.is_finite() && self.offering > 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("offering {} must be positive", self.offering),
            });
        }
        if bids.is_empty() {
            return Err(InstrumentError::InvalidParameter {
                message: "auction has no bids".to_string(),
            });
        }
        if let Some(bad) = bids
            .iter()
            .find(|b| !(b.amount > 0.0 && b.amount.is_finite() && b.price > 0.0 && b.price.is_finite()))
        {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "bid {} has amount {} and price {}",
                    bad.id, bad.amount, bad.price
                ),
            });
        }
        let bond = Bond::new(100.0, self.coupon_rate, self.years, self.payments_per_year)?;

        let mut ranked = bids.to_vec();
        ranked.sort_by(|a, b| {
            b.price
                .total_cmp(&a.price)
                .then_with(|| b.amount.total_cmp(&a.amount))
        });

        let mut remaining = self.offering;
        let mut clearing_price = ranked[0].price;
        let mut winning_bids = 0;
        let allocations: Vec<Allocation> = ranked
            .into_iter()
            .map(|bid| {
                let allocated = bid.amount.min(remaining);
                if allocated > 0.0 {
                    remaining -= allocated;
                    clearing_price = bid.price;
                    winning_bids += 1;
                }
                Allocation { bid, allocated }
            })
            .collect();

        let clearing_yield = bond.yield_to_maturity(clearing_price)?;
        tracing::info!(
            winning_bids,
            clearing_price,
            clearing_yield,
            unallocated = remaining,
            "auction cleared"
        );

        Ok(AuctionResult {
            allocations,
            clearing_price,
            clearing_yield,
            winning_bids,
            unallocated: remaining,
        })
    }
}
