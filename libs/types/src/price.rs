//! Mid/spread price records
//!
//! The pricing feed publishes one current `Price` per product: the mid and
//! the bid/offer spread around it. `PricingSide` tags which side of a quote
//! an order sits on and is shared by the depth, execution, and streaming
//! records.

use crate::product::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a quoted price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PricingSide {
    /// Buying interest
    Bid,
    /// Selling interest
    Offer,
}

impl PricingSide {
    pub fn opposite(&self) -> Self {
        match self {
            PricingSide::Bid => PricingSide::Offer,
            PricingSide::Offer => PricingSide::Bid,
        }
    }
}

impl fmt::Display for PricingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingSide::Bid => write!(f, "BID"),
            PricingSide::Offer => write!(f, "OFFER"),
        }
    }
}

impl FromStr for PricingSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BID" => Ok(PricingSide::Bid),
            "OFFER" => Ok(PricingSide::Offer),
            other => Err(format!("unknown pricing side: {other}")),
        }
    }
}

/// A price consisting of mid and bid/offer spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub product: Bond,
    pub mid: Decimal,
    pub bid_offer_spread: Decimal,
}

impl Price {
    pub fn new(product: Bond, mid: Decimal, bid_offer_spread: Decimal) -> Self {
        Self {
            product,
            mid,
            bid_offer_spread,
        }
    }

    /// Mid less half the spread.
    pub fn bid(&self) -> Decimal {
        self.mid - self.bid_offer_spread / Decimal::from(2)
    }

    /// Mid plus half the spread.
    pub fn offer(&self) -> Decimal {
        self.mid + self.bid_offer_spread / Decimal::from(2)
    }
}
