//! Booked trades
//!
//! A trade carries the traded product, price, and signed interest expressed
//! as a side plus quantity, booked into one of three accounting books.

use crate::ids::TradeId;
use crate::product::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(format!("unknown trade side: {other}")),
        }
    }
}

/// Accounting book a trade settles into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Book {
    #[serde(rename = "TRSY1")]
    Trsy1,
    #[serde(rename = "TRSY2")]
    Trsy2,
    #[serde(rename = "TRSY3")]
    Trsy3,
}

impl Book {
    pub const ALL: [Book; 3] = [Book::Trsy1, Book::Trsy2, Book::Trsy3];
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Book::Trsy1 => write!(f, "TRSY1"),
            Book::Trsy2 => write!(f, "TRSY2"),
            Book::Trsy3 => write!(f, "TRSY3"),
        }
    }
}

impl FromStr for Book {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRSY1" => Ok(Book::Trsy1),
            "TRSY2" => Ok(Book::Trsy2),
            "TRSY3" => Ok(Book::Trsy3),
            other => Err(format!("unknown book: {other}")),
        }
    }
}

/// Trade with a price, side, and quantity on a particular book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Bond,
    pub trade_id: TradeId,
    pub price: Decimal,
    pub book: Book,
    pub quantity: i64,
    pub side: TradeSide,
}

impl Trade {
    pub fn new(
        product: Bond,
        trade_id: TradeId,
        price: Decimal,
        book: Book,
        quantity: i64,
        side: TradeSide,
    ) -> Self {
        Self {
            product,
            trade_id,
            price,
            book,
            quantity,
            side,
        }
    }

    /// Quantity signed by direction: positive for BUY, negative for SELL.
    pub fn signed_quantity(&self) -> i64 {
        match self.side {
            TradeSide::Buy => self.quantity,
            TradeSide::Sell => -self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::bond_by_maturity;
    use rust_decimal_macros::dec;

    #[test]
    fn test_book_parsing() {
        assert_eq!("TRSY1".parse::<Book>().unwrap(), Book::Trsy1);
        assert_eq!("TRSY3".parse::<Book>().unwrap(), Book::Trsy3);
        assert!("TRSY4".parse::<Book>().is_err());
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert!("BID".parse::<TradeSide>().is_err());
    }

    #[test]
    fn test_signed_quantity() {
        let bond = bond_by_maturity(2).unwrap();
        let buy = Trade::new(
            bond.clone(),
            TradeId::new("T1"),
            dec!(100),
            Book::Trsy1,
            1_000_000,
            TradeSide::Buy,
        );
        let sell = Trade::new(
            bond,
            TradeId::new("T2"),
            dec!(100),
            Book::Trsy2,
            500_000,
            TradeSide::Sell,
        );
        assert_eq!(buy.signed_quantity(), 1_000_000);
        assert_eq!(sell.signed_quantity(), -500_000);
    }

    #[test]
    fn test_book_serde_names() {
        let json = serde_json::to_string(&Book::Trsy2).unwrap();
        assert_eq!(json, "\"TRSY2\"");
    }
}
