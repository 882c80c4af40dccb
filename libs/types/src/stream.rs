//! Two-sided price streams published to venues

use crate::price::PricingSide;
use crate::product::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One side of a streamed quote, with displayed and reserved size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    pub fn new(price: Decimal, visible_quantity: i64, hidden_quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

/// A two-way market for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Bond,
    pub bid_order: PriceStreamOrder,
    pub offer_order: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Bond, bid_order: PriceStreamOrder, offer_order: PriceStreamOrder) -> Self {
        Self {
            product,
            bid_order,
            offer_order,
        }
    }
}
