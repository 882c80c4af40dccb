//! Order book state for a single product
//!
//! A book is built from one batch of depth records and overwritten whole on
//! the next batch. Stacks preserve feed order; aggregation collapses
//! duplicate price levels by summing their quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::price::PricingSide;
use types::product::Bond;

/// A market data order with price, quantity, and side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: Decimal, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Best bid and best offer drawn from one book.
///
/// Holds copies of the chosen orders; a derived value, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

impl BidOffer {
    /// Offer price minus bid price.
    pub fn spread(&self) -> Decimal {
        self.offer.price - self.bid.price
    }
}

/// Order book with a bid and an offer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Bond,
    bid_stack: Vec<Order>,
    offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Bond, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            product,
            bid_stack,
            offer_stack,
        }
    }

    pub fn bid_stack(&self) -> &[Order] {
        &self.bid_stack
    }

    pub fn offer_stack(&self) -> &[Order] {
        &self.offer_stack
    }

    /// Best bid (maximum price) and best offer (minimum price), scanning
    /// linearly; on ties the first occurrence wins. `None` if either side
    /// is empty.
    pub fn best_bid_offer(&self) -> Option<BidOffer> {
        let bid = self
            .bid_stack
            .iter()
            .reduce(|best, o| if o.price > best.price { o } else { best })?;
        let offer = self
            .offer_stack
            .iter()
            .reduce(|best, o| if o.price < best.price { o } else { best })?;
        Some(BidOffer {
            bid: bid.clone(),
            offer: offer.clone(),
        })
    }

    /// A copy of this book with each stack collapsed to one order per
    /// distinct price, quantities summed. First-occurrence order and side
    /// are retained per level.
    pub fn aggregated(&self) -> OrderBook {
        OrderBook {
            product: self.product.clone(),
            bid_stack: aggregate_stack(&self.bid_stack),
            offer_stack: aggregate_stack(&self.offer_stack),
        }
    }
}

fn aggregate_stack(stack: &[Order]) -> Vec<Order> {
    let mut by_price: HashMap<Decimal, usize> = HashMap::with_capacity(stack.len());
    let mut aggregated: Vec<Order> = Vec::with_capacity(stack.len());

    for order in stack {
        match by_price.get(&order.price) {
            Some(&at) => aggregated[at].quantity += order.quantity,
            None => {
                by_price.insert(order.price, aggregated.len());
                aggregated.push(order.clone());
            }
        }
    }

    aggregated
}
