//! Execution orders placed on a venue

use crate::ids::OrderId;
use crate::price::PricingSide;
use crate::product::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order type on a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Fok => write!(f, "FOK"),
            OrderType::Ioc => write!(f, "IOC"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Stop => write!(f, "STOP"),
        }
    }
}

/// Execution venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Venue {
    Brokertec,
    Espeed,
    Cme,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Brokertec => write!(f, "BROKERTEC"),
            Venue::Espeed => write!(f, "ESPEED"),
            Venue::Cme => write!(f, "CME"),
        }
    }
}

/// An order that can be placed on an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Bond,
    pub side: PricingSide,
    pub order_id: OrderId,
    pub order_type: OrderType,
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub parent_order_id: Option<OrderId>,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product: Bond,
        side: PricingSide,
        order_id: OrderId,
        order_type: OrderType,
        price: Decimal,
        visible_quantity: i64,
        hidden_quantity: i64,
        parent_order_id: Option<OrderId>,
        is_child_order: bool,
    ) -> Self {
        Self {
            product,
            side,
            order_id,
            order_type,
            price,
            visible_quantity,
            hidden_quantity,
            parent_order_id,
            is_child_order,
        }
    }

    /// Visible plus hidden interest.
    pub fn total_quantity(&self) -> i64 {
        self.visible_quantity + self.hidden_quantity
    }
}
