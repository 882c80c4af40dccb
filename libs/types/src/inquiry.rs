//! Customer inquiries

use crate::ids::InquiryId;
use crate::product::Bond;
use crate::trade::TradeSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a customer inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryState {
    /// Arrived from the customer, not yet quoted
    Received,
    /// A quote has gone back to the customer
    Quoted,
    /// Completed (terminal)
    Done,
    /// Rejected by the desk (terminal)
    Rejected,
    /// Rejected by the customer (terminal)
    CustomerRejected,
}

impl InquiryState {
    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InquiryState::Done | InquiryState::Rejected | InquiryState::CustomerRejected
        )
    }
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InquiryState::Received => write!(f, "RECEIVED"),
            InquiryState::Quoted => write!(f, "QUOTED"),
            InquiryState::Done => write!(f, "DONE"),
            InquiryState::Rejected => write!(f, "REJECTED"),
            InquiryState::CustomerRejected => write!(f, "CUSTOMER_REJECTED"),
        }
    }
}

impl FromStr for InquiryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVED" => Ok(InquiryState::Received),
            "QUOTED" => Ok(InquiryState::Quoted),
            "DONE" => Ok(InquiryState::Done),
            "REJECTED" => Ok(InquiryState::Rejected),
            "CUSTOMER_REJECTED" => Ok(InquiryState::CustomerRejected),
            other => Err(format!("unknown inquiry state: {other}")),
        }
    }
}

/// An inquiry from a customer for a quantity of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: InquiryId,
    pub product: Bond,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: Decimal,
    pub state: InquiryState,
}

impl Inquiry {
    pub fn new(
        inquiry_id: InquiryId,
        product: Bond,
        side: TradeSide,
        quantity: i64,
        price: Decimal,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id,
            product,
            side,
            quantity,
            price,
            state,
        }
    }
}
