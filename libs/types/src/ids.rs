//! Identifier types for pipeline entities
//!
//! All ids are exogenous strings carried by the input feeds (CUSIPs, trade
//! ids, inquiry ids), wrapped in newtypes so keys of different stores cannot
//! be confused.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id! {
    /// Product identifier (nine-character CUSIP for treasury bonds)
    ProductId
}

string_id! {
    /// Unique identifier for a booked trade
    TradeId
}

string_id! {
    /// Unique identifier for an execution order
    OrderId
}

string_id! {
    /// Unique identifier for a customer inquiry
    InquiryId
}
