//! PV01 risk and bucketed sectors

use crate::product::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// PV01 sensitivity attached to a holding.
///
/// Generic over the product so a single-bond risk entry and a whole-sector
/// roll-up share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pv01<P> {
    pub product: P,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl<P> Pv01<P> {
    pub fn new(product: P, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    /// Sensitivity scaled by the held quantity.
    pub fn total_risk(&self) -> Decimal {
        self.pv01 * Decimal::from(self.quantity)
    }
}

/// A named grouping of products risk is aggregated over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub products: Vec<Bond>,
    pub name: String,
}

impl BucketedSector {
    pub fn new(products: Vec<Bond>, name: impl Into<String>) -> Self {
        Self {
            products,
            name: name.into(),
        }
    }
}
