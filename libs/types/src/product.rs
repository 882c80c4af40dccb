//! Bond product type and the static treasury catalog
//!
//! The platform trades the seven on-the-run US treasuries. The catalog is
//! immutable for the process lifetime and queryable by maturity years or by
//! CUSIP.

use crate::ids::ProductId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Identifier scheme for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdType {
    /// Nine-character US security identifier
    Cusip,
    /// Twelve-character international identifier
    Isin,
}

/// A US Treasury bond
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub product_id: ProductId,
    pub id_type: IdType,
    pub ticker: String,
    pub coupon: Decimal,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(
        product_id: ProductId,
        id_type: IdType,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            product_id,
            id_type,
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }
}

/// One row of the static catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub maturity_years: u32,
    pub cusip: &'static str,
    pub maturity: NaiveDate,
}

const CATALOG_ROWS: [(u32, &str, (i32, u32, u32)); 7] = [
    (2, "91282CFX4", (2024, 11, 30)),
    (3, "91282CFW6", (2025, 11, 15)),
    (5, "91282CFZ9", (2027, 11, 30)),
    (7, "91282CFY2", (2029, 11, 30)),
    (10, "91282CFV8", (2032, 11, 15)),
    (20, "912810TM0", (2042, 11, 30)),
    (30, "912810TL2", (2052, 11, 15)),
];

fn catalog() -> &'static Vec<CatalogEntry> {
    static CATALOG: OnceLock<Vec<CatalogEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        CATALOG_ROWS
            .iter()
            .map(|&(years, cusip, (y, m, d))| CatalogEntry {
                maturity_years: years,
                cusip,
                maturity: NaiveDate::from_ymd_opt(y, m, d).expect("valid catalog date"),
            })
            .collect()
    })
}

fn bond_from_entry(entry: &CatalogEntry) -> Bond {
    Bond::new(
        ProductId::new(entry.cusip),
        IdType::Cusip,
        format!("US{}Y", entry.maturity_years),
        Decimal::ZERO,
        entry.maturity,
    )
}

/// Look up a bond by maturity in years (2, 3, 5, 7, 10, 20, 30).
pub fn bond_by_maturity(years: u32) -> Option<Bond> {
    catalog()
        .iter()
        .find(|e| e.maturity_years == years)
        .map(bond_from_entry)
}

/// Look up a bond by CUSIP.
pub fn bond_by_cusip(cusip: &str) -> Option<Bond> {
    catalog()
        .iter()
        .find(|e| e.cusip == cusip)
        .map(bond_from_entry)
}

/// CUSIP for a maturity in years.
pub fn cusip_by_maturity(years: u32) -> Option<ProductId> {
    catalog()
        .iter()
        .find(|e| e.maturity_years == years)
        .map(|e| ProductId::new(e.cusip))
}

/// All bonds in the catalog, shortest maturity first.
pub fn all_bonds() -> Vec<Bond> {
    catalog().iter().map(bond_from_entry).collect()
}
