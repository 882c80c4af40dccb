//! Multi-book position tracking

use crate::product::Bond;
use crate::trade::{Book, TradeSide};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signed position in a product across the accounting books.
///
/// BUY adds to a book, SELL subtracts; the aggregate is the signed sum over
/// all books. Sorted book keys keep iteration deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub product: Bond,
    positions: BTreeMap<Book, i64>,
}

impl Position {
    /// Flat position in the given product.
    pub fn new(product: Bond) -> Self {
        Self {
            product,
            positions: BTreeMap::new(),
        }
    }

    /// Quantity held in one book (zero if the book has never traded).
    pub fn position(&self, book: Book) -> i64 {
        self.positions.get(&book).copied().unwrap_or(0)
    }

    /// Apply a fill to a book.
    pub fn add_position(&mut self, book: Book, quantity: i64, side: TradeSide) {
        let entry = self.positions.entry(book).or_insert(0);
        match side {
            TradeSide::Buy => *entry += quantity,
            TradeSide::Sell => *entry -= quantity,
        }
    }

    /// Signed sum over all books.
    pub fn aggregate_position(&self) -> i64 {
        self.positions.values().sum()
    }
}
