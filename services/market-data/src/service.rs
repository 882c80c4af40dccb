//! Market data service keyed on product identifier

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service};
use types::ids::ProductId;

use crate::book::{BidOffer, OrderBook};

/// Default number of price levels tracked per side.
pub const DEFAULT_BOOK_DEPTH: usize = 10;

/// Distributes order book market data, keyed on product identifier.
pub struct MarketDataService {
    order_books: HashMap<ProductId, OrderBook>,
    listeners: ListenerSet<OrderBook>,
    book_depth: usize,
}

impl MarketDataService {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_BOOK_DEPTH)
    }

    pub fn with_depth(book_depth: usize) -> Self {
        Self {
            order_books: HashMap::new(),
            listeners: ListenerSet::new(),
            book_depth,
        }
    }

    pub fn book_depth(&self) -> usize {
        self.book_depth
    }

    /// Best bid/offer for the stored book of a product.
    pub fn best_bid_offer(&self, product_id: &ProductId) -> Option<BidOffer> {
        self.order_books
            .get(product_id)
            .and_then(OrderBook::best_bid_offer)
    }

    /// Rewrite the stored book so each stack holds one order per distinct
    /// price, then return the new stored book.
    pub fn aggregate_depth(&mut self, product_id: &ProductId) -> Option<&OrderBook> {
        let aggregated = self.order_books.get(product_id)?.aggregated();
        self.order_books.insert(product_id.clone(), aggregated);
        self.order_books.get(product_id)
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for MarketDataService {
    type Key = ProductId;
    type Value = OrderBook;

    fn get_data(&self, key: &ProductId) -> Option<&OrderBook> {
        self.order_books.get(key)
    }

    fn on_message(&mut self, book: OrderBook) {
        let product_id = book.product.product_id.clone();
        self.order_books.insert(product_id, book.clone());
        self.listeners.notify_add(&book);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<OrderBook>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<OrderBook> {
        &self.listeners
    }
}
