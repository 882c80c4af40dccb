//! Spread-gated crossing strategy
//!
//! For every inbound book: if the best offer is within 1/128 of the best
//! bid, cross the spread with a market order, alternating between hitting
//! the bid and lifting the offer. Books wider than the gate are ignored.

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use market_data::OrderBook;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::execution::{ExecutionOrder, OrderType, Venue};
use types::ids::{OrderId, ProductId};
use types::price::PricingSide;

/// Widest spread the strategy will cross.
pub const SPREAD_GATE: Decimal = dec!(0.0078125); // 1/128

/// An execution order tagged with the venue it should execute on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgoExecutionOrder {
    pub order: ExecutionOrder,
    pub venue: Venue,
}

impl AlgoExecutionOrder {
    pub fn new(order: ExecutionOrder, venue: Venue) -> Self {
        Self { order, venue }
    }
}

/// Generates child execution orders from resting order books.
pub struct AlgoExecutionService {
    orders: HashMap<ProductId, AlgoExecutionOrder>,
    listeners: ListenerSet<AlgoExecutionOrder>,
    spread_gate: Decimal,
    execution_count: u64,
    next_order_seq: u64,
}

impl AlgoExecutionService {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            listeners: ListenerSet::new(),
            spread_gate: SPREAD_GATE,
            execution_count: 0,
            next_order_seq: 1,
        }
    }

    /// Count of orders emitted so far.
    pub fn execution_count(&self) -> u64 {
        self.execution_count
    }

    /// Cross the book if the spread is within the gate, emitting the child
    /// order to every listener. Orders are not retained in the store.
    pub fn execute_book(&mut self, book: &OrderBook, venue: Venue) {
        let Some(top) = book.best_bid_offer() else {
            return;
        };
        if top.spread() > self.spread_gate {
            return;
        }

        // Alternate: even count hits the bid (we sell), odd lifts the offer.
        let (side, price, quantity) = if self.execution_count % 2 == 0 {
            (PricingSide::Bid, top.bid.price, top.bid.quantity)
        } else {
            (PricingSide::Offer, top.offer.price, top.offer.quantity)
        };
        self.execution_count += 1;

        let order_id = OrderId::new(format!("XO{:07}", self.next_order_seq));
        self.next_order_seq += 1;

        let order = AlgoExecutionOrder::new(
            ExecutionOrder::new(
                book.product.clone(),
                side,
                order_id,
                OrderType::Market,
                price,
                quantity,
                0,
                None,
                false,
            ),
            venue,
        );

        debug!(
            product = %order.order.product.product_id,
            side = %order.order.side,
            %price,
            "crossing spread"
        );
        self.listeners.notify_add(&order);
    }

    /// Listener adapter feeding books from the market data service.
    pub fn book_listener(service: SharedService<Self>) -> Rc<dyn Listener<OrderBook>> {
        struct BookListener {
            service: SharedService<AlgoExecutionService>,
        }

        impl Listener<OrderBook> for BookListener {
            fn process_add(&self, book: &OrderBook) {
                self.service.borrow_mut().execute_book(book, Venue::Brokertec);
            }
        }

        Rc::new(BookListener { service })
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for AlgoExecutionService {
    type Key = ProductId;
    type Value = AlgoExecutionOrder;

    fn get_data(&self, key: &ProductId) -> Option<&AlgoExecutionOrder> {
        self.orders.get(key)
    }

    /// Store only; emission happens in `execute_book`, so fanning out here
    /// would deliver twice.
    fn on_message(&mut self, data: AlgoExecutionOrder) {
        let product_id = data.order.product.product_id.clone();
        self.orders.insert(product_id, data);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<AlgoExecutionOrder>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<AlgoExecutionOrder> {
        &self.listeners
    }
}
