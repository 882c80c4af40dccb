//! Trade booking service and its inputs
//!
//! Trades arrive two ways: parsed from the trade file, or synthesized from
//! execution orders. Synthesized trades cycle through the three accounting
//! books starting at TRSY2 (the booking counter advances before the book is
//! chosen), invert the pricing side (we sell into bids, buy from offers),
//! and take on the full visible-plus-hidden quantity.

use std::collections::HashMap;
use std::io::BufRead;
use std::rc::Rc;

use bus::{Connector, Listener, ListenerSet, Service, SharedService};
use tracing::{debug, warn};
use types::errors::{FeedError, RecordError};
use types::execution::ExecutionOrder;
use types::ids::TradeId;
use types::notation::parse_price;
use types::price::PricingSide;
use types::product::bond_by_cusip;
use types::trade::{Book, Trade, TradeSide};

/// Books trades to a particular book, keyed on trade identifier.
pub struct TradeBookingService {
    trades: HashMap<TradeId, Trade>,
    listeners: ListenerSet<Trade>,
    booking_count: u64,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            trades: HashMap::new(),
            listeners: ListenerSet::new(),
            booking_count: 0,
        }
    }

    /// Book a trade: store it and fan out once.
    pub fn book_trade(&mut self, trade: Trade) {
        debug!(trade_id = %trade.trade_id, book = %trade.book, "booking trade");
        self.trades.insert(trade.trade_id.clone(), trade.clone());
        self.listeners.notify_add(&trade);
    }

    /// Synthesize and book a trade from an execution order.
    pub fn book_from_execution(&mut self, order: &ExecutionOrder) {
        self.booking_count += 1;
        let book = match self.booking_count % 3 {
            1 => Book::Trsy2,
            2 => Book::Trsy3,
            _ => Book::Trsy1,
        };

        // We sell into bids and buy from offers.
        let side = match order.side {
            PricingSide::Bid => TradeSide::Sell,
            PricingSide::Offer => TradeSide::Buy,
        };

        let trade = Trade::new(
            order.product.clone(),
            TradeId::new(order.order_id.as_str()),
            order.price,
            book,
            order.total_quantity(),
            side,
        );
        self.book_trade(trade);
    }

    /// Listener adapter fed by the execution service.
    pub fn execution_listener(service: SharedService<Self>) -> Rc<dyn Listener<ExecutionOrder>> {
        struct ExecutionListener {
            service: SharedService<TradeBookingService>,
        }

        impl Listener<ExecutionOrder> for ExecutionListener {
            fn process_add(&self, order: &ExecutionOrder) {
                self.service.borrow_mut().book_from_execution(order);
            }
        }

        Rc::new(ExecutionListener { service })
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for TradeBookingService {
    type Key = TradeId;
    type Value = Trade;

    fn get_data(&self, key: &TradeId) -> Option<&Trade> {
        self.trades.get(key)
    }

    fn on_message(&mut self, trade: Trade) {
        self.trades.insert(trade.trade_id.clone(), trade.clone());
        self.listeners.notify_add(&trade);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<Trade>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Trade> {
        &self.listeners
    }
}

/// Subscribe-only connector for
/// `productId,tradeId,price,book,quantity,side` rows.
pub struct TradeFeed {
    service: SharedService<TradeBookingService>,
}

impl TradeFeed {
    pub fn new(service: SharedService<TradeBookingService>) -> Self {
        Self { service }
    }

    fn parse_record(line: &str) -> Result<Trade, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [product_id, trade_id, price, book, quantity, side] = fields.as_slice() else {
            return Err(RecordError::Malformed(line.to_string()));
        };

        let product = bond_by_cusip(product_id)
            .ok_or_else(|| RecordError::UnknownProduct(product_id.to_string()))?;
        let price = parse_price(price)?;
        let book: Book = book
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;
        let quantity: i64 = quantity
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;
        let side: TradeSide = side
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;

        Ok(Trade::new(
            product,
            TradeId::new(*trade_id),
            price,
            book,
            quantity,
            side,
        ))
    }
}

impl Connector<Trade> for TradeFeed {
    fn subscribe<R: BufRead>(&mut self, input: R) -> Result<(), FeedError> {
        let mut trade_count = 0usize;
        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match Self::parse_record(&line) {
                Ok(trade) => {
                    self.service.borrow_mut().on_message(trade);
                    trade_count += 1;
                }
                Err(err) => warn!(%err, "skipping trade record"),
            }
        }
        debug!(trades = trade_count, "trade feed drained");
        Ok(())
    }
}
