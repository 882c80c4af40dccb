//! Position service

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use tracing::debug;
use types::ids::ProductId;
use types::position::Position;
use types::trade::Trade;

/// Manages positions across books and securities, keyed on product
/// identifier.
pub struct PositionService {
    positions: HashMap<ProductId, Position>,
    listeners: ListenerSet<Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Apply a trade to the product's position (starting flat for a product
    /// never seen before) and fan out the updated position.
    pub fn add_trade(&mut self, trade: &Trade) {
        let product_id = trade.product.product_id.clone();
        let position = self
            .positions
            .entry(product_id.clone())
            .or_insert_with(|| Position::new(trade.product.clone()));
        position.add_position(trade.book, trade.quantity, trade.side);

        debug!(
            product = %product_id,
            aggregate = position.aggregate_position(),
            "position updated"
        );

        let position = &self.positions[&product_id];
        self.listeners.notify_add(position);
    }

    /// Listener adapter fed by the trade booking service.
    pub fn trade_listener(service: SharedService<Self>) -> Rc<dyn Listener<Trade>> {
        struct TradeListener {
            service: SharedService<PositionService>,
        }

        impl Listener<Trade> for TradeListener {
            fn process_add(&self, trade: &Trade) {
                self.service.borrow_mut().add_trade(trade);
            }
        }

        Rc::new(TradeListener { service })
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for PositionService {
    type Key = ProductId;
    type Value = Position;

    fn get_data(&self, key: &ProductId) -> Option<&Position> {
        self.positions.get(key)
    }

    /// Store only; `add_trade` performs the fan-out.
    fn on_message(&mut self, position: Position) {
        self.positions
            .insert(position.product.product_id.clone(), position);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<Position>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Position> {
        &self.listeners
    }
}
