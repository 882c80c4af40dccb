//! Pricing service and its input feed

use std::collections::HashMap;
use std::io::BufRead;
use std::rc::Rc;

use bus::{Connector, Listener, ListenerSet, Service, SharedService};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use types::errors::{FeedError, RecordError};
use types::ids::ProductId;
use types::notation::parse_price;
use types::price::Price;
use types::product::bond_by_cusip;

/// Manages mid prices and bid/offer spreads, keyed on product identifier.
pub struct PricingService {
    prices: HashMap<ProductId, Price>,
    listeners: ListenerSet<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for PricingService {
    type Key = ProductId;
    type Value = Price;

    fn get_data(&self, key: &ProductId) -> Option<&Price> {
        self.prices.get(key)
    }

    fn on_message(&mut self, price: Price) {
        let product_id = price.product.product_id.clone();
        self.prices.insert(product_id, price.clone());
        self.listeners.notify_add(&price);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<Price>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Price> {
        &self.listeners
    }
}

/// Subscribe-only connector for `productId,bidPrice,askPrice` rows.
pub struct PriceFeed {
    service: SharedService<PricingService>,
}

impl PriceFeed {
    pub fn new(service: SharedService<PricingService>) -> Self {
        Self { service }
    }

    fn parse_record(line: &str) -> Result<Price, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [product_id, bid, ask] = fields.as_slice() else {
            return Err(RecordError::Malformed(line.to_string()));
        };

        let product = bond_by_cusip(product_id)
            .ok_or_else(|| RecordError::UnknownProduct(product_id.to_string()))?;
        let bid = parse_price(bid)?;
        let ask = parse_price(ask)?;

        let mid = (bid + ask) / Decimal::from(2);
        let spread = ask - bid;
        Ok(Price::new(product, mid, spread))
    }
}

impl Connector<Price> for PriceFeed {
    fn subscribe<R: BufRead>(&mut self, input: R) -> Result<(), FeedError> {
        let mut tick_count = 0usize;
        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match Self::parse_record(&line) {
                Ok(price) => {
                    self.service.borrow_mut().on_message(price);
                    tick_count += 1;
                }
                Err(err) => warn!(%err, "skipping price record"),
            }
        }
        debug!(ticks = tick_count, "price feed drained");
        Ok(())
    }
}
