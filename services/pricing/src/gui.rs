//! Throttled GUI sink
//!
//! Price updates stream far faster than a display needs. The connector
//! drops updates arriving within the throttle window of the last emission;
//! eligible updates append one timestamped line to the GUI file. Updates
//! are never deferred.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bus::{Connector, Listener, ListenerSet, Service, SharedService};
use tracing::warn;
use types::errors::FeedError;
use types::ids::ProductId;
use types::notation::format_price;
use types::price::Price;
use types::timestamp::{timestamp_now, Clock, SystemClock};

/// Default minimum interval between GUI lines.
pub const DEFAULT_THROTTLE_MS: i64 = 300;

/// Publish-only connector appending throttled price lines.
pub struct GuiConnector {
    path: PathBuf,
    throttle_ms: i64,
    last_emit_ms: i64,
    clock: Box<dyn Clock>,
}

impl GuiConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, DEFAULT_THROTTLE_MS, Box::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, throttle_ms: i64, clock: Box<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            throttle_ms,
            last_emit_ms: 0,
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Connector<Price> for GuiConnector {
    fn publish(&mut self, price: &Price) -> Result<(), FeedError> {
        let now_ms = self.clock.now_ms();
        if now_ms - self.last_emit_ms < self.throttle_ms {
            return Ok(()); // dropped, not deferred
        }
        self.last_emit_ms = now_ms;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{},{},{},{},",
            timestamp_now(),
            price.product.product_id,
            format_price(price.mid),
            format_price(price.bid_offer_spread),
        )?;
        Ok(())
    }
}

/// Rate-limited display sink for prices, keyed on product identifier.
pub struct GuiService {
    prices: HashMap<ProductId, Price>,
    listeners: ListenerSet<Price>,
    connector: GuiConnector,
}

impl GuiService {
    pub fn new(connector: GuiConnector) -> Self {
        Self {
            prices: HashMap::new(),
            listeners: ListenerSet::new(),
            connector,
        }
    }

    /// Listener adapter fed by the pricing service.
    pub fn price_listener(service: SharedService<Self>) -> Rc<dyn Listener<Price>> {
        struct PriceListener {
            service: SharedService<GuiService>,
        }

        impl Listener<Price> for PriceListener {
            fn process_add(&self, price: &Price) {
                self.service.borrow_mut().on_message(price.clone());
            }
        }

        Rc::new(PriceListener { service })
    }
}

impl Service for GuiService {
    type Key = ProductId;
    type Value = Price;

    fn get_data(&self, key: &ProductId) -> Option<&Price> {
        self.prices.get(key)
    }

    fn on_message(&mut self, price: Price) {
        self.prices
            .insert(price.product.product_id.clone(), price.clone());
        if let Err(err) = self.connector.publish(&price) {
            warn!(%err, "GUI publish failed");
        }
    }

    /// Registered but never notified: the GUI is a terminal sink.
    fn add_listener(&mut self, listener: Rc<dyn Listener<Price>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Price> {
        &self.listeners
    }
}
