//! Two-sided quote generation from price ticks
//!
//! Each tick becomes a bid/offer pair straddling the mid. The visible size
//! alternates between one and two million per emission, with hidden size
//! always twice the visible, so the stream never shows a constant footprint.

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::ProductId;
use types::price::{Price, PricingSide};
use types::stream::{PriceStream, PriceStreamOrder};

const BASE_VISIBLE: i64 = 1_000_000;

/// A price stream produced by the quoting strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgoStream {
    pub stream: PriceStream,
}

impl AlgoStream {
    pub fn new(stream: PriceStream) -> Self {
        Self { stream }
    }
}

/// Transforms prices into streamed two-way quotes.
pub struct AlgoStreamingService {
    streams: HashMap<ProductId, AlgoStream>,
    listeners: ListenerSet<AlgoStream>,
    count: u64,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            streams: HashMap::new(),
            listeners: ListenerSet::new(),
            count: 0,
        }
    }

    /// Quote both sides of the given price and emit the stream.
    pub fn algo_publish_price(&mut self, price: &Price) {
        let half_spread = price.bid_offer_spread / Decimal::from(2);
        let bid_price = price.mid - half_spread;
        let offer_price = price.mid + half_spread;

        // Alternate visible sizes: 1M, 2M, 1M, ...
        let visible = (self.count % 2 + 1) as i64 * BASE_VISIBLE;
        let hidden = 2 * visible;
        self.count += 1;

        let stream = AlgoStream::new(PriceStream::new(
            price.product.clone(),
            PriceStreamOrder::new(bid_price, visible, hidden, PricingSide::Bid),
            PriceStreamOrder::new(offer_price, visible, hidden, PricingSide::Offer),
        ));

        self.streams
            .insert(price.product.product_id.clone(), stream.clone());
        self.listeners.notify_add(&stream);
    }

    /// Listener adapter fed by the pricing service.
    pub fn price_listener(service: SharedService<Self>) -> Rc<dyn Listener<Price>> {
        struct PriceListener {
            service: SharedService<AlgoStreamingService>,
        }

        impl Listener<Price> for PriceListener {
            fn process_add(&self, price: &Price) {
                self.service.borrow_mut().algo_publish_price(price);
            }
        }

        Rc::new(PriceListener { service })
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for AlgoStreamingService {
    type Key = ProductId;
    type Value = AlgoStream;

    fn get_data(&self, key: &ProductId) -> Option<&AlgoStream> {
        self.streams.get(key)
    }

    /// Store only; emission happens in `algo_publish_price`.
    fn on_message(&mut self, data: AlgoStream) {
        let product_id = data.stream.product.product_id.clone();
        self.streams.insert(product_id, data);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<AlgoStream>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<AlgoStream> {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use types::product::bond_by_maturity;

    struct Recorder {
        streams: RefCell<Vec<AlgoStream>>,
    }

    impl Listener<AlgoStream> for Recorder {
        fn process_add(&self, stream: &AlgoStream) {
            self.streams.borrow_mut().push(stream.clone());
        }
    }

    fn wired() -> (SharedService<AlgoStreamingService>, Rc<Recorder>) {
        let service = bus::shared(AlgoStreamingService::new());
        let recorder = Rc::new(Recorder {
            streams: RefCell::new(Vec::new()),
        });
        service
            .borrow_mut()
            .add_listener(recorder.clone() as Rc<dyn Listener<AlgoStream>>);
        (service, recorder)
    }

    #[test]
    fn test_first_tick_quotes_around_mid() {
        let (service, recorder) = wired();
        let price = Price::new(bond_by_maturity(2).unwrap(), dec!(100), dec!(0.03125));
        service.borrow_mut().algo_publish_price(&price);

        let streams = recorder.streams.borrow();
        assert_eq!(streams.len(), 1);
        let stream = &streams[0].stream;

        // half spread of 1/64 around mid 100
        assert_eq!(stream.bid_order.price, dec!(99.984375));
        assert_eq!(stream.offer_order.price, dec!(100.015625));
        assert_eq!(stream.bid_order.side, PricingSide::Bid);
        assert_eq!(stream.offer_order.side, PricingSide::Offer);
        assert_eq!(stream.bid_order.visible_quantity, 1_000_000);
        assert_eq!(stream.bid_order.hidden_quantity, 2_000_000);
    }

    #[test]
    fn test_visible_size_alternates() {
        let (service, recorder) = wired();
        let price = Price::new(bond_by_maturity(2).unwrap(), dec!(100), dec!(0.03125));
        for _ in 0..4 {
            service.borrow_mut().algo_publish_price(&price);
        }

        let visibles: Vec<i64> = recorder
            .streams
            .borrow()
            .iter()
            .map(|s| s.stream.bid_order.visible_quantity)
            .collect();
        assert_eq!(visibles, vec![1_000_000, 2_000_000, 1_000_000, 2_000_000]);

        // Hidden is always twice visible, on both sides.
        for stream in recorder.streams.borrow().iter() {
            let s = &stream.stream;
            assert_eq!(s.bid_order.hidden_quantity, 2 * s.bid_order.visible_quantity);
            assert_eq!(s.offer_order.hidden_quantity, 2 * s.offer_order.visible_quantity);
            assert_eq!(s.bid_order.visible_quantity, s.offer_order.visible_quantity);
        }
    }

    #[test]
    fn test_store_keeps_latest_stream() {
        let (service, recorder) = wired();
        let product = bond_by_maturity(2).unwrap();
        let key = product.product_id.clone();

        service
            .borrow_mut()
            .algo_publish_price(&Price::new(product.clone(), dec!(100), dec!(0.03125)));
        service
            .borrow_mut()
            .algo_publish_price(&Price::new(product, dec!(100.5), dec!(0.03125)));

        let service = service.borrow();
        let stored = service.get_data(&key).unwrap();
        assert_eq!(stored, recorder.streams.borrow().last().unwrap());
    }
}
