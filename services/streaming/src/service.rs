//! Streaming service publishing two-way prices

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use types::ids::ProductId;
use types::stream::PriceStream;

use crate::algo::AlgoStream;

/// Publishes two-way prices, keyed on product identifier.
pub struct StreamingService {
    streams: HashMap<ProductId, PriceStream>,
    listeners: ListenerSet<PriceStream>,
}

impl StreamingService {
    pub fn new() -> Self {
        Self {
            streams: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Fan the stream out to every listener.
    pub fn publish_price(&mut self, stream: &PriceStream) {
        self.listeners.notify_add(stream);
    }

    /// Listener adapter unwrapping algo streams from upstream.
    pub fn algo_listener(service: SharedService<Self>) -> Rc<dyn Listener<AlgoStream>> {
        struct AlgoListener {
            service: SharedService<StreamingService>,
        }

        impl Listener<AlgoStream> for AlgoListener {
            fn process_add(&self, data: &AlgoStream) {
                let mut service = self.service.borrow_mut();
                service.on_message(data.stream.clone());
                service.publish_price(&data.stream);
            }
        }

        Rc::new(AlgoListener { service })
    }
}

impl Default for StreamingService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for StreamingService {
    type Key = ProductId;
    type Value = PriceStream;

    fn get_data(&self, key: &ProductId) -> Option<&PriceStream> {
        self.streams.get(key)
    }

    /// Store only; `publish_price` performs the single fan-out.
    fn on_message(&mut self, data: PriceStream) {
        self.streams.insert(data.product.product_id.clone(), data);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<PriceStream>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<PriceStream> {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use types::price::PricingSide;
    use types::product::bond_by_maturity;
    use types::stream::PriceStreamOrder;

    struct Recorder {
        streams: RefCell<Vec<PriceStream>>,
    }

    impl Listener<PriceStream> for Recorder {
        fn process_add(&self, stream: &PriceStream) {
            self.streams.borrow_mut().push(stream.clone());
        }
    }

    fn sample_stream() -> PriceStream {
        PriceStream::new(
            bond_by_maturity(5).unwrap(),
            PriceStreamOrder::new(dec!(99.984375), 1_000_000, 2_000_000, PricingSide::Bid),
            PriceStreamOrder::new(dec!(100.015625), 1_000_000, 2_000_000, PricingSide::Offer),
        )
    }

    #[test]
    fn test_algo_listener_delivers_exactly_once() {
        let service = bus::shared(StreamingService::new());
        let recorder = Rc::new(Recorder {
            streams: RefCell::new(Vec::new()),
        });
        service
            .borrow_mut()
            .add_listener(recorder.clone() as Rc<dyn Listener<PriceStream>>);

        let listener = StreamingService::algo_listener(service.clone());
        let algo = AlgoStream::new(sample_stream());
        listener.process_add(&algo);

        assert_eq!(recorder.streams.borrow().len(), 1);
        let key = algo.stream.product.product_id.clone();
        assert_eq!(service.borrow().get_data(&key), Some(&algo.stream));
    }

    #[test]
    fn test_on_message_is_silent() {
        let mut service = StreamingService::new();
        let recorder = Rc::new(Recorder {
            streams: RefCell::new(Vec::new()),
        });
        service.add_listener(recorder.clone() as Rc<dyn Listener<PriceStream>>);

        service.on_message(sample_stream());
        assert!(recorder.streams.borrow().is_empty());
    }
}
