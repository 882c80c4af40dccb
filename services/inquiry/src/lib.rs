//! Inquiry service
//!
//! Customer inquiries run a five-state lifecycle. A `RECEIVED` inquiry is
//! stored and handed to the connector, which answers with a `QUOTED` copy
//! re-entering the service; the quoted inquiry completes as `DONE` and fans
//! out to the history sink. The loop is bounded: one re-entry per inbound
//! `RECEIVED` event.
//!
//! ```text
//! inquiries.txt ──► InquiryFeed ──► InquiryService ⟲ connector ──► listeners
//! ```

use std::collections::HashMap;
use std::io::BufRead;
use std::rc::Rc;

use bus::{Connector, Listener, ListenerSet, Service, SharedService};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use types::errors::{FeedError, RecordError};
use types::ids::InquiryId;
use types::inquiry::{Inquiry, InquiryState};
use types::notation::parse_price;
use types::product::bond_by_cusip;
use types::trade::TradeSide;

/// The quoting side of the bidirectional inquiry connector.
///
/// `quote` rewrites a `RECEIVED` inquiry to `QUOTED` and returns it for
/// re-entry into the service; anything else is swallowed.
pub struct InquiryConnector;

impl InquiryConnector {
    pub fn quote(&mut self, mut inquiry: Inquiry) -> Option<Inquiry> {
        if inquiry.state != InquiryState::Received {
            return None;
        }
        inquiry.state = InquiryState::Quoted;
        Some(inquiry)
    }
}

/// Service for customer inquiries, keyed on inquiry identifier (each inquiry
/// is unique; this is not a product key).
pub struct InquiryService {
    inquiries: HashMap<InquiryId, Inquiry>,
    listeners: ListenerSet<Inquiry>,
    connector: InquiryConnector,
}

impl InquiryService {
    pub fn new() -> Self {
        Self {
            inquiries: HashMap::new(),
            listeners: ListenerSet::new(),
            connector: InquiryConnector,
        }
    }

    /// Send a quote back to the client: update the stored price and fan out.
    /// The state is left untouched.
    pub fn send_quote(&mut self, inquiry_id: &InquiryId, price: Decimal) {
        let Some(inquiry) = self.inquiries.get_mut(inquiry_id) else {
            warn!(%inquiry_id, "quote for unknown inquiry");
            return;
        };
        inquiry.price = price;
        let inquiry = self.inquiries[inquiry_id].clone();
        self.listeners.notify_add(&inquiry);
    }

    /// Reject an inquiry from the client. No fan-out.
    pub fn reject_inquiry(&mut self, inquiry_id: &InquiryId) {
        if let Some(inquiry) = self.inquiries.get_mut(inquiry_id) {
            inquiry.state = InquiryState::Rejected;
        }
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for InquiryService {
    type Key = InquiryId;
    type Value = Inquiry;

    fn get_data(&self, key: &InquiryId) -> Option<&Inquiry> {
        self.inquiries.get(key)
    }

    fn on_message(&mut self, mut inquiry: Inquiry) {
        match inquiry.state {
            InquiryState::Received => {
                self.inquiries
                    .insert(inquiry.inquiry_id.clone(), inquiry.clone());
                // The connector answers with a QUOTED copy that re-enters
                // the service. Bounded: the re-entry arrives as QUOTED.
                if let Some(quoted) = self.connector.quote(inquiry) {
                    self.on_message(quoted);
                }
            }
            InquiryState::Quoted => {
                inquiry.state = InquiryState::Done;
                debug!(inquiry_id = %inquiry.inquiry_id, "inquiry done");
                self.inquiries
                    .insert(inquiry.inquiry_id.clone(), inquiry.clone());
                self.listeners.notify_add(&inquiry);
            }
            _ => {} // terminal or customer-side states: nothing to do
        }
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<Inquiry>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Inquiry> {
        &self.listeners
    }
}

/// Subscribe-only connector for
/// `inquiryId,productId,side,quantity,price,state` rows.
pub struct InquiryFeed {
    service: SharedService<InquiryService>,
}

impl InquiryFeed {
    pub fn new(service: SharedService<InquiryService>) -> Self {
        Self { service }
    }

    fn parse_record(line: &str) -> Result<Inquiry, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [inquiry_id, product_id, side, quantity, price, state] = fields.as_slice() else {
            return Err(RecordError::Malformed(line.to_string()));
        };

        let product = bond_by_cusip(product_id)
            .ok_or_else(|| RecordError::UnknownProduct(product_id.to_string()))?;
        let side: TradeSide = side
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;
        let quantity: i64 = quantity
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;
        let price = parse_price(price)?;
        let state: InquiryState = state
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;

        Ok(Inquiry::new(
            InquiryId::new(*inquiry_id),
            product,
            side,
            quantity,
            price,
            state,
        ))
    }
}

impl Connector<Inquiry> for InquiryFeed {
    fn subscribe<R: BufRead>(&mut self, input: R) -> Result<(), FeedError> {
        let mut inquiry_count = 0usize;
        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match Self::parse_record(&line) {
                Ok(inquiry) => {
                    self.service.borrow_mut().on_message(inquiry);
                    inquiry_count += 1;
                }
                Err(err) => warn!(%err, "skipping inquiry record"),
            }
        }
        debug!(inquiries = inquiry_count, "inquiry feed drained");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::io::Cursor;
    use types::product::bond_by_maturity;

    struct Recorder {
        inquiries: RefCell<Vec<Inquiry>>,
    }

    impl Listener<Inquiry> for Recorder {
        fn process_add(&self, inquiry: &Inquiry) {
            self.inquiries.borrow_mut().push(inquiry.clone());
        }
    }

    fn wired() -> (SharedService<InquiryService>, Rc<Recorder>) {
        let service = bus::shared(InquiryService::new());
        let recorder = Rc::new(Recorder {
            inquiries: RefCell::new(Vec::new()),
        });
        service
            .borrow_mut()
            .add_listener(recorder.clone() as Rc<dyn Listener<Inquiry>>);
        (service, recorder)
    }

    fn received(id: &str) -> Inquiry {
        Inquiry::new(
            InquiryId::new(id),
            bond_by_maturity(2).unwrap(),
            TradeSide::Buy,
            1_000_000,
            dec!(100),
            InquiryState::Received,
        )
    }

    #[test]
    fn test_received_completes_as_done() {
        let (service, recorder) = wired();
        service.borrow_mut().on_message(received("INQ01"));

        let key = InquiryId::new("INQ01");
        let service = service.borrow();
        assert_eq!(service.get_data(&key).unwrap().state, InquiryState::Done);

        // Exactly one fan-out, for the DONE transition.
        let seen = recorder.inquiries.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].state, InquiryState::Done);
    }

    #[test]
    fn test_terminal_states_are_noops() {
        let (service, recorder) = wired();
        for (id, state) in [
            ("I1", InquiryState::Done),
            ("I2", InquiryState::Rejected),
            ("I3", InquiryState::CustomerRejected),
        ] {
            let mut inquiry = received(id);
            inquiry.state = state;
            service.borrow_mut().on_message(inquiry);
        }

        assert!(recorder.inquiries.borrow().is_empty());
        assert!(service.borrow().get_data(&InquiryId::new("I1")).is_none());
    }

    #[test]
    fn test_send_quote_updates_price_not_state() {
        let (service, recorder) = wired();
        service.borrow_mut().on_message(received("INQ01"));
        recorder.inquiries.borrow_mut().clear();

        let key = InquiryId::new("INQ01");
        service.borrow_mut().send_quote(&key, dec!(100.015625));

        let seen = recorder.inquiries.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].price, dec!(100.015625));
        assert_eq!(seen[0].state, InquiryState::Done);
    }

    #[test]
    fn test_reject_inquiry_is_silent() {
        let (service, recorder) = wired();
        service.borrow_mut().on_message(received("INQ01"));
        recorder.inquiries.borrow_mut().clear();

        let key = InquiryId::new("INQ01");
        service.borrow_mut().reject_inquiry(&key);

        assert!(recorder.inquiries.borrow().is_empty());
        assert_eq!(
            service.borrow().get_data(&key).unwrap().state,
            InquiryState::Rejected
        );
    }

    #[test]
    fn test_feed_runs_state_machine_per_row() {
        let (service, recorder) = wired();
        let mut feed = InquiryFeed::new(service.clone());
        let input = "INQ01,91282CFX4,BUY,1000000,100-000,RECEIVED\n\
                     INQ02,912810TL2,SELL,2000000,99-316,RECEIVED\n\
                     bad row\n";
        feed.subscribe(Cursor::new(input)).unwrap();

        assert_eq!(recorder.inquiries.borrow().len(), 2);
        let service = service.borrow();
        assert_eq!(
            service.get_data(&InquiryId::new("INQ01")).unwrap().state,
            InquiryState::Done
        );
        assert_eq!(
            service.get_data(&InquiryId::new("INQ02")).unwrap().state,
            InquiryState::Done
        );
    }
}
