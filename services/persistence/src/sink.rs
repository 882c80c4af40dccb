//! Append-only log sink service

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bus::{Connector, Listener, ListenerSet, Service, SharedService};
use tracing::warn;
use types::errors::FeedError;
use types::timestamp::timestamp_now;

use crate::records::{HistoricalRecord, SinkKind};

/// Publish-only connector appending one timestamped line per record.
pub struct HistoricalConnector {
    path: PathBuf,
}

impl HistoricalConnector {
    pub fn new(directory: &Path, kind: SinkKind) -> Self {
        Self {
            path: directory.join(kind.file_name()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: HistoricalRecord> Connector<T> for HistoricalConnector {
    fn publish(&mut self, data: &T) -> Result<(), FeedError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut line = timestamp_now();
        for field in data.to_fields() {
            line.push(',');
            line.push_str(&field);
        }
        line.push(',');
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Terminal service persisting pipeline artifacts to an append-only log.
pub struct HistoricalDataService<T> {
    store: HashMap<String, T>,
    listeners: ListenerSet<T>,
    kind: SinkKind,
    connector: HistoricalConnector,
}

impl<T: HistoricalRecord + Clone + 'static> HistoricalDataService<T> {
    pub fn new(kind: SinkKind, directory: &Path) -> Self {
        Self {
            store: HashMap::new(),
            listeners: ListenerSet::new(),
            kind,
            connector: HistoricalConnector::new(directory, kind),
        }
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        self.connector.path()
    }

    /// Persist one record: store under its key and append to the log.
    pub fn persist_data(&mut self, persist_key: String, data: T) {
        if let Err(err) = self.connector.publish(&data) {
            warn!(%err, path = %self.connector.path().display(), "history append failed");
        }
        self.store.insert(persist_key, data);
    }

    /// Listener adapter; upstream services fan out into this.
    pub fn listener(service: SharedService<Self>) -> Rc<dyn Listener<T>> {
        struct SinkListener<T> {
            service: SharedService<HistoricalDataService<T>>,
        }

        impl<T: HistoricalRecord + Clone + 'static> Listener<T> for SinkListener<T> {
            fn process_add(&self, data: &T) {
                self.service
                    .borrow_mut()
                    .persist_data(data.persist_key(), data.clone());
            }
        }

        Rc::new(SinkListener { service })
    }
}

impl<T: HistoricalRecord + Clone + 'static> Service for HistoricalDataService<T> {
    type Key = String;
    type Value = T;

    fn get_data(&self, key: &String) -> Option<&T> {
        self.store.get(key)
    }

    fn on_message(&mut self, data: T) {
        self.persist_data(data.persist_key(), data);
    }

    /// Registered but never notified: history is a terminal sink.
    fn add_listener(&mut self, listener: Rc<dyn Listener<T>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<T> {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;
    use types::ids::InquiryId;
    use types::inquiry::{Inquiry, InquiryState};
    use types::product::{bond_by_maturity, Bond};
    use types::risk::Pv01;
    use types::trade::TradeSide;

    fn sample_inquiry(id: &str) -> Inquiry {
        Inquiry::new(
            InquiryId::new(id),
            bond_by_maturity(2).unwrap(),
            TradeSide::Buy,
            1_000_000,
            dec!(100),
            InquiryState::Done,
        )
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_persist_appends_timestamped_line() {
        let dir = TempDir::new().unwrap();
        let mut sink: HistoricalDataService<Inquiry> =
            HistoricalDataService::new(SinkKind::Inquiry, dir.path());

        let inquiry = sample_inquiry("INQ01");
        sink.persist_data(inquiry.persist_key(), inquiry);

        let lines = read_lines(&dir.path().join("allinquiries.txt"));
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.ends_with("DONE,"), "trailing comma after last field");
        // timestamp prefix: YYYY-MM-DD HH:MM:SS.mmm
        assert_eq!(&line[4..5], "-");
        assert_eq!(&line[19..20], ".");
        assert!(line.contains(",INQ01,91282CFX4,BUY,1000000,100-000,"));
    }

    #[test]
    fn test_lines_accumulate_in_order() {
        let dir = TempDir::new().unwrap();
        let sink = bus::shared(HistoricalDataService::<Inquiry>::new(
            SinkKind::Inquiry,
            dir.path(),
        ));
        let listener = HistoricalDataService::listener(sink.clone());

        for id in ["A", "B", "C"] {
            listener.process_add(&sample_inquiry(id));
        }

        let lines = read_lines(&dir.path().join("allinquiries.txt"));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(",A,"));
        assert!(lines[1].contains(",B,"));
        assert!(lines[2].contains(",C,"));

        let sink = sink.borrow();
        assert!(sink.get_data(&"B".to_string()).is_some());
    }

    #[test]
    fn test_risk_sink_uses_its_own_file() {
        let dir = TempDir::new().unwrap();
        let mut sink: HistoricalDataService<Pv01<Bond>> =
            HistoricalDataService::new(SinkKind::Risk, dir.path());

        let pv01 = Pv01::new(bond_by_maturity(10).unwrap(), dec!(0.000793), 750_000);
        sink.persist_data(pv01.persist_key(), pv01);

        let lines = read_lines(&dir.path().join("risk.txt"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(",91282CFV8,0.000793,750000,"));
    }
}
