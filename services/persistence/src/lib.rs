//! Historical data sinks
//!
//! Terminal services that persist pipeline artifacts to append-only text
//! logs, one fixed file per record kind. Every line is prefixed with a fresh
//! timestamp and ends with a trailing comma:
//!
//! ```text
//! 2023-01-05 09:30:07.042,<field>,<field>,...,
//! ```

pub mod records;
pub mod sink;

pub use records::{HistoricalRecord, SinkKind};
pub use sink::{HistoricalConnector, HistoricalDataService};
