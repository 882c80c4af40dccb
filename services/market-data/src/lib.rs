//! Market Data Service
//!
//! Consumes raw depth records and produces:
//! - Order books of a configured depth, one per batch of records
//! - Per-price aggregation of duplicate levels
//! - Best bid/offer extraction
//!
//! ```text
//! marketdata.txt ──► MarketDataFeed ──► MarketDataService ──► listeners
//! ```

pub mod book;
pub mod feed;
pub mod service;

pub use book::{BidOffer, Order, OrderBook};
pub use feed::MarketDataFeed;
pub use service::MarketDataService;
