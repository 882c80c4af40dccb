//! Feed and record error taxonomy
//!
//! Two tiers: `RecordError` covers a single bad input row (logged and
//! skipped), `FeedError` covers failures that abort the whole feed.

use crate::notation::NotationError;
use thiserror::Error;

/// A problem with one input record. The feed skips the row and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("price notation: {0}")]
    Notation(#[from] NotationError),
}

/// A failure that aborts a feed and propagates to the driver.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
