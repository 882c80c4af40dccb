//! Streaming services
//!
//! `AlgoStreamingService` converts each price tick into a two-sided quote
//! with alternating visible size; `StreamingService` publishes the wrapped
//! price streams downstream.
//!
//! ```text
//! PricingService ──► AlgoStreamingService ──► StreamingService ──► listeners
//! ```

pub mod algo;
pub mod service;

pub use algo::{AlgoStream, AlgoStreamingService};
pub use service::StreamingService;
