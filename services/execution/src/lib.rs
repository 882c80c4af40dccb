//! Execution services
//!
//! `AlgoExecutionService` turns resting order books into child execution
//! orders when the spread is tight enough, alternating the side it crosses.
//! `ExecutionService` accepts those orders and sends them to a venue,
//! fanning out to trade booking and the execution history sink.
//!
//! ```text
//! MarketDataService ──► AlgoExecutionService ──► ExecutionService ──► listeners
//! ```

pub mod algo;
pub mod service;

pub use algo::{AlgoExecutionOrder, AlgoExecutionService};
pub use service::ExecutionService;
