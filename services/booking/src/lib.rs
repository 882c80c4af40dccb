//! Trade booking, position keeping, and risk
//!
//! Executions and the trade feed land in `TradeBookingService`, which books
//! each trade into one of three round-robin accounting books. Positions
//! accumulate per product and book; every position change is re-risked into
//! a PV01 figure and rolled up by bucketed sector on demand.
//!
//! ```text
//! trades.txt ────────► TradeBookingService ──► PositionService ──► RiskService ──► listeners
//! ExecutionService ──►
//! ```

pub mod positions;
pub mod risk;
pub mod trades;

pub use positions::PositionService;
pub use risk::{default_pv01_table, RiskService};
pub use trades::{TradeBookingService, TradeFeed};
