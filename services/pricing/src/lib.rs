//! Pricing services
//!
//! `PricingService` turns the raw bid/ask feed into mid/spread prices and
//! fans them out to the streaming pipeline and the GUI. `GuiService` is a
//! rate-limited sink appending throttled price updates to a display file.
//!
//! ```text
//! prices.txt ──► PriceFeed ──► PricingService ──┬─► listeners (streaming)
//!                                               └─► GuiService ──► gui.txt
//! ```

pub mod gui;
pub mod service;

pub use gui::{GuiConnector, GuiService, DEFAULT_THROTTLE_MS};
pub use service::{PriceFeed, PricingService};
