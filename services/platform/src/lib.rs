//! Platform bootstrap
//!
//! Builds every service, links the DAG, and drains the four input feeds in
//! order. The wiring below is the whole data-flow graph:
//!
//! ```text
//! prices.txt ──► Pricing ──┬─► AlgoStreaming ─► Streaming ─► history(streaming)
//!                          └─► GUI ─► gui.txt (throttled)
//! marketdata.txt ─► MarketData ─► AlgoExecution ─► Execution ─┬─► TradeBooking ─► Position ─┬─► Risk ─► history(risk)
//!                                                             │                             └─► history(positions)
//!                                                             └─► history(executions)
//! trades.txt ─► TradeBooking
//! inquiries.txt ─► Inquiry ─► history(allinquiries)
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bus::{shared, Connector};
use tracing::info;

use booking::{PositionService, RiskService, TradeBookingService, TradeFeed};
use execution::{AlgoExecutionService, ExecutionService};
use inquiry::{InquiryFeed, InquiryService};
use market_data::{MarketDataFeed, MarketDataService};
use persistence::{HistoricalDataService, SinkKind};
use pricing::{GuiConnector, GuiService, PriceFeed, PricingService, DEFAULT_THROTTLE_MS};
use streaming::{AlgoStreamingService, StreamingService};
use types::execution::ExecutionOrder;
use types::inquiry::Inquiry;
use types::position::Position;
use types::product::{all_bonds, Bond};
use types::risk::{BucketedSector, Pv01};
use types::stream::PriceStream;

/// Where the pipeline reads and writes, and how it is tuned.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub book_depth: usize,
    pub gui_throttle_ms: i64,
}

impl PlatformConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            book_depth: market_data::service::DEFAULT_BOOK_DEPTH,
            gui_throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

/// The configured risk sectors: a front-end and a long-end bucket.
pub fn risk_sectors() -> Vec<BucketedSector> {
    let bonds = all_bonds();
    vec![
        BucketedSector::new(bonds[..3].to_vec(), "front-end"),
        BucketedSector::new(bonds[3..].to_vec(), "long-end"),
    ]
}

/// Bucketed risk figures computed after a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub sector_risk: Vec<Pv01<BucketedSector>>,
}

fn open_input(dir: &Path, name: &str) -> Result<BufReader<File>> {
    let path = dir.join(name);
    let file =
        File::open(&path).with_context(|| format!("opening input {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Build the service graph, drain the feeds, and report sector risk.
pub fn run(config: &PlatformConfig) -> Result<RunReport> {
    info!("services initializing");
    let pricing_service = shared(PricingService::new());
    let gui_service = shared(GuiService::new(GuiConnector::with_clock(
        config.output_dir.join("gui.txt"),
        config.gui_throttle_ms,
        Box::new(types::timestamp::SystemClock),
    )));
    let algo_streaming_service = shared(AlgoStreamingService::new());
    let streaming_service = shared(StreamingService::new());
    let market_data_service = shared(MarketDataService::with_depth(config.book_depth));
    let algo_execution_service = shared(AlgoExecutionService::new());
    let execution_service = shared(ExecutionService::new());
    let trade_booking_service = shared(TradeBookingService::new());
    let position_service = shared(PositionService::new());
    let risk_service = shared(RiskService::new());
    let inquiry_service = shared(InquiryService::new());

    let out = config.output_dir.as_path();
    let historical_positions = shared(HistoricalDataService::<Position>::new(
        SinkKind::Position,
        out,
    ));
    let historical_risk = shared(HistoricalDataService::<Pv01<Bond>>::new(SinkKind::Risk, out));
    let historical_executions = shared(HistoricalDataService::<ExecutionOrder>::new(
        SinkKind::Execution,
        out,
    ));
    let historical_streams = shared(HistoricalDataService::<PriceStream>::new(
        SinkKind::Streaming,
        out,
    ));
    let historical_inquiries = shared(HistoricalDataService::<Inquiry>::new(
        SinkKind::Inquiry,
        out,
    ));
    info!("services initialized");

    info!("services linking");
    {
        use bus::Service;

        let mut pricing = pricing_service.borrow_mut();
        pricing.add_listener(AlgoStreamingService::price_listener(
            algo_streaming_service.clone(),
        ));
        pricing.add_listener(GuiService::price_listener(gui_service.clone()));

        algo_streaming_service
            .borrow_mut()
            .add_listener(StreamingService::algo_listener(streaming_service.clone()));
        streaming_service
            .borrow_mut()
            .add_listener(HistoricalDataService::listener(historical_streams.clone()));

        market_data_service
            .borrow_mut()
            .add_listener(AlgoExecutionService::book_listener(
                algo_execution_service.clone(),
            ));
        algo_execution_service
            .borrow_mut()
            .add_listener(ExecutionService::algo_listener(execution_service.clone()));

        let mut execution = execution_service.borrow_mut();
        execution.add_listener(TradeBookingService::execution_listener(
            trade_booking_service.clone(),
        ));
        execution.add_listener(HistoricalDataService::listener(
            historical_executions.clone(),
        ));

        trade_booking_service
            .borrow_mut()
            .add_listener(PositionService::trade_listener(position_service.clone()));

        let mut positions = position_service.borrow_mut();
        positions.add_listener(RiskService::position_listener(risk_service.clone()));
        positions.add_listener(HistoricalDataService::listener(
            historical_positions.clone(),
        ));

        risk_service
            .borrow_mut()
            .add_listener(HistoricalDataService::listener(historical_risk.clone()));
        inquiry_service
            .borrow_mut()
            .add_listener(HistoricalDataService::listener(
                historical_inquiries.clone(),
            ));
    }
    info!("services linked");

    let input = config.input_dir.as_path();

    info!("price data processing");
    PriceFeed::new(pricing_service.clone()).subscribe(open_input(input, "prices.txt")?)?;
    info!("price data processed");

    info!("trade data processing");
    TradeFeed::new(trade_booking_service.clone()).subscribe(open_input(input, "trades.txt")?)?;
    info!("trade data processed");

    info!("market data processing");
    MarketDataFeed::new(market_data_service.clone())
        .subscribe(open_input(input, "marketdata.txt")?)?;
    info!("market data processed");

    info!("inquiry data processing");
    InquiryFeed::new(inquiry_service.clone()).subscribe(open_input(input, "inquiries.txt")?)?;
    info!("inquiry data processed");

    let risk = risk_service.borrow();
    let sector_risk: Vec<Pv01<BucketedSector>> = risk_sectors()
        .iter()
        .map(|sector| risk.bucketed_risk(sector))
        .collect();
    for entry in &sector_risk {
        info!(
            sector = %entry.product.name,
            pv01 = %entry.pv01,
            "bucketed sector risk"
        );
    }

    Ok(RunReport { sector_risk })
}
