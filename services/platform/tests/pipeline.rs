//! End-to-end pipeline tests
//!
//! Each test lays down input files in a temp directory, runs the full
//! service graph, and checks the append-only outputs.

use std::fs;
use std::path::Path;

use platform::{run, PlatformConfig};
use simulation::{generate_all, GeneratorConfig};
use tempfile::TempDir;

fn lines(path: &Path) -> Vec<String> {
    if !path.exists() {
        return Vec::new();
    }
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

fn write_inputs(dir: &Path, prices: &str, trades: &str, marketdata: &str, inquiries: &str) {
    fs::write(dir.join("prices.txt"), prices).unwrap();
    fs::write(dir.join("trades.txt"), trades).unwrap();
    fs::write(dir.join("marketdata.txt"), marketdata).unwrap();
    fs::write(dir.join("inquiries.txt"), inquiries).unwrap();
}

#[test]
fn test_generated_run_produces_all_outputs() {
    let dir = TempDir::new().unwrap();
    let generator = GeneratorConfig {
        prices_per_bond: 40,
        books_per_bond: 4,
        book_depth: 4,
        trades_per_bond: 6,
        inquiries_per_bond: 3,
        seed: 11,
    };
    generate_all(dir.path(), &generator).unwrap();

    let mut config = PlatformConfig::new(dir.path(), dir.path());
    config.book_depth = generator.book_depth;
    config.gui_throttle_ms = 0; // let every tick through for counting
    let report = run(&config).unwrap();

    // One streamed quote per price tick.
    assert_eq!(lines(&dir.path().join("streaming.txt")).len(), 7 * 40);
    assert_eq!(lines(&dir.path().join("gui.txt")).len(), 7 * 40);

    // The generator's book cycle makes one book in four crossable.
    let executions = lines(&dir.path().join("executions.txt"));
    assert_eq!(executions.len(), 7);

    // Every file trade and every synthesized trade moves a position, and
    // every position move re-risks.
    let expected_updates = 7 * 6 + executions.len();
    assert_eq!(lines(&dir.path().join("positions.txt")).len(), expected_updates);
    assert_eq!(lines(&dir.path().join("risk.txt")).len(), expected_updates);

    // Every inquiry completes and is archived once.
    assert_eq!(lines(&dir.path().join("allinquiries.txt")).len(), 7 * 3);

    assert_eq!(report.sector_risk.len(), 2);
    assert_eq!(report.sector_risk[0].product.name, "front-end");
    assert_eq!(report.sector_risk[1].product.name, "long-end");
    assert_eq!(report.sector_risk[0].quantity, 1);
}

#[test]
fn test_positions_roll_up_across_books() {
    let dir = TempDir::new().unwrap();
    let trades = "91282CFX4,T0001,100-000,TRSY1,1000000,BUY\n\
                  91282CFX4,T0002,100-000,TRSY2,500000,SELL\n\
                  91282CFX4,T0003,100-000,TRSY1,250000,BUY\n";
    write_inputs(dir.path(), "", trades, "", "");

    let config = PlatformConfig::new(dir.path(), dir.path());
    run(&config).unwrap();

    let positions = lines(&dir.path().join("positions.txt"));
    assert_eq!(positions.len(), 3);
    let last = positions.last().unwrap();
    assert!(last.contains("TRSY1,1250000"));
    assert!(last.contains("TRSY2,-500000"));
    assert!(last.contains("TRSY3,0"));
    assert!(last.ends_with(",750000,"), "aggregate: {last}");

    // Risk quantity tracks the aggregate after every update.
    let risk = lines(&dir.path().join("risk.txt"));
    assert_eq!(risk.len(), 3);
    assert!(risk.last().unwrap().contains(",750000,"));
}

#[test]
fn test_received_inquiry_archived_once_as_done() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        dir.path(),
        "",
        "",
        "",
        "INQ01,91282CFX4,BUY,1000000,100-000,RECEIVED\n",
    );

    let config = PlatformConfig::new(dir.path(), dir.path());
    run(&config).unwrap();

    let archived = lines(&dir.path().join("allinquiries.txt"));
    assert_eq!(archived.len(), 1);
    assert!(archived[0].contains(",INQ01,91282CFX4,BUY,1000000,100-000,DONE,"));
}

#[test]
fn test_crossable_books_alternate_and_book_round_robin() {
    let dir = TempDir::new().unwrap();

    // Three identical zero-spread books of depth two.
    let one_book = "91282CFX4,99-31+,1000000,BID\n\
                    91282CFX4,99-300,2000000,BID\n\
                    91282CFX4,99-31+,1500000,OFFER\n\
                    91282CFX4,100-010,2000000,OFFER\n";
    let marketdata = one_book.repeat(3);
    write_inputs(dir.path(), "", "", &marketdata, "");

    let mut config = PlatformConfig::new(dir.path(), dir.path());
    config.book_depth = 2;
    run(&config).unwrap();

    let executions = lines(&dir.path().join("executions.txt"));
    assert_eq!(executions.len(), 3);
    assert!(executions[0].contains(",BID,"));
    assert!(executions[1].contains(",OFFER,"));
    assert!(executions[2].contains(",BID,"));

    // Crossing the bid sells the bid quantity; lifting the offer buys the
    // offer quantity.
    assert!(executions[0].contains(",1000000,"));
    assert!(executions[1].contains(",1500000,"));

    // Synthesized trades walk the books starting at TRSY2.
    let positions = lines(&dir.path().join("positions.txt"));
    assert_eq!(positions.len(), 3);
    assert!(positions[0].contains("TRSY2,-1000000"));
    assert!(positions[1].contains("TRSY3,1500000"));
    assert!(positions[2].contains("TRSY1,-1000000"));
}

#[test]
fn test_wide_books_produce_no_executions() {
    let dir = TempDir::new().unwrap();
    // Spread of 1/64 stays above the crossing gate.
    let marketdata = "91282CFX4,99-31+,1000000,BID\n\
                      91282CFX4,99-300,2000000,BID\n\
                      91282CFX4,100-000,1000000,OFFER\n\
                      91282CFX4,100-010,2000000,OFFER\n";
    write_inputs(dir.path(), "", "", marketdata, "");

    let mut config = PlatformConfig::new(dir.path(), dir.path());
    config.book_depth = 2;
    run(&config).unwrap();

    assert!(lines(&dir.path().join("executions.txt")).is_empty());
    assert!(lines(&dir.path().join("positions.txt")).is_empty());
}

#[test]
fn test_streaming_sizes_alternate_per_tick() {
    let dir = TempDir::new().unwrap();
    let prices = "91282CFX4,99-316,100-002\n\
                  91282CFX4,99-316,100-002\n\
                  91282CFX4,99-316,100-002\n";
    write_inputs(dir.path(), prices, "", "", "");

    let config = PlatformConfig::new(dir.path(), dir.path());
    run(&config).unwrap();

    let streams = lines(&dir.path().join("streaming.txt"));
    assert_eq!(streams.len(), 3);
    assert!(streams[0].contains(",1000000,2000000,BID,"));
    assert!(streams[1].contains(",2000000,4000000,BID,"));
    assert!(streams[2].contains(",1000000,2000000,BID,"));
}

#[test]
fn test_gui_lines_respect_throttle() {
    let dir = TempDir::new().unwrap();
    let prices = "91282CFX4,99-316,100-002\n".repeat(200);
    write_inputs(dir.path(), &prices, "", "", "");

    let config = PlatformConfig::new(dir.path(), dir.path());
    run(&config).unwrap();

    let gui = lines(&dir.path().join("gui.txt"));
    assert!(!gui.is_empty());

    // Successive lines must be at least the throttle apart.
    let stamp_ms = |line: &String| -> i64 {
        let time = &line[11..23]; // HH:MM:SS.mmm
        let h: i64 = time[0..2].parse().unwrap();
        let m: i64 = time[3..5].parse().unwrap();
        let s: i64 = time[6..8].parse().unwrap();
        let ms: i64 = time[9..12].parse().unwrap();
        ((h * 60 + m) * 60 + s) * 1000 + ms
    };
    for pair in gui.windows(2) {
        let gap = stamp_ms(&pair[1]) - stamp_ms(&pair[0]);
        assert!(gap >= 300, "gui lines {gap}ms apart");
    }
}

#[test]
fn test_missing_input_aborts() {
    let dir = TempDir::new().unwrap();
    let config = PlatformConfig::new(dir.path(), dir.path());
    assert!(run(&config).is_err());
}
