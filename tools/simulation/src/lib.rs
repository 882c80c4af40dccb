//! Synthetic input generation
//!
//! Produces the four input files the platform consumes, for every bond in
//! the catalog. Generation is seeded, so a given configuration always
//! produces the same bytes and tests stay reproducible.
//!
//! Prices follow the classic sawtooth: a central price walks the 1/256 grid
//! from 99 up to 101 and back, while the quoted bid/ask sit one increment
//! either side, each independently widened by a further increment on a coin
//! flip.

use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use types::notation::format_price;
use types::product::all_bonds;

const INCREMENT: Decimal = dec!(0.00390625); // 1/256

/// How much synthetic data to produce per bond.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub prices_per_bond: usize,
    pub books_per_bond: usize,
    pub book_depth: usize,
    pub trades_per_bond: usize,
    pub inquiries_per_bond: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prices_per_bond: 1_000,
            books_per_bond: 50,
            book_depth: 10,
            trades_per_bond: 10,
            inquiries_per_bond: 10,
            seed: 20221130,
        }
    }
}

/// Generate all four input files into `directory`.
pub fn generate_all(directory: &Path, config: &GeneratorConfig) -> Result<()> {
    generate_prices(&directory.join("prices.txt"), config)?;
    generate_market_data(&directory.join("marketdata.txt"), config)?;
    generate_trades(&directory.join("trades.txt"), config)?;
    generate_inquiries(&directory.join("inquiries.txt"), config)?;
    Ok(())
}

/// `productId,bidPrice,askPrice` rows.
pub fn generate_prices(path: &Path, config: &GeneratorConfig) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let lower = dec!(99) + INCREMENT * dec!(2);
    let upper = dec!(101) - INCREMENT * dec!(2);

    for bond in all_bonds() {
        let mut central = lower;
        let mut going_up = true;

        for _ in 0..config.prices_per_bond {
            let mut bid = central - INCREMENT;
            let mut ask = central + INCREMENT;
            if rng.gen_bool(0.5) {
                bid -= INCREMENT;
            }
            if rng.gen_bool(0.5) {
                ask += INCREMENT;
            }

            writeln!(
                out,
                "{},{},{}",
                bond.product_id,
                format_price(bid),
                format_price(ask)
            )?;

            if going_up {
                central += INCREMENT;
                if central == upper {
                    going_up = false;
                }
            } else {
                central -= INCREMENT;
                if central == lower {
                    going_up = true;
                }
            }
        }
    }
    out.flush()
}

/// `productId,price,quantity,side` rows in batches of `2 * book_depth`.
pub fn generate_market_data(path: &Path, config: &GeneratorConfig) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    for bond in all_bonds() {
        let mut mid = dec!(100);
        let mut going_up = true;

        for book in 0..config.books_per_bond {
            // Top-of-book half-spread cycles 1/256..4/256, so the full
            // spread cycles 1/128..1/32 and every fourth book is crossable.
            let half_spread = INCREMENT * Decimal::from(book as i64 % 4 + 1);

            for level in 0..config.book_depth {
                let offset = half_spread + INCREMENT * Decimal::from(level as i64);
                let quantity = (level + 1) as i64 * 1_000_000;
                writeln!(
                    out,
                    "{},{},{},BID",
                    bond.product_id,
                    format_price(mid - offset),
                    quantity
                )?;
                writeln!(
                    out,
                    "{},{},{},OFFER",
                    bond.product_id,
                    format_price(mid + offset),
                    quantity
                )?;
            }

            if going_up {
                mid += INCREMENT;
                if mid >= dec!(100.5) {
                    going_up = false;
                }
            } else {
                mid -= INCREMENT;
                if mid <= dec!(99.5) {
                    going_up = true;
                }
            }
        }
    }
    out.flush()
}

/// `productId,tradeId,price,book,quantity,side` rows.
pub fn generate_trades(path: &Path, config: &GeneratorConfig) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let books = ["TRSY1", "TRSY2", "TRSY3"];
    let mut sequence = 0usize;

    for bond in all_bonds() {
        for trade in 0..config.trades_per_bond {
            sequence += 1;
            let side = if trade % 2 == 0 { "BUY" } else { "SELL" };
            let price = if trade % 2 == 0 { dec!(99.5) } else { dec!(100.5) };
            let quantity = (trade % 5 + 1) * 1_000_000;
            writeln!(
                out,
                "{},T{:05},{},{},{},{}",
                bond.product_id,
                sequence,
                format_price(price),
                books[trade % 3],
                quantity,
                side
            )?;
        }
    }
    out.flush()
}

/// `inquiryId,productId,side,quantity,price,state` rows, all RECEIVED.
pub fn generate_inquiries(path: &Path, config: &GeneratorConfig) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut sequence = 0usize;

    for bond in all_bonds() {
        for inquiry in 0..config.inquiries_per_bond {
            sequence += 1;
            let side = if inquiry % 2 == 0 { "BUY" } else { "SELL" };
            let quantity = (inquiry % 5 + 1) * 1_000_000;
            writeln!(
                out,
                "INQ{:05},{},{},{},{},RECEIVED",
                sequence,
                bond.product_id,
                side,
                quantity,
                format_price(dec!(100)),
            )?;
        }
    }
    out.flush()
}
