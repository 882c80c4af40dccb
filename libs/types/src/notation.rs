//! Fractional 32nds price codec
//!
//! Treasury prices are quoted as `aaa-bbc`: integer dollars, two digits of
//! 32nds (zero-padded), and one digit of eighths of a 32nd where `+` denotes
//! 4/8. The smallest increment is therefore 1/256, and conversion is exact
//! for every price on that grid.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Parse failures for the 32nds notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("price notation missing '-' separator: {0}")]
    MissingSeparator(String),

    #[error("invalid integer dollars in price notation: {0}")]
    InvalidDollars(String),

    #[error("invalid 32nds field in price notation: {0}")]
    Invalid32nds(String),

    #[error("invalid 256ths digit in price notation: {0}")]
    Invalid256ths(String),
}

/// Parse a `aaa-bbc` quote into a decimal price.
pub fn parse_price(text: &str) -> Result<Decimal, NotationError> {
    let (dollars, frac) = text
        .split_once('-')
        .ok_or_else(|| NotationError::MissingSeparator(text.to_string()))?;

    let dollars: i64 = dollars
        .parse()
        .map_err(|_| NotationError::InvalidDollars(text.to_string()))?;

    let mut chars = frac.chars();
    let (d1, d2, d3) = match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), Some(c), None) => (a, b, c),
        _ => return Err(NotationError::Invalid32nds(text.to_string())),
    };

    let thirty_seconds = match (d1.to_digit(10), d2.to_digit(10)) {
        (Some(hi), Some(lo)) => hi * 10 + lo,
        _ => return Err(NotationError::Invalid32nds(text.to_string())),
    };
    if thirty_seconds >= 32 {
        return Err(NotationError::Invalid32nds(text.to_string()));
    }

    let eighths = match d3 {
        '+' => 4,
        c => c
            .to_digit(10)
            .filter(|&d| d < 8)
            .ok_or_else(|| NotationError::Invalid256ths(text.to_string()))?,
    };

    let in_256ths = i64::from(thirty_seconds * 8 + eighths);
    Ok(Decimal::from(dollars) + Decimal::from(in_256ths) / Decimal::from(256))
}

/// Format a decimal price on the 1/256 grid as a `aaa-bbc` quote.
pub fn format_price(price: Decimal) -> String {
    let dollars = price.trunc();
    let frac = price - dollars;
    // Exact on the grid; rounding only guards off-grid inputs.
    let in_256ths: i64 = (frac * Decimal::from(256)).round().to_i64().unwrap_or(0);

    let thirty_seconds = in_256ths / 8;
    let eighths = in_256ths % 8;

    let last = if eighths == 4 {
        "+".to_string()
    } else {
        eighths.to_string()
    };

    format!("{}-{:02}{}", dollars, thirty_seconds, last)
}
