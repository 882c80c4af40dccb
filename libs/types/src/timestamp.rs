//! Line timestamps and the millisecond clock
//!
//! Output lines are stamped `YYYY-MM-DD HH:MM:SS.mmm` in local time with the
//! milliseconds zero-padded to three digits. The GUI throttle reads a clock
//! expressed as epoch milliseconds; the trait indirection keeps it testable.

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a local datetime as a line timestamp.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Current local time as a line timestamp.
pub fn timestamp_now() -> String {
    format_timestamp(Local::now())
}

/// A source of epoch-millisecond readings.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format_pads_millis() {
        let at = Local.with_ymd_and_hms(2023, 1, 5, 9, 30, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_timestamp(at), "2023-01-05 09:30:07.042");
    }

    #[test]
    fn test_timestamp_format_shape() {
        let text = timestamp_now();
        // YYYY-MM-DD HH:MM:SS.mmm
        assert_eq!(text.len(), 23);
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
        assert_eq!(&text[19..20], ".");
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000); // sanity: after September 2020
    }
}
