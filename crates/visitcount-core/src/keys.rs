//! Persisted key layout.
//!
//! ```text
//! total                  -> decimal counter
//! v:{YYYY-MM-DD}:{ip}    -> "1" (expires after VISITOR_TTL_SECS)
//! ```

use chrono::NaiveDate;

/// Key holding the cumulative counter.
pub const COUNTER_KEY: &str = "total";

/// Value stored under a visitor-day marker.
pub const VISITOR_MARK: &str = "1";

/// Marker lifetime: 27h, deliberately longer than a calendar day.
pub const VISITOR_TTL_SECS: u64 = 60 * 60 * 27;

/// `YYYY-MM-DD` rendering of a UTC date.
pub fn day_stamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Marker key for one visitor on one day.
pub fn visitor_key(date: NaiveDate, ip: &str) -> String {
    format!("v:{}:{ip}", day_stamp(date))
}
