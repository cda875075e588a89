//! Expiry Policy Module
//!
//! Turns request expiry information into the concrete timestamp written
//! into every entry. Two modes exist: interval (milliseconds from now) and
//! absolute (`YYYY/MM/DD HH:MM:SS` supplied by the caller).

use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExpireMode;
use crate::error::{CacheError, Result};

// == Constants ==
/// Fallback interval when a request names no period: one day in ms.
pub const DEFAULT_PERIOD_MS: u64 = 24 * 60 * 60 * 1000;

/// chrono format string matching the recognized timestamp shape.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Shape check for stored and caller-supplied timestamps.
///
/// Years 1900-2099, months 01-12, days 01-31, hours 00-23. The pattern is
/// a cheap gate; real calendar validation happens at parse time.
static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:19|20)[0-9][0-9]/(?:0[1-9]|1[0-2])/(?:[0-2][1-9]|[1-3][01]) (?:[0-2][0-3]|[0-1][0-9]):[0-5][0-9]:[0-5][0-9]$",
    )
    .expect("timestamp pattern compiles")
});

// == Formatting ==
/// Renders a timestamp in the recognized `YYYY/MM/DD HH:MM:SS` shape.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a recognized-shape timestamp.
///
/// # Returns
/// The parsed time, or an invalid-format error when the text does not
/// name a real calendar date.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| CacheError::InvalidFormat(raw.to_string()))
}

/// Checks whether text matches the recognized timestamp shape.
pub fn is_format_valid(raw: &str) -> bool {
    TIMESTAMP_PATTERN.is_match(raw)
}

// == Resolved Expiry ==
/// Expiry data ready to be written into an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExpiry {
    /// Absolute expiry timestamp in the recognized shape
    pub expire_date: String,
    /// The interval that produced it, in ms (0 in absolute mode)
    pub period: u64,
}

// == Resolution ==
/// Resolves request expiry information against the current time.
///
/// Interval mode ignores `absolute` and turns `period` (or the one-day
/// default) into a timestamp. Absolute mode validates `absolute` and
/// rejects timestamps at or before `now`.
///
/// # Arguments
/// * `mode` - Which request field carries the expiry
/// * `period` - Interval in ms; zero or absent means the default
/// * `absolute` - Caller-supplied `YYYY/MM/DD HH:MM:SS` timestamp
/// * `now` - The current local time
///
/// # Returns
/// The timestamp and period to write, or the reason the request's expiry
/// cannot be honored.
pub fn resolve_expiry(
    mode: ExpireMode,
    period: Option<u64>,
    absolute: Option<&str>,
    now: NaiveDateTime,
) -> Result<ResolvedExpiry> {
    match mode {
        ExpireMode::Interval => {
            let period = period.filter(|&ms| ms > 0).unwrap_or(DEFAULT_PERIOD_MS);

            // Saturate rather than wrap on absurd intervals; the shape check
            // below rejects anything past year 2099 anyway
            let ms = i64::try_from(period).unwrap_or(i64::MAX);
            let expire_at = now
                .checked_add_signed(Duration::milliseconds(ms))
                .unwrap_or(NaiveDateTime::MAX);

            let expire_date = format_timestamp(expire_at);
            if !is_format_valid(&expire_date) {
                return Err(CacheError::InvalidFormat(expire_date));
            }

            Ok(ResolvedExpiry {
                expire_date,
                period,
            })
        }
        ExpireMode::AbsoluteTimestamp => {
            let raw = absolute.unwrap_or("");
            if !is_format_valid(raw) {
                return Err(CacheError::InvalidFormat(raw.to_string()));
            }

            // Pattern-valid text can still name an impossible date
            let expire_at = parse_timestamp(raw)?;
            if expire_at <= now {
                return Err(CacheError::ExpiredOnArrival(raw.to_string()));
            }

            Ok(ResolvedExpiry {
                expire_date: raw.to_string(),
                period: period.unwrap_or(0),
            })
        }
    }
}
