//! Time utilities: RFC 3339 parsing/formatting and fractional-hour arithmetic.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Parse an RFC 3339 timestamp cell into UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Format a timestamp the way it is stored in the record store.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// End of a session started at `start` lasting `hours` (fractional allowed).
///
/// Operator-entered durations can be any parseable float, so the addition
/// saturates at the calendar bounds instead of overflowing: an absurdly large
/// duration reads as a session that never ends, never as a panic.
pub fn session_end(start: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    let millis = (hours * 3_600_000.0).round() as i64;
    start
        .checked_add_signed(Duration::milliseconds(millis))
        .unwrap_or(if millis >= 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}
