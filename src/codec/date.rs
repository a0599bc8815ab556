//! Date literal parsing
//!
//! Accepts full instants with an offset, naive date-times (read as UTC) and
//! a few human spellings of a calendar day (midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
];

/// Parse a human date or date-time into a UTC instant, truncated to
/// milliseconds
pub(crate) fn parse_date(literal: &str) -> Option<DateTime<Utc>> {
    let literal = literal.trim();
    if literal.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(literal) {
        return Some(instant.with_timezone(&Utc).trunc_subsecs(3));
    }

    // "Z" suffix on an otherwise naive date-time
    let naive = literal.strip_suffix('Z').unwrap_or(literal);

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(literal, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().trunc_subsecs(3))
}
