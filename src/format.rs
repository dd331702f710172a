//! Display formatting for search hits.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::debug;

/// Placeholder shown when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description.";

/// Maximum description length, in characters, before truncation.
pub const DESCRIPTION_LIMIT: usize = 500;

const ELLIPSIS: &str = "...";

/// Formats an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_timestamp(iso: &str) -> String {
    format_timestamp_in(iso, &Local)
}

/// Formats an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS` in the given zone.
///
/// A date-time without an offset is taken as local time in `tz`; a bare date
/// is midnight UTC. Input that cannot be parsed is returned unchanged.
pub fn format_timestamp_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_iso(iso, tz) {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => {
            debug!("Unparseable timestamp {:?}", iso);
            iso.to_string()
        }
    }
}

fn parse_iso<Tz: TimeZone>(iso: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let iso = iso.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(iso) {
        return Some(parsed.with_timezone(tz));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return tz.from_local_datetime(&naive).earliest();
    }

    let midnight = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// Derives the short description shown on a result card.
pub fn summarize_description(raw: Option<&str>) -> String {
    match raw {
        None => NO_DESCRIPTION.to_string(),
        Some(text) if text.chars().count() > DESCRIPTION_LIMIT => {
            let mut short: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            short.push_str(ELLIPSIS);
            short
        }
        Some(text) => text.to_string(),
    }
}
