//! Date utilities: ordinal stripping and an explicit, locale-free format allowlist.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Default display format for day labels, e.g. `6/1/2024`.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)(?:st|nd|rd|th)\b").expect("ordinal pattern"));

/// Naive date-time layouts; the time part is discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts. Slash dates are month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
    "%a, %d %b %Y",
];

/// Remove ordinal suffixes from every number: "June 1st" becomes "June 1".
pub fn strip_ordinals(s: &str) -> String {
    ORDINAL_RE.replace_all(s, "$1").into_owned()
}

/// Parse a loosely formatted calendar date.
///
/// Offset-carrying timestamps (RFC 3339) are normalized to their UTC date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = strip_ordinals(raw.trim());
    let s = cleaned.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// ISO `YYYY-MM-DD` key; lexical order equals chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns true if `fmt` is a strftime pattern chrono can render.
pub fn is_valid_display_format(fmt: &str) -> bool {
    !fmt.is_empty() && !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

/// Format a date for display, falling back to [`DEFAULT_DISPLAY_FORMAT`]
/// when `fmt` is not a usable pattern.
pub fn display_date(date: NaiveDate, fmt: &str) -> String {
    let fmt = if is_valid_display_format(fmt) {
        fmt
    } else {
        DEFAULT_DISPLAY_FORMAT
    };
    date.format(fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strip_ordinals() {
        assert_eq!(strip_ordinals("June 1st, 2024"), "June 1, 2024");
        assert_eq!(strip_ordinals("2nd 3rd 4th 11th 22ND"), "2 3 4 11 22");
        assert_eq!(strip_ordinals("Thursday"), "Thursday");
        assert_eq!(strip_ordinals("June1st, 2024"), "June1, 2024");
        assert_eq!(strip_ordinals("the 1stone"), "the 1stone");
    }

    #[test]
    fn test_ordinal_date_matches_plain_date() {
        assert_eq!(parse_date("June 1st, 2024"), parse_date("June 1, 2024"));
        assert_eq!(parse_date("June 1st, 2024"), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_date("March 23rd 2024"), Some(ymd(2024, 3, 23)));
    }

    #[test]
    fn test_iso_and_slash_dates() {
        assert_eq!(parse_date("2024-01-02"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date(" 2024/01/02 "), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date("01/02/2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date("Jan 2, 2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_date("2 January 2024"), Some(ymd(2024, 1, 2)));
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(parse_date("2024-03-05 08:15:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T08:15:00Z"), Some(ymd(2024, 3, 5)));
        // 01:00 at +02:00 is still the previous day in UTC
        assert_eq!(parse_date("2024-03-05T01:00:00+02:00"), Some(ymd(2024, 3, 4)));
    }

    #[test]
    fn test_unparsable_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date("31/12/2024"), None);
    }

    #[test]
    fn test_date_key_and_display() {
        let d = ymd(2024, 6, 1);
        assert_eq!(date_key(d), "2024-06-01");
        assert_eq!(display_date(d, DEFAULT_DISPLAY_FORMAT), "6/1/2024");
        assert_eq!(display_date(d, "%d.%m.%Y"), "01.06.2024");
        assert_eq!(display_date(d, "%Q"), "6/1/2024");
    }
}
