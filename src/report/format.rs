//! Report Formatting Helpers
//!
//! Tag and timestamp rendering for the human report.

use chrono::{Datelike, Local, NaiveDate, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})\.(\d{2})(\d{2})(\d{2})$").expect("valid tag pattern")
});

/// Render a release tag, appending the calendar date when the tag follows
/// the `YYYYMMDD.HHMMSS` convention. Unrecognized tags pass through
/// verbatim.
pub fn format_tag(tag: &str) -> String {
    let Some(caps) = TAG_PATTERN.captures(tag) else {
        return tag.to_string();
    };

    // The pattern guarantees digits; range validity is up to NaiveDate.
    let year: i32 = caps[1].parse().unwrap_or_default();
    let month: u32 = caps[2].parse().unwrap_or_default();
    let day: u32 = caps[3].parse().unwrap_or_default();

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => format!(
            "{} ({} {} {} {})",
            tag,
            date.format("%a"),
            day,
            date.format("%b"),
            year
        ),
        None => tag.to_string(),
    }
}

/// Render a performance start time as local "Ddd D Mmm HH:MM".
pub fn format_time(time_ms: i64) -> String {
    match Local.timestamp_millis_opt(time_ms).single() {
        Some(dt) => format!(
            "{} {} {} {:02}:{:02}",
            dt.format("%a"),
            dt.day(),
            dt.format("%b"),
            dt.hour(),
            dt.minute()
        ),
        None => time_ms.to_string(),
    }
}

/// "1 performance" / "3 performances".
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag_appends_date() {
        assert_eq!(
            format_tag("20250801.063000"),
            "20250801.063000 (Fri 1 Aug 2025)"
        );
        assert_eq!(
            format_tag("20241225.120000"),
            "20241225.120000 (Wed 25 Dec 2024)"
        );
    }

    #[test]
    fn test_format_tag_passes_through_unrecognized() {
        assert_eq!(format_tag("latest"), "latest");
        assert_eq!(format_tag("2025-08-01"), "2025-08-01");
        // Matches the pattern but is not a real date.
        assert_eq!(format_tag("20250231.000000"), "20250231.000000");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "performance"), "0 performances");
        assert_eq!(plural(1, "performance"), "1 performance");
        assert_eq!(plural(2, "performance"), "2 performances");
    }
}
