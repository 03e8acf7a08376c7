//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::i18n::Locale;

/// Parse a front-matter date string in the formats posts actually use
///
/// Values carrying an offset are normalized to UTC; values without one are
/// taken as written.
pub fn parse_post_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Format a post date as a long, localized date
///
/// # Examples
/// ```ignore
/// format_date("2024-01-01", Locale::En) // -> "January 1st, 2024"
/// format_date("2024-01-01", Locale::Zh) // -> "2024年1月1日"
/// ```
///
/// Unparseable input is returned unchanged.
pub fn format_date(date: &str, locale: Locale) -> String {
    let Some(dt) = parse_post_date(date) else {
        return date.to_string();
    };

    match locale {
        Locale::Zh => format!("{}年{}月{}日", dt.year(), dt.month(), dt.day()),
        Locale::En => format!(
            "{} {}, {}",
            dt.format("%B"),
            ordinal(dt.day()),
            dt.year()
        ),
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn short_date(date: &str) -> String {
    parse_post_date(date)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
