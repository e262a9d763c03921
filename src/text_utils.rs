use std::ops::Index;

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_PREFIX: Regex = Regex::new(r#"^(\d{4})-(\d{1,2})-(\d{1,2})"#).unwrap();
}

/// Calendar day of a display date such as "2024-01-20" or
/// "2024-01-20T09:30:00Z". RFC 3339 values are taken in UTC.
pub fn parse_day(buf: &str) -> Option<NaiveDate> {
    let buf = buf.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.with_timezone(&Utc).date_naive());
    }

    let caps = DATE_PREFIX.captures(buf)?;
    let y: i32 = caps.index(1).parse().ok()?;
    let m: u32 = caps.index(2).parse().ok()?;
    let d: u32 = caps.index(3).parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Trims `text` to at most `max_chars` characters, ending on a word when possible.
pub fn summarize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end())
}
