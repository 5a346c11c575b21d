use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

pub const WORDS_PER_MINUTE: f64 = 200.0;
pub const INVALID_DATE: &str = "Invalid Date";

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the `date` field of a post.
///
/// RFC 3339 timestamps are converted to UTC. Otherwise a date, optionally
/// followed by a time separated by a space or a `T`, is accepted. A date
/// without a time means midnight.
pub fn parse_post_date(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.\d+)?)?$"
        ).unwrap();
    }

    let buf = buf.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.naive_utc());
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);
    let opt_u32 = |idx: usize| caps.get(idx).map_or(Ok(0), |m| to_u32(m.as_str()));

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let h: u32 = opt_u32(4)?;
    let mn: u32 = opt_u32(5)?;
    let s: u32 = opt_u32(6)?;

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Invalid date {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or_else(|| format!("Invalid time {}", buf))?;

    Ok(NaiveDateTime::new(date, time))
}

/// `January 15, 2025`
pub fn format_long_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%B %-d, %Y").to_string()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `"<n> min read"`, rounding the minutes up.
pub fn reading_time(text: &str) -> String {
    let minutes = word_count(text) as f64 / WORDS_PER_MINUTE;
    format!("{} min read", minutes.ceil() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_date() {
        let date_time = parse_post_date("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(date_time.to_string(), "2017-09-10 10:42:32");

        let date_time = parse_post_date("2017-09-10T10:42").unwrap();
        assert_eq!(date_time.to_string(), "2017-09-10 10:42:00");

        let date_time = parse_post_date("2025-01-15").unwrap();
        assert_eq!(date_time.to_string(), "2025-01-15 00:00:00");

        let date_time = parse_post_date("2025-01-15T10:00:00+02:00").unwrap();
        assert_eq!(date_time.to_string(), "2025-01-15 08:00:00");
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_post_date("").is_err());
        assert!(parse_post_date("yesterday").is_err());
        assert!(parse_post_date("2025-02-30").is_err());
        assert!(parse_post_date("2025-01-15 25:00:00").is_err());
    }

    #[test]
    fn test_format_long_date() {
        let date_time = parse_post_date("2025-01-05").unwrap();
        assert_eq!(format_long_date(&date_time), "January 5, 2025");
        let date_time = parse_post_date("2024-11-20 18:30:00").unwrap();
        assert_eq!(format_long_date(&date_time), "November 20, 2024");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), "0 min read");
        assert_eq!(reading_time("one two three"), "1 min read");

        let words = vec!["word"; 200].join(" ");
        assert_eq!(reading_time(&words), "1 min read");

        let words = vec!["word"; 201].join("\n");
        assert_eq!(reading_time(&words), "2 min read");
    }
}
