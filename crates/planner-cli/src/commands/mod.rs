//! Command groups and the helpers they share.

pub mod backlog;
pub mod config;
pub mod plan;

use chrono::{DateTime, NaiveDateTime, Utc};
use planner_core::{Config, PlannerData, PlannerStore, TimelineItem};

/// Naive formats accepted for `<when>` arguments, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a `<when>` argument: RFC 3339, a naive UTC date-time or `now`.
pub fn parse_when(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!("invalid time '{value}': expected RFC 3339, YYYY-MM-DDTHH:MM or 'now'")
        })
}

/// Open the configured store and load its document.
pub fn open_store() -> Result<(Config, PlannerStore, PlannerData), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = PlannerStore::open(&config)?;
    let data = store.load();
    Ok((config, store, data))
}

/// Print one agenda line with its details indented below it.
pub fn print_item(item: &TimelineItem) {
    println!("{}  {}", item.time_slot, item.head);
    println!("    {}", item.title);
    if let Some(subtitle) = &item.subtitle {
        println!("    {subtitle}");
    }
    if let Some(extra) = &item.extra {
        println!("    {extra}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_when_accepts_rfc3339() {
        let parsed = parse_when("2024-05-06T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap());
    }

    #[test]
    fn parse_when_accepts_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 6, 8, 30, 0).unwrap();
        assert_eq!(parse_when("2024-05-06T08:30").unwrap(), expected);
        assert_eq!(parse_when("2024-05-06 08:30").unwrap(), expected);
        assert_eq!(parse_when("2024-05-06 08:30:00").unwrap(), expected);
    }

    #[test]
    fn parse_when_accepts_now() {
        let before = Utc::now();
        let parsed = parse_when("now").unwrap();
        assert!(parsed >= before);
    }

    #[test]
    fn parse_when_rejects_garbage() {
        let err = parse_when("tomorrow").unwrap_err();
        assert!(err.contains("tomorrow"));
    }
}
