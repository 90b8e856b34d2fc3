//! Date parsing, formatting and arithmetic for task date ranges.
//!
//! Task dates are plain calendar dates (`YYYY-MM-DD`). Deadlines are compared
//! against the current local date-time by treating the end date as local midnight.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Display and entry format for task dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse human-readable date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "next monday", "this friday", bare weekday names
/// - "end of week"/"eow", "end of month"/"eom"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_date_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(tomorrow(today)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let weekday = today.weekday().num_days_from_monday() as i64;
            return Some(today + Duration::days(6 - weekday));
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        // Offsets outside chrono's date range are rejected like any other bad input.
        if let Some(n) = rest.strip_suffix('d') {
            let days = n.trim().parse::<i64>().ok()?;
            return today.checked_add_signed(Duration::try_days(days)?);
        }
        if let Some(n) = rest.strip_suffix('w') {
            let weeks = n.trim().parse::<i64>().ok()?;
            return today.checked_add_signed(Duration::try_weeks(weeks)?);
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let current = today.weekday().num_days_from_monday() as i64;
    for (name, target) in weekdays {
        let days_ahead = (target + 7 - current) % 7;
        if s == name || s == format!("this {name}") {
            return Some(today + Duration::days(days_ahead));
        }
        if s == format!("next {name}") {
            let days = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return Some(today + Duration::days(days));
        }
    }

    NaiveDate::parse_from_str(&s, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The calendar day after `date`.
pub fn tomorrow(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// True once local midnight of `end_date` has been reached.
pub fn deadline_passed(end_date: NaiveDate, now: NaiveDateTime) -> bool {
    end_date.and_time(NaiveTime::MIN) <= now
}

/// Format an end date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_and_keywords() {
        // 2024-05-15 is a Wednesday.
        let today = date(2024, 5, 15);
        assert_eq!(parse_date_input("2024-06-01", today), Some(date(2024, 6, 1)));
        assert_eq!(parse_date_input(" Today ", today), Some(today));
        assert_eq!(parse_date_input("tomorrow", today), Some(date(2024, 5, 16)));
        assert_eq!(parse_date_input("yesterday", today), Some(date(2024, 5, 14)));
        assert_eq!(parse_date_input("in 3d", today), Some(date(2024, 5, 18)));
        assert_eq!(parse_date_input("in 2w", today), Some(date(2024, 5, 29)));
        assert_eq!(parse_date_input("eow", today), Some(date(2024, 5, 19)));
        assert_eq!(parse_date_input("eom", today), Some(date(2024, 5, 31)));
        assert_eq!(parse_date_input("friday", today), Some(date(2024, 5, 17)));
        assert_eq!(parse_date_input("wed", today), Some(today));
        assert_eq!(parse_date_input("next wed", today), Some(date(2024, 5, 22)));
        assert_eq!(parse_date_input("next monday", today), Some(date(2024, 5, 27)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let today = date(2024, 5, 15);
        assert_eq!(parse_date_input("", today), None);
        assert_eq!(parse_date_input("soon", today), None);
        assert_eq!(parse_date_input("2024-02-30", today), None);
        assert_eq!(parse_date_input("15/05/2024", today), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range_offsets() {
        let today = date(2024, 5, 15);
        assert_eq!(parse_date_input("in 100000000d", today), None);
        assert_eq!(parse_date_input("in -100000000d", today), None);
        assert_eq!(parse_date_input("in 9223372036854775807w", today), None);
        assert_eq!(parse_date_input("in 9223372036854775807d", today), None);
        assert_eq!(parse_date_input("in 99999999999999999999d", today), None);
        assert_eq!(parse_date_input("in 52w", today), Some(date(2025, 5, 14)));
    }

    #[test]
    fn test_end_of_month_in_december() {
        assert_eq!(parse_date_input("eom", date(2024, 12, 3)), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_tomorrow_rollover() {
        assert_eq!(tomorrow(date(2024, 2, 28)), date(2024, 2, 29));
        assert_eq!(tomorrow(date(2023, 2, 28)), date(2023, 3, 1));
        assert_eq!(tomorrow(date(2024, 4, 30)), date(2024, 5, 1));
        assert_eq!(tomorrow(date(2024, 12, 31)), date(2025, 1, 1));
    }

    #[test]
    fn test_deadline_passed_at_local_midnight() {
        let end = date(2024, 3, 10);
        let before = date(2024, 3, 9).and_hms_opt(23, 59, 59).unwrap();
        let midnight = end.and_hms_opt(0, 0, 0).unwrap();
        assert!(!deadline_passed(end, before));
        assert!(deadline_passed(end, midnight));
        assert!(deadline_passed(end, midnight + Duration::hours(5)));
    }

    #[test]
    fn test_format_helpers() {
        let today = date(2024, 1, 10);
        assert_eq!(format_date(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(format_due_relative(today, today), "today");
        assert_eq!(format_due_relative(date(2024, 1, 11), today), "tomorrow");
        assert_eq!(format_due_relative(date(2024, 1, 14), today), "in 4d");
        assert_eq!(format_due_relative(date(2024, 1, 8), today), "2d late");
    }
}
