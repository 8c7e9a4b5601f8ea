// File: ./src/temporal.rs
// Parsing helpers for the loosely formatted dates and times found in source records.
use crate::error::{AgendaError, AgendaResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a calendar date.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps (the date part is kept as
/// written, no timezone shift) and naive `YYYY-MM-DDTHH:MM[:SS]` values.
pub fn parse_date(input: &str) -> AgendaResult<NaiveDate> {
    let s = input.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(AgendaError::InvalidDate(input.to_string()))
}

/// Parse an "HH:MM" anchor. "H:MM" and "HH:MM:SS" are tolerated.
pub fn parse_time_of_day(input: &str) -> AgendaResult<NaiveTime> {
    let s = input.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| AgendaError::InvalidTime(input.to_string()))
}

/// Combine an anchor date with an "HH:MM" string into a wall-clock instant.
pub fn combine(date: NaiveDate, time_of_day: &str) -> AgendaResult<NaiveDateTime> {
    Ok(date.and_time(parse_time_of_day(time_of_day)?))
}

/// Returns the trimmed value, or None when the field is missing or blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(parse_date("2025-06-10").unwrap(), expected);
        assert_eq!(parse_date(" 2025-06-10 ").unwrap(), expected);
        assert_eq!(parse_date("2025-06-10T23:30:00+05:00").unwrap(), expected);
        assert_eq!(parse_date("2025-06-10T08:15").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("not-a-date"),
            Err(AgendaError::InvalidDate("not-a-date".to_string()))
        );
        assert!(parse_date("").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("7:30").unwrap(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day("18:45:10").unwrap(),
            NaiveTime::from_hms_opt(18, 45, 10).unwrap()
        );
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some(" 10:00 ".to_string())), Some("10:00"));
    }
}
