// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for UTC day normalization.
//!
//! Every streak and summary computation works on whole UTC calendar days, so
//! timestamps are truncated here before they are compared.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::error::{AppError, Result};

/// Truncate a timestamp to its UTC calendar day.
pub fn utc_day(value: DateTime<Utc>) -> NaiveDate {
    value.date_naive()
}

/// First instant of a UTC day (00:00:00.000).
pub fn start_of_utc_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of a UTC day (23:59:59.999).
pub fn end_of_utc_day(day: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999 is always a valid wall-clock time
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(end).and_utc()
}

/// Shift a day by a signed number of days, saturating at the calendar bounds.
pub fn add_days(day: NaiveDate, amount: i64) -> NaiveDate {
    let magnitude = Days::new(amount.unsigned_abs());
    let shifted = if amount >= 0 {
        day.checked_add_days(magnitude)
    } else {
        day.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if amount >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Parse a caller-supplied reference day.
///
/// Accepts a plain `YYYY-MM-DD` date or any RFC3339 timestamp, which is
/// truncated to its UTC day.
pub fn parse_reference_day(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| utc_day(dt.with_timezone(&Utc)))
        .map_err(|_| {
            AppError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD or RFC3339 timestamp",
                raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SecondsFormat, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_utc_day_truncates_late_timestamps() {
        let late = Utc.with_ymd_and_hms(2024, 1, 6, 23, 59, 59).unwrap();
        assert_eq!(utc_day(late), day(2024, 1, 6));
    }

    #[test]
    fn test_day_bounds() {
        let start = start_of_utc_day(day(2024, 1, 6));
        let end = end_of_utc_day(day(2024, 1, 6));

        assert_eq!(
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            "2024-01-06T00:00:00Z"
        );
        assert_eq!(
            end.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2024-01-06T23:59:59.999Z"
        );
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(add_days(day(2024, 1, 1), -1), day(2023, 12, 31));
        assert_eq!(add_days(day(2024, 2, 28), 1), day(2024, 2, 29));
        assert_eq!(add_days(day(2024, 1, 6), 0), day(2024, 1, 6));
    }

    #[test]
    fn test_parse_reference_day_formats() {
        assert_eq!(parse_reference_day("2024-01-07").unwrap(), day(2024, 1, 7));
        assert_eq!(
            parse_reference_day("2024-01-07T18:30:00Z").unwrap(),
            day(2024, 1, 7)
        );
        // Offset timestamps land on their UTC day
        assert_eq!(
            parse_reference_day("2024-01-07T20:00:00-08:00").unwrap(),
            day(2024, 1, 8)
        );
    }

    #[test]
    fn test_parse_reference_day_rejects_garbage() {
        let err = parse_reference_day("next tuesday").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
