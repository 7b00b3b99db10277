//! Date validation and calendar helpers
//!
//! Catalog dates are free text. [`format_date`] is the gate every date
//! field goes through before it reaches a formatted record.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{MetadataError, Result};

/// Naive datetime layouts accepted after RFC 3339 fails. Treated as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, midnight UTC.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a catalog date.
///
/// Fails when the value is absent, blank, or not a real calendar date
/// (`2016-02-30` is rejected, not rolled over).
pub fn format_date(input: Option<&str>) -> Result<DateTime<Utc>> {
    let raw = input.map(str::trim).filter(|s| !s.is_empty()).ok_or(MetadataError::MissingDate)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(midnight(date));
        }
    }

    // "2016-08" means the first of the month
    if raw.len() == 7 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
            return Ok(midnight(date));
        }
    }

    // "2016" means January 1st
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(date) = raw.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)) {
            return Ok(midnight(date));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(MetadataError::InvalidDate(raw.to_string()))
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
pub fn to_iso_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// True iff the day after `date` falls in another month.
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    match date.succ_opt() {
        Some(next) => next.month() != date.month(),
        // NaiveDate::MAX is Dec 31
        None => true,
    }
}

/// [`is_last_day_of_month`] for the current UTC date.
pub fn is_last_day_of_month_today() -> bool {
    is_last_day_of_month(Utc::now().date_naive())
}
