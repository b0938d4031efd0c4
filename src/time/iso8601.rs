use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    Utc
};

use crate::time::datetimeerror::DateTimeError;
use crate::time::utility::start_of_day_utc;

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z"
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M"
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO-8601 date or date-time and tags the result as UTC.
///
/// Any offset present in the input is replaced, not applied: the wall-clock
/// fields are kept as written and the result is labelled UTC. A bare date
/// resolves to midnight.
pub fn parse_iso8601(date_string: &str) -> Result<DateTime<Utc>, DateTimeError> {
    if date_string.is_empty() {
        return Err(DateTimeError::parse(date_string, "empty input"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_string) {
        return Ok(dt.naive_local().and_utc());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(date_string, fmt) {
            return Ok(dt.naive_local().and_utc());
        }
    }

    let naive_part = date_string
        .strip_suffix('Z')
        .or_else(|| date_string.strip_suffix('z'))
        .unwrap_or(date_string);
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive_part, fmt) {
            return Ok(ndt.and_utc());
        }
    }

    NaiveDate::parse_from_str(date_string, DATE_FORMAT)
        .map(start_of_day_utc)
        .map_err(|error| DateTimeError::parse(date_string, error))
}
