use chrono::{
    DateTime,
    NaiveDate,
    Utc
};

use crate::time::datetimeerror::DateTimeError;

/// Broken-down timestamp fields: year, month, day, hour, minute, second and
/// microsecond, as emitted by the legacy serialization of timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub micros: u32
}

impl DateTuple {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, micros: u32) -> DateTuple {
        DateTuple { year, month, day, hour, minute, second, micros }
    }

    fn invalid(&self) -> DateTimeError {
        DateTimeError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            micros: self.micros
        }
    }
}

impl From<(i32, u32, u32, u32, u32, u32, u32)> for DateTuple {
    fn from(t: (i32, u32, u32, u32, u32, u32, u32)) -> Self {
        DateTuple::new(t.0, t.1, t.2, t.3, t.4, t.5, t.6)
    }
}

pub fn tuple_to_date(date_tuple: DateTuple) -> Result<DateTime<Utc>, DateTimeError> {
    // Leap-second encoding (micros >= 1_000_000) is not a valid tuple value.
    if date_tuple.micros >= 1_000_000 {
        return Err(date_tuple.invalid());
    }
    NaiveDate::from_ymd_opt(date_tuple.year, date_tuple.month, date_tuple.day)
        .and_then(|d| d.and_hms_micro_opt(
            date_tuple.hour,
            date_tuple.minute,
            date_tuple.second,
            date_tuple.micros
        ))
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| date_tuple.invalid())
}
