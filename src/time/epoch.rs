use chrono::{
    DateTime,
    Days,
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    Utc
};

use crate::time::datetimeerror::DateTimeError;
use crate::time::iso8601::parse_iso8601;

pub const UNIX_EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A timestamp that may or may not carry the UTC tag required for epoch
/// conversion.
///
/// Only `DateTime<Utc>` yields a value; everything else is a
/// [`DateTimeError::TypeMismatch`]. Normalizing to UTC first removes the
/// daylight-saving ambiguity from the millisecond count.
pub trait EpochSource {
    fn as_utc(&self) -> Result<DateTime<Utc>, DateTimeError>;
}

impl EpochSource for DateTime<Utc> {
    fn as_utc(&self) -> Result<DateTime<Utc>, DateTimeError> {
        Ok(*self)
    }
}

impl EpochSource for DateTime<FixedOffset> {
    fn as_utc(&self) -> Result<DateTime<Utc>, DateTimeError> {
        Err(DateTimeError::TypeMismatch { found: "DateTime<FixedOffset>" })
    }
}

impl EpochSource for NaiveDateTime {
    fn as_utc(&self) -> Result<DateTime<Utc>, DateTimeError> {
        Err(DateTimeError::TypeMismatch { found: "NaiveDateTime" })
    }
}

impl EpochSource for NaiveDate {
    fn as_utc(&self) -> Result<DateTime<Utc>, DateTimeError> {
        Err(DateTimeError::TypeMismatch { found: "NaiveDate" })
    }
}

/// Milliseconds elapsed since 1970-01-01T00:00:00Z, truncating any
/// sub-millisecond part. Only meaningful for instants at or after the epoch.
pub fn to_epoch_millis<T: EpochSource + ?Sized>(utc_datetime: &T) -> Result<i64, DateTimeError> {
    let dt = utc_datetime.as_utc()?;
    Ok(dt.timestamp_millis())
}

pub fn from_epoch_millis(ms_since_epoch: i64) -> Result<DateTime<Utc>, DateTimeError> {
    DateTime::from_timestamp_millis(ms_since_epoch).ok_or(DateTimeError::OutOfRange {
        what: "epoch milliseconds",
        value: ms_since_epoch
    })
}

pub fn iso8601_to_epoch(date_string: &str) -> Result<i64, DateTimeError> {
    let dt = parse_iso8601(date_string)?;
    to_epoch_millis(&dt)
}

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

pub fn epoch_now() -> i64 {
    utc_now().timestamp_millis()
}

/// Whole days between the epoch and `ms_since_epoch`, floored.
pub fn days_since_epoch(ms_since_epoch: i64) -> i64 {
    ms_since_epoch.div_euclid(MILLIS_PER_DAY)
}

/// Epoch milliseconds at midnight UTC, `days_since_epoch` days after the epoch.
pub fn epoch_from_days(days_since_epoch: u64) -> Result<i64, DateTimeError> {
    let dt = UNIX_EPOCH
        .checked_add_days(Days::new(days_since_epoch))
        .ok_or(DateTimeError::OutOfRange {
            what: "days since epoch",
            value: i64::try_from(days_since_epoch).unwrap_or(i64::MAX)
        })?;
    to_epoch_millis(&dt)
}
