use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// 1970-01-01, the calendar date of the UNIX epoch.
#[inline]
pub fn epoch_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

/// The instant at which `d` begins, tagged as UTC.
#[inline]
pub fn start_of_day_utc(d: NaiveDate) -> DateTime<Utc> {
    NaiveDateTime::new(d, NaiveTime::MIN).and_utc()
}
