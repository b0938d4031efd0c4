use chrono::{
    DateTime,
    Datelike,
    Months,
    NaiveDate,
    NaiveTime,
    Utc
};

use crate::time::datetimeerror::DateTimeError;

const QUARTERS_PER_YEAR: i32 = 4;

const QUARTER_LENGTH: Months = Months::new(3);

const LAST_MINUTE: NaiveTime = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

/// Sortable quarter key: `year * 4 + q` with `q` in `1..=4`.
pub fn quarter_of<D: Datelike>(dt: &D) -> i32 {
    let quarters = dt.year() * QUARTERS_PER_YEAR;
    let month = dt.month();
    if month <= 3 {
        quarters + 1
    } else if month <= 6 {
        quarters + 2
    } else if month <= 9 {
        quarters + 3
    } else {
        quarters + 4
    }
}

/// Splits a quarter key into `(year, quarter_index)`.
///
/// `quarter_number / 4` overshoots by one year whenever the quarter is the
/// fourth: a remainder of 0 stands for Q4 of the preceding year.
pub fn split_quarter_number(quarter_number: i32) -> (i32, u32) {
    let year = quarter_number.div_euclid(QUARTERS_PER_YEAR);
    let quarter = quarter_number.rem_euclid(QUARTERS_PER_YEAR) as u32;
    if quarter == 0 {
        (year - 1, 4)
    } else {
        (year, quarter)
    }
}

/// First and last minute of the quarter identified by `quarter_number`.
///
/// The end bound is 23:59 on the last day of the quarter.
pub fn quarter_bounds(quarter_number: i32) -> Result<(DateTime<Utc>, DateTime<Utc>), DateTimeError> {
    let (year, quarter) = split_quarter_number(quarter_number);
    let start = date_or_error(year, 3 * (quarter - 1) + 1, 1)?;
    // Day before the next quarter starts.
    let end = start
        .checked_add_months(QUARTER_LENGTH)
        .and_then(|next| next.pred_opt())
        .ok_or(DateTimeError::OutOfRange { what: "quarter number", value: quarter_number as i64 })?;

    Ok((
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(LAST_MINUTE).and_utc()
    ))
}

fn date_or_error(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateTimeError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateTimeError::InvalidDate {
        year,
        month,
        day,
        hour: 0,
        minute: 0,
        second: 0,
        micros: 0
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quarter_key_matches_formula() {
        let cases = [
            (ymd(2008, 1, 1), 1),
            (ymd(2008, 2, 15), 1),
            (ymd(2008, 3, 31), 1),
            (ymd(2008, 4, 1), 2),
            (ymd(2008, 6, 30), 2),
            (ymd(2008, 7, 1), 3),
            (ymd(2008, 9, 30), 3),
            (ymd(2008, 10, 1), 4),
            (ymd(2008, 12, 31), 4)
        ];
        for (d, q) in cases {
            assert_eq!(quarter_of(&d), 2008 * 4 + q, "{d}");
        }
    }

    #[test]
    fn quarter_of_accepts_timestamps() {
        let dt = Utc.with_ymd_and_hms(2008, 2, 15, 12, 0, 0).unwrap();
        assert_eq!(quarter_of(&dt), 8033);
    }

    #[test]
    fn remainder_zero_is_fourth_quarter_of_previous_year() {
        assert_eq!(split_quarter_number(8036), (2008, 4));
        assert_eq!(split_quarter_number(8037), (2009, 1));
        assert_eq!(split_quarter_number(8035), (2008, 3));

        let (start, end) = quarter_bounds(8036).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2008, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2008, 12, 31, 23, 59, 0).unwrap());
    }

    #[test]
    fn first_quarter_bounds() {
        let (start, end) = quarter_bounds(8033).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2008, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2008, 3, 31, 23, 59, 0).unwrap());
    }

    #[test]
    fn leap_february_ends_first_quarter_correctly() {
        let (_, end) = quarter_bounds(2008 * 4 + 1).unwrap();
        assert_eq!(end.day(), 31);
        let (start, end) = quarter_bounds(2009 * 4 + 2).unwrap();
        assert_eq!((start.month(), end.month(), end.day()), (4, 6, 30));
    }

    #[test]
    fn bounds_contain_every_day_of_their_quarter() {
        let mut d = ymd(2007, 11, 1);
        while d <= ymd(2009, 2, 1) {
            let (start, end) = quarter_bounds(quarter_of(&d)).unwrap();
            assert!(start.date_naive() <= d && d <= end.date_naive(), "{d}");
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn quarter_ends_follow_month_lengths() {
        let ends: Vec<(u32, u32)> = (1..=4)
            .map(|q| quarter_bounds(2007 * 4 + q).unwrap().1)
            .map(|end| (end.month(), end.day()))
            .collect();
        assert_eq!(ends, vec![(3, 31), (6, 30), (9, 30), (12, 31)]);
    }

    #[test]
    fn non_positive_quarter_numbers_floor() {
        assert_eq!(split_quarter_number(0), (-1, 4));
        assert_eq!(split_quarter_number(-1), (-1, 3));
    }
}
