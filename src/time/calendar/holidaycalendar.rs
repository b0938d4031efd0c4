use chrono::{Days, NaiveDate};

const ONE_DAY: Days = Days::new(1);

/// Per-date view of a trading calendar.
///
/// Implementors only answer [`HolidayCalendar::is_holiday`]; stepping across
/// trading days is derived from it. Calendars that can be closed on every
/// weekday also report [`HolidayCalendar::has_trading_days`].
pub trait HolidayCalendar {
    fn is_holiday(&self, d: NaiveDate) -> bool;

    /// `false` when no date can ever be a trading day.
    fn has_trading_days(&self) -> bool {
        true
    }

    fn is_trading_day(&self, d: NaiveDate) -> bool {
        !self.is_holiday(d)
    }

    /// Moves `n` trading days forward (`n > 0`) or backward (`n < 0`).
    ///
    /// Returns `None` if the walk runs off chrono's date range or the
    /// calendar has no trading days at all.
    fn shift_n_trading_days(&self, horizon: NaiveDate, n: i32) -> Option<NaiveDate> {
        if n != 0 && !self.has_trading_days() {
            return None;
        }

        let shift_one_day = if n >= 0 {
            |d: NaiveDate| d.checked_add_days(ONE_DAY)
        } else {
            |d: NaiveDate| d.checked_sub_days(ONE_DAY)
        };

        let mut m = n.unsigned_abs();
        let mut d = horizon;
        while m > 0 {
            d = shift_one_day(d)?;
            m -= self.is_trading_day(d) as u32;
        }
        Some(d)
    }

    fn next_trading_day(&self, d: NaiveDate) -> Option<NaiveDate> {
        self.shift_n_trading_days(d, 1)
    }

    fn previous_trading_day(&self, d: NaiveDate) -> Option<NaiveDate> {
        self.shift_n_trading_days(d, -1)
    }
}
