use chrono::{
    DateTime,
    NaiveDate,
    NaiveTime,
    Utc
};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::occurrencecache::{
    CacheBackend,
    CacheStats,
    RefCellBackend,
    RwLockBackend
};
use crate::time::calendar::recurrencerule::RecurrenceRule;
use crate::time::utility::start_of_day_utc;

/// Trading days are the occurrences of a [`RecurrenceRule`]: configured
/// weekdays from an anchor date onwards, minus a holiday table.
///
/// Range queries materialize occurrences into a cache owned by the calendar.
/// `C` decides whether that cache may be shared across threads.
#[derive(Debug)]
pub struct TradingCalendar<C: CacheBackend = RefCellBackend> {
    rule: RecurrenceRule,
    backend: C,
}

impl<C: CacheBackend> TradingCalendar<C> {
    fn new_with_backend(rule: RecurrenceRule, backend: C) -> Self {
        Self { rule, backend }
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    /// Trading days whose midnight (UTC) lies between `after` and `before`,
    /// ascending.
    ///
    /// The window is open at both ends unless `inclusive` is set. A reversed
    /// window, or one lying entirely before the rule's anchor, is empty.
    pub fn trading_days(&self, after: DateTime<Utc>, before: DateTime<Utc>, inclusive: bool) -> Vec<NaiveDate> {
        if after > before {
            return Vec::new();
        }

        let (Some(first), Some(last)) = (first_in_window(after, inclusive), last_in_window(before, inclusive)) else {
            return Vec::new();
        };
        let first = first.max(self.rule.anchor());
        if first > last {
            return Vec::new();
        }

        self.backend.with_coverage(&self.rule, first, last, |store| store.between(first, last).to_vec())
    }

    /// [`TradingCalendar::trading_days`] with each bound taken at midnight UTC.
    pub fn trading_days_between(&self, start: NaiveDate, end: NaiveDate, inclusive: bool) -> Vec<NaiveDate> {
        self.trading_days(start_of_day_utc(start), start_of_day_utc(end), inclusive)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.backend.stats()
    }
}

impl TradingCalendar<RefCellBackend> {
    pub fn new(rule: RecurrenceRule) -> Self {
        Self::new_with_backend(rule, RefCellBackend::new())
    }

    pub fn nyse_2008() -> Self {
        Self::new(RecurrenceRule::nyse_2008())
    }
}

impl TradingCalendar<RwLockBackend> {
    pub fn new_threadsafe(rule: RecurrenceRule) -> Self {
        Self::new_with_backend(rule, RwLockBackend::new())
    }
}

impl<C: CacheBackend> HolidayCalendar for TradingCalendar<C> {
    #[inline]
    fn is_holiday(&self, d: NaiveDate) -> bool {
        !self.rule.is_open(d)
    }

    #[inline]
    fn has_trading_days(&self) -> bool {
        !self.rule.weekdays().is_empty()
    }
}

pub type SingleThreadedTradingCalendar = TradingCalendar<RefCellBackend>;
pub type MultiThreadedTradingCalendar = TradingCalendar<RwLockBackend>;

/// Earliest date whose midnight falls inside the window opened at `after`.
fn first_in_window(after: DateTime<Utc>, inclusive: bool) -> Option<NaiveDate> {
    let d = after.date_naive();
    if inclusive && after.time() == NaiveTime::MIN {
        Some(d)
    } else {
        d.succ_opt()
    }
}

/// Latest date whose midnight falls inside the window closed at `before`.
fn last_in_window(before: DateTime<Utc>, inclusive: bool) -> Option<NaiveDate> {
    let d = before.date_naive();
    if inclusive || before.time() != NaiveTime::MIN {
        Some(d)
    } else {
        d.pred_opt()
    }
}
