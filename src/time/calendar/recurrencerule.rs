use chrono::{
    Datelike,
    NaiveDate
};

use crate::time::calendar::holidaytable::HolidayTable;
use crate::time::calendar::weekdayset::WeekdaySet;
use crate::time::rangeofdates::RangeOfDates;
use crate::time::utility::epoch_date;

/// Daily recurrence on a fixed weekday set, starting at `anchor` and
/// unbounded into the future, minus a table of excluded dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurrenceRule {
    weekdays: WeekdaySet,
    holidays: HolidayTable,
    anchor: NaiveDate
}

impl RecurrenceRule {
    pub fn new(weekdays: WeekdaySet, holidays: HolidayTable, anchor: NaiveDate) -> RecurrenceRule {
        RecurrenceRule { weekdays, holidays, anchor }
    }

    /// Every weekday from the UNIX epoch date, excluding the 2008 NYSE closures.
    pub fn nyse_2008() -> RecurrenceRule {
        RecurrenceRule::new(WeekdaySet::MON_TO_FRI, HolidayTable::nyse_2008(), epoch_date())
    }

    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Weekday and exclusion test, independent of the anchor.
    #[inline]
    pub fn is_open(&self, d: NaiveDate) -> bool {
        self.weekdays.contains(d.weekday()) && !self.holidays.contains(&d)
    }

    #[inline]
    pub fn matches(&self, d: NaiveDate) -> bool {
        d >= self.anchor && self.is_open(d)
    }

    /// Occurrences falling inside `range`, ascending.
    ///
    /// Candidates are produced one day at a time up to `range.end_date()`,
    /// never past it.
    pub fn occurrences(&self, range: RangeOfDates) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = range.start_date().max(self.anchor);
        RangeOfDates::new(start, range.end_date())
            .into_iter()
            .filter(move |d| self.is_open(*d))
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        RecurrenceRule::nyse_2008()
    }
}
