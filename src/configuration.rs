use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{
    DateTime,
    NaiveDate,
    Utc
};
use serde::{
    Deserialize,
    Serialize
};
use tracing::info;

use crate::configurationerror::ConfigurationError;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidaytable::HolidayTable;
use crate::time::calendar::occurrencecache::CacheStats;
use crate::time::calendar::recurrencerule::RecurrenceRule;
use crate::time::calendar::tradingcalendar::{
    MultiThreadedTradingCalendar,
    SingleThreadedTradingCalendar,
    TradingCalendar
};
use crate::time::calendar::weekdayset::WeekdaySet;
use crate::time::utility::epoch_date;

/// JSON description of a trading calendar.
///
/// ```json
/// {
///     "weekdays": ["Mon", "Tue", "Wed", "Thu", "Fri"],
///     "holidays": { "new_years": "2008-01-01", "christmas": "2008-12-25" },
///     "anchor": "1970-01-01",
///     "thread_safe": false
/// }
/// ```
///
/// Missing fields fall back to the 2008 NYSE calendar anchored at the epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfiguration {
    weekdays: WeekdaySet,
    holidays: HolidayTable,
    anchor: NaiveDate,
    thread_safe: bool
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        CalendarConfiguration {
            weekdays: WeekdaySet::MON_TO_FRI,
            holidays: HolidayTable::nyse_2008(),
            anchor: epoch_date(),
            thread_safe: false
        }
    }
}

impl CalendarConfiguration {
    pub fn new(
        weekdays: WeekdaySet,
        holidays: HolidayTable,
        anchor: NaiveDate,
        thread_safe: bool
    ) -> Result<CalendarConfiguration, ConfigurationError> {
        CalendarConfiguration { weekdays, holidays, anchor, thread_safe }.validated()
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<CalendarConfiguration, ConfigurationError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let config: CalendarConfiguration = serde_json::from_reader(reader)?;
        info!(
            path = %file_path.as_ref().display(),
            weekdays = config.weekdays.len(),
            holidays = config.holidays.len(),
            "loaded calendar configuration"
        );
        config.validated()
    }

    pub fn from_json_str(json: &str) -> Result<CalendarConfiguration, ConfigurationError> {
        let config: CalendarConfiguration = serde_json::from_str(json)?;
        config.validated()
    }

    fn validated(self) -> Result<CalendarConfiguration, ConfigurationError> {
        if self.weekdays.is_empty() {
            return Err(ConfigurationError::NoTradingWeekdays);
        }
        Ok(self)
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

    pub fn thread_safe(&self) -> bool {
        self.thread_safe
    }

    pub fn rule(&self) -> RecurrenceRule {
        RecurrenceRule::new(self.weekdays, self.holidays.clone(), self.anchor)
    }

    pub fn build(&self) -> TradingCalendarHandle {
        if self.thread_safe {
            TradingCalendarHandle::MultiThreaded(TradingCalendar::new_threadsafe(self.rule()))
        } else {
            TradingCalendarHandle::SingleThreaded(TradingCalendar::new(self.rule()))
        }
    }
}

/// A configured calendar on whichever cache backend the configuration chose.
#[derive(Debug)]
pub enum TradingCalendarHandle {
    SingleThreaded(SingleThreadedTradingCalendar),
    MultiThreaded(MultiThreadedTradingCalendar)
}

impl TradingCalendarHandle {
    pub fn rule(&self) -> &RecurrenceRule {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.rule(),
            TradingCalendarHandle::MultiThreaded(c) => c.rule()
        }
    }

    pub fn trading_days(&self, after: DateTime<Utc>, before: DateTime<Utc>, inclusive: bool) -> Vec<NaiveDate> {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.trading_days(after, before, inclusive),
            TradingCalendarHandle::MultiThreaded(c) => c.trading_days(after, before, inclusive)
        }
    }

    pub fn trading_days_between(&self, start: NaiveDate, end: NaiveDate, inclusive: bool) -> Vec<NaiveDate> {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.trading_days_between(start, end, inclusive),
            TradingCalendarHandle::MultiThreaded(c) => c.trading_days_between(start, end, inclusive)
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.cache_stats(),
            TradingCalendarHandle::MultiThreaded(c) => c.cache_stats()
        }
    }
}

impl HolidayCalendar for TradingCalendarHandle {
    fn is_holiday(&self, d: NaiveDate) -> bool {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.is_holiday(d),
            TradingCalendarHandle::MultiThreaded(c) => c.is_holiday(d)
        }
    }

    fn has_trading_days(&self) -> bool {
        match self {
            TradingCalendarHandle::SingleThreaded(c) => c.has_trading_days(),
            TradingCalendarHandle::MultiThreaded(c) => c.has_trading_days()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_object_is_nyse_2008() {
        let config = CalendarConfiguration::from_json_str("{}").unwrap();
        assert_eq!(config, CalendarConfiguration::default());
        assert_eq!(config.rule(), RecurrenceRule::nyse_2008());
        assert!(matches!(config.build(), TradingCalendarHandle::SingleThreaded(_)));
    }

    #[test]
    fn custom_table_replaces_default() {
        let json = r#"{
            "weekdays": ["Mon", "Tue", "Wed", "Thu"],
            "holidays": { "closure": "2009-01-06" },
            "anchor": "2009-01-01",
            "thread_safe": true
        }"#;
        let config = CalendarConfiguration::from_json_str(json).unwrap();
        assert!(!config.weekdays().contains(Weekday::Fri));
        let calendar = config.build();
        assert!(matches!(calendar, TradingCalendarHandle::MultiThreaded(_)));
        assert_eq!(
            calendar.trading_days_between(ymd(2009, 1, 1), ymd(2009, 1, 8), true),
            vec![ymd(2009, 1, 1), ymd(2009, 1, 5), ymd(2009, 1, 7), ymd(2009, 1, 8)]
        );
        assert!(calendar.is_trading_day(ymd(2008, 1, 1)));
    }

    #[test]
    fn empty_weekday_set_is_rejected() {
        assert!(matches!(
            CalendarConfiguration::from_json_str(r#"{"weekdays": []}"#),
            Err(ConfigurationError::NoTradingWeekdays)
        ));
        assert!(matches!(
            CalendarConfiguration::new(WeekdaySet::EMPTY, HolidayTable::new(), ymd(2008, 1, 1), false),
            Err(ConfigurationError::NoTradingWeekdays)
        ));
    }

    #[test]
    fn constructed_configuration_builds_threadsafe_calendar() {
        let weekdays: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        let config = CalendarConfiguration::new(weekdays, HolidayTable::new(), ymd(2008, 1, 1), true).unwrap();
        let calendar = config.build();
        assert!(matches!(calendar, TradingCalendarHandle::MultiThreaded(_)));
        assert_eq!(calendar.next_trading_day(ymd(2008, 1, 2)), Some(ymd(2008, 1, 7)));
    }

    #[test]
    fn handle_steps_like_the_wrapped_calendar() {
        let rule = RecurrenceRule::new(WeekdaySet::EMPTY, HolidayTable::new(), ymd(2008, 1, 1));
        let handle = TradingCalendarHandle::SingleThreaded(TradingCalendar::new(rule.clone()));
        let inner = TradingCalendar::new(rule);
        assert!(!handle.has_trading_days());
        assert_eq!(handle.next_trading_day(ymd(2008, 1, 1)), None);
        assert_eq!(handle.previous_trading_day(ymd(2008, 1, 1)), inner.previous_trading_day(ymd(2008, 1, 1)));

        let nyse = CalendarConfiguration::default().build();
        let inner = TradingCalendar::nyse_2008();
        for n in [-3, -1, 0, 1, 5] {
            assert_eq!(
                nyse.shift_n_trading_days(ymd(2008, 1, 2), n),
                inner.shift_n_trading_days(ymd(2008, 1, 2), n)
            );
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            CalendarConfiguration::from_json_str(r#"{"holidays": {"x": "2008-02-30"}}"#),
            Err(ConfigurationError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            CalendarConfiguration::from_reader("/nonexistent/calendar.json"),
            Err(ConfigurationError::Io(_))
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let config = CalendarConfiguration::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CalendarConfiguration::from_json_str(&json).unwrap(), config);
    }
}
