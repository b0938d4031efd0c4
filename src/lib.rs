pub mod configuration;
pub mod configurationerror;

pub mod time {
    pub mod utility;
    pub mod datetimeerror;
    pub mod iso8601;
    pub mod epoch;
    pub mod quarter;
    pub mod datetuple;
    pub mod rangeofdates;

    pub mod calendar {
        pub mod weekdayset;
        pub mod holidaytable;
        pub mod recurrencerule;
        pub mod occurrencecache;
        pub mod holidaycalendar;
        pub mod tradingcalendar;
    }
}

pub use configuration::{CalendarConfiguration, TradingCalendarHandle};
pub use configurationerror::ConfigurationError;
pub use time::calendar::holidaycalendar::HolidayCalendar;
pub use time::calendar::holidaytable::HolidayTable;
pub use time::calendar::occurrencecache::CacheStats;
pub use time::calendar::recurrencerule::RecurrenceRule;
pub use time::calendar::tradingcalendar::{
    MultiThreadedTradingCalendar,
    SingleThreadedTradingCalendar,
    TradingCalendar
};
pub use time::calendar::weekdayset::WeekdaySet;
pub use time::datetimeerror::DateTimeError;
pub use time::datetuple::{tuple_to_date, DateTuple};
pub use time::epoch::{
    days_since_epoch,
    epoch_from_days,
    epoch_now,
    from_epoch_millis,
    iso8601_to_epoch,
    to_epoch_millis,
    utc_now,
    EpochSource
};
pub use time::iso8601::parse_iso8601;
pub use time::quarter::{quarter_bounds, quarter_of};
