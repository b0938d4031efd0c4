use chrono::Weekday;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer
};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun
];

/// Set of weekdays a recurrence matches, stored as a bitmask.
/// Bit 0 is Monday, bit 6 is Sunday.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Monday through Friday.
    pub const MON_TO_FRI: WeekdaySet = WeekdaySet(0b0001_1111);

    pub fn new<I: IntoIterator<Item = Weekday>>(weekdays: I) -> Self {
        let mut mask = 0u8;
        for weekday in weekdays {
            mask |= 1u8 << weekday.num_days_from_monday();
        }
        WeekdaySet(mask)
    }

    #[inline]
    pub fn contains(&self, weekday: Weekday) -> bool {
        let bit = 1u8 << weekday.num_days_from_monday();
        (self.0 & bit) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Members in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|w| self.contains(*w))
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        WeekdaySet::MON_TO_FRI
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        WeekdaySet::new(iter)
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let weekdays: Vec<Weekday> = Vec::deserialize(deserializer)?;
        Ok(WeekdaySet::new(weekdays))
    }
}
