use std::collections::{
    BTreeMap,
    HashSet
};

use chrono::NaiveDate;
use serde::{
    Deserialize,
    Serialize
};

/// Named, date-only market closures.
///
/// The table is a flat list of specific dates. Entries do not recur: a
/// table built for one year says nothing about any other year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, NaiveDate>", into = "BTreeMap<String, NaiveDate>")]
pub struct HolidayTable {
    named: BTreeMap<String, NaiveDate>,
    dates: HashSet<NaiveDate>
}

impl HolidayTable {
    pub fn new() -> HolidayTable {
        HolidayTable::default()
    }

    /// NYSE closures for 2008.
    pub fn nyse_2008() -> HolidayTable {
        const NYSE_2008: [(&str, u32, u32); 9] = [
            ("new_years", 1, 1),
            ("mlk_day", 1, 21),
            ("presidents", 2, 18),
            ("good_friday", 3, 21),
            ("memorial_day", 5, 26),
            ("july_4th", 7, 4),
            ("labor_day", 9, 1),
            ("tgiving", 11, 27),
            ("christmas", 12, 25)
        ];

        NYSE_2008
            .iter()
            .filter_map(|&(name, month, day)| {
                NaiveDate::from_ymd_opt(2008, month, day).map(|d| (name.to_owned(), d))
            })
            .collect()
    }

    /// Adds or replaces the holiday called `name`.
    pub fn insert(&mut self, name: impl Into<String>, date: NaiveDate) -> Option<NaiveDate> {
        let previous = self.named.insert(name.into(), date);
        if let Some(old) = previous {
            if !self.named.values().any(|d| *d == old) {
                self.dates.remove(&old);
            }
        }
        self.dates.insert(date);
        previous
    }

    #[inline]
    pub fn contains(&self, d: &NaiveDate) -> bool {
        self.dates.contains(d)
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate)> + '_ {
        self.named.iter().map(|(name, d)| (name.as_str(), *d))
    }
}

impl<S: Into<String>> FromIterator<(S, NaiveDate)> for HolidayTable {
    fn from_iter<I: IntoIterator<Item = (S, NaiveDate)>>(iter: I) -> Self {
        let mut table = HolidayTable::new();
        for (name, d) in iter {
            table.insert(name, d);
        }
        table
    }
}

impl From<BTreeMap<String, NaiveDate>> for HolidayTable {
    fn from(named: BTreeMap<String, NaiveDate>) -> Self {
        let dates = named.values().copied().collect();
        HolidayTable { named, dates }
    }
}

impl From<HolidayTable> for BTreeMap<String, NaiveDate> {
    fn from(table: HolidayTable) -> Self {
        table.named
    }
}
