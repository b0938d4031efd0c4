use chrono::NaiveDate;

/// Closed run of consecutive calendar days `[start_date, end_date]`.
///
/// A range whose start lies after its end is empty rather than reversed, so
/// that a walk bounded by a query's upper date always terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> RangeOfDates {
        RangeOfDates { start_date, end_date }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    pub fn contain(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    pub fn iter(&self) -> RangeOfDatesIterator {
        RangeOfDatesIterator {
            next: (!self.is_empty()).then_some(self.start_date),
            end_date: self.end_date
        }
    }
}

impl IntoIterator for RangeOfDates {
    type Item = NaiveDate;
    type IntoIter = RangeOfDatesIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RangeOfDatesIterator {
    next: Option<NaiveDate>,
    end_date: NaiveDate
}

impl Iterator for RangeOfDatesIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // succ_opt only fails at NaiveDate::MAX, which also ends the walk.
        self.next = current.succ_opt().filter(|d| *d <= self.end_date);
        Some(current)
    }
}
