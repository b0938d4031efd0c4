use std::cell::RefCell;
use std::sync::{
    PoisonError,
    RwLock
};

use chrono::NaiveDate;
use tracing::{
    debug,
    trace
};

use crate::time::calendar::recurrencerule::RecurrenceRule;
use crate::time::rangeofdates::RangeOfDates;

/// Occurrences materialized so far over one contiguous run of days.
///
/// The vector is strictly increasing and never shrinks. Every date in the
/// coverage range that matches the rule is present. Coverage starts at the
/// first queried window and grows outwards in either direction, so its size
/// follows the queries rather than the distance from the rule's anchor.
#[derive(Debug, Default)]
pub struct OccurrenceStore {
    occurrences: Vec<NaiveDate>,
    coverage: Option<RangeOfDates>,
    extensions: usize
}

impl OccurrenceStore {
    pub fn new() -> OccurrenceStore {
        OccurrenceStore::default()
    }

    #[inline]
    pub fn covers(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.coverage.is_some_and(|c| c.contain(first) && c.contain(last))
    }

    /// Widens coverage to include `[first, last]`, generating only the days
    /// not yet covered. `first` is clamped to the rule's anchor.
    pub fn extend_to(&mut self, rule: &RecurrenceRule, first: NaiveDate, last: NaiveDate) {
        let first = first.max(rule.anchor());
        if first > last || self.covers(first, last) {
            return;
        }

        let (from, through, head, tail) = match self.coverage {
            None => {
                let fresh: Vec<NaiveDate> = rule.occurrences(RangeOfDates::new(first, last)).collect();
                (first, last, fresh, Vec::new())
            },
            Some(covered) => {
                let from = first.min(covered.start_date());
                let through = last.max(covered.end_date());
                // Collect both sides before touching the store so a failed
                // walk leaves it intact.
                let head: Vec<NaiveDate> = covered.start_date()
                    .pred_opt()
                    .map_or_else(Vec::new, |end| rule.occurrences(RangeOfDates::new(from, end)).collect());
                let tail: Vec<NaiveDate> = covered.end_date()
                    .succ_opt()
                    .map_or_else(Vec::new, |start| rule.occurrences(RangeOfDates::new(start, through)).collect());
                (from, through, head, tail)
            }
        };

        debug!(
            from = %from,
            through = %through,
            added = head.len() + tail.len(),
            cached = self.occurrences.len() + head.len() + tail.len(),
            "extending trading day cache"
        );
        if !head.is_empty() {
            let mut merged = head;
            merged.append(&mut self.occurrences);
            self.occurrences = merged;
        }
        self.occurrences.extend(tail);
        self.coverage = Some(RangeOfDates::new(from, through));
        self.extensions += 1;
    }

    /// Cached occurrences in `[first, last]`.
    pub fn between(&self, first: NaiveDate, last: NaiveDate) -> &[NaiveDate] {
        if first > last {
            return &[];
        }
        let lo = self.occurrences.partition_point(|d| *d < first);
        let hi = self.occurrences.partition_point(|d| *d <= last);
        &self.occurrences[lo..hi]
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            occurrences: self.occurrences.len(),
            first: self.occurrences.first().copied(),
            last: self.occurrences.last().copied(),
            covered_from: self.coverage.map(|c| c.start_date()),
            covered_through: self.coverage.map(|c| c.end_date()),
            extensions: self.extensions
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub occurrences: usize,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub covered_from: Option<NaiveDate>,
    pub covered_through: Option<NaiveDate>,
    pub extensions: usize
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn or_dash(d: Option<NaiveDate>) -> String {
            d.map_or_else(|| "-".to_owned(), |d| d.to_string())
        }

        write!(
            f,
            "TradingCalendar cache:\n\
             - Occurrences: {} ({} .. {})\n\
             - Covered from: {}\n\
             - Covered through: {}\n\
             - Extensions: {}",
            self.occurrences,
            or_dash(self.first),
            or_dash(self.last),
            or_dash(self.covered_from),
            or_dash(self.covered_through),
            self.extensions
        )
    }
}

/// Owns an [`OccurrenceStore`] and decides how access to it is synchronized.
pub trait CacheBackend {
    /// Makes sure the store covers `[first, last]`, then hands it to `read`.
    fn with_coverage<R>(
        &self,
        rule: &RecurrenceRule,
        first: NaiveDate,
        last: NaiveDate,
        read: impl FnOnce(&OccurrenceStore) -> R,
    ) -> R;

    fn stats(&self) -> CacheStats;
}

// ── single-threaded: RefCell ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RefCellBackend {
    store: RefCell<OccurrenceStore>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for RefCellBackend {
    fn with_coverage<R>(
        &self,
        rule: &RecurrenceRule,
        first: NaiveDate,
        last: NaiveDate,
        read: impl FnOnce(&OccurrenceStore) -> R,
    ) -> R {
        let mut store = self.store.borrow_mut();
        if store.covers(first, last) {
            trace!(first = %first, last = %last, "trading day cache hit");
        } else {
            store.extend_to(rule, first, last);
        }
        read(&*store)
    }

    fn stats(&self) -> CacheStats {
        self.store.borrow().stats()
    }
}

// ── multi-threaded: RwLock ──────────────────────────────────────────────────
//
// Covered queries only take the read lock. Extension re-checks coverage under
// the write lock, so two callers racing past the read check extend once.
// A poisoned lock is recovered: extend_to mutates the store only after
// the new occurrences have been fully generated.

#[derive(Debug, Default)]
pub struct RwLockBackend {
    store: RwLock<OccurrenceStore>,
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for RwLockBackend {
    fn with_coverage<R>(
        &self,
        rule: &RecurrenceRule,
        first: NaiveDate,
        last: NaiveDate,
        read: impl FnOnce(&OccurrenceStore) -> R,
    ) -> R {
        {
            let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
            if store.covers(first, last) {
                trace!(first = %first, last = %last, "trading day cache hit");
                return read(&*store);
            }
        }

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.extend_to(rule, first, last);
        read(&*store)
    }

    fn stats(&self) -> CacheStats {
        self.store.read().unwrap_or_else(PoisonError::into_inner).stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule() -> RecurrenceRule {
        RecurrenceRule::new(
            Default::default(),
            crate::time::calendar::holidaytable::HolidayTable::nyse_2008(),
            ymd(2007, 12, 1)
        )
    }

    #[test]
    fn first_window_starts_coverage() {
        let mut store = OccurrenceStore::new();
        store.extend_to(&rule(), ymd(2008, 6, 2), ymd(2008, 6, 6));
        let stats = store.stats();
        assert_eq!(stats.occurrences, 5);
        assert_eq!(stats.covered_from, Some(ymd(2008, 6, 2)));
        assert_eq!(stats.covered_through, Some(ymd(2008, 6, 6)));
    }

    #[test]
    fn coverage_is_clamped_to_anchor() {
        let mut store = OccurrenceStore::new();
        store.extend_to(&rule(), ymd(2007, 1, 1), ymd(2007, 12, 7));
        assert_eq!(store.stats().covered_from, Some(ymd(2007, 12, 1)));
        assert_eq!(store.stats().first, Some(ymd(2007, 12, 3)));
    }

    #[test]
    fn extension_grows_both_ends_incrementally() {
        let rule = rule();
        let mut store = OccurrenceStore::new();
        store.extend_to(&rule, ymd(2008, 1, 2), ymd(2008, 1, 2));
        assert_eq!(store.stats().occurrences, 1);

        // 2008-01-03 and 01-04 on the right.
        store.extend_to(&rule, ymd(2008, 1, 2), ymd(2008, 1, 4));
        assert_eq!(store.stats().occurrences, 3);

        // 2007-12-28 and 12-31 on the left; 01-01 is a holiday.
        store.extend_to(&rule, ymd(2007, 12, 28), ymd(2008, 1, 3));
        assert_eq!(
            store.between(ymd(2007, 12, 1), ymd(2008, 1, 31)),
            &[ymd(2007, 12, 28), ymd(2007, 12, 31), ymd(2008, 1, 2), ymd(2008, 1, 3), ymd(2008, 1, 4)]
        );
        assert_eq!(store.stats().extensions, 3);

        store.extend_to(&rule, ymd(2008, 1, 1), ymd(2008, 1, 3));
        assert_eq!(store.stats().extensions, 3);
    }

    #[test]
    fn disjoint_earlier_window_fills_the_gap() {
        let rule = rule();
        let mut store = OccurrenceStore::new();
        store.extend_to(&rule, ymd(2008, 2, 1), ymd(2008, 2, 29));
        store.extend_to(&rule, ymd(2008, 1, 2), ymd(2008, 1, 4));
        assert_eq!(store.stats().covered_from, Some(ymd(2008, 1, 2)));
        let all = store.between(ymd(2008, 1, 1), ymd(2008, 2, 29));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all.len(), rule.occurrences(RangeOfDates::new(ymd(2008, 1, 1), ymd(2008, 2, 29))).count());
    }

    #[test]
    fn between_slices_inclusive_bounds() {
        let rule = rule();
        let mut store = OccurrenceStore::new();
        store.extend_to(&rule, ymd(2007, 12, 1), ymd(2008, 1, 31));
        assert_eq!(
            store.between(ymd(2007, 12, 31), ymd(2008, 1, 3)),
            &[ymd(2007, 12, 31), ymd(2008, 1, 2), ymd(2008, 1, 3)]
        );
        assert!(store.between(ymd(2008, 1, 5), ymd(2008, 1, 6)).is_empty());
        assert!(store.between(ymd(2008, 1, 3), ymd(2008, 1, 2)).is_empty());
    }

    #[test]
    fn backends_agree() {
        let rule = rule();
        let single = RefCellBackend::new();
        let shared = RwLockBackend::new();
        let (first, last) = (ymd(2008, 1, 1), ymd(2008, 3, 1));
        let a = single.with_coverage(&rule, first, last, |s| s.between(first, last).to_vec());
        let b = shared.with_coverage(&rule, first, last, |s| s.between(first, last).to_vec());
        assert_eq!(a, b);
        assert_eq!(single.stats(), shared.stats());
    }

    #[test]
    fn stats_display_lists_coverage() {
        let backend = RefCellBackend::new();
        assert!(backend.stats().to_string().contains("Covered through: -"));
        backend.with_coverage(&rule(), ymd(2008, 1, 2), ymd(2008, 1, 2), |_| ());
        let shown = backend.stats().to_string();
        assert!(shown.contains("Covered from: 2008-01-02"));
        assert!(shown.contains("Covered through: 2008-01-02"));
    }
}
