//! src/fs/pipeline.rs
//! ============================================================================
//! # Filter/Sort Pipeline: Pure Transforms over a Listing
//!
//! Stateless functions narrowing and ordering a `Vec<FileEntry>` given a
//! [`FilterState`]. Date buckets take the reference instant as a parameter so
//! boundary behavior is testable. Composition is conjunctive: type, date, and
//! search predicates all apply to the full unfiltered listing, then the
//! result is sorted (stable).

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::fs::file_entry::{FileEntry, FileKind};

/// Sort field for directory views; always ascending, ties keep enumeration
/// order (stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    Name,
    Kind,
    Created,
    Size,
}

/// Type-class filter; `All` is a pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(Vec<FileKind>),
}

impl TypeFilter {
    pub fn matches(&self, kind: FileKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Named creation-date bucket. `All` is not a pass-through but an explicit
/// 100-year lookback window ending at end-of-today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

fn day_start(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}

impl DateFilter {
    /// Inclusive `[start, end]` window of this bucket relative to `now`.
    /// Ends are `start-of-next-period - 1s`, mirroring day-granularity
    /// bookkeeping: the last second of a period belongs to it, anything at or
    /// past the next period's first instant does not.
    pub fn range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today: NaiveDate = now.date_naive();
        let today_start: DateTime<Utc> = day_start(today);
        let day: Duration = Duration::days(1);
        let sec: Duration = Duration::seconds(1);

        match self {
            DateFilter::Today => (today_start, today_start + day - sec),
            DateFilter::Yesterday => (today_start - day, today_start - sec),
            DateFilter::ThisWeek => {
                let week_start: DateTime<Utc> = day_start(today.week(Weekday::Mon).first_day());
                (week_start, week_start + Duration::days(7) - sec)
            }
            DateFilter::LastWeek => {
                let week_start: DateTime<Utc> = day_start(today.week(Weekday::Mon).first_day());
                (week_start - Duration::days(7), week_start - sec)
            }
            DateFilter::ThisMonth => {
                let first: NaiveDate = today.with_day(1).unwrap_or(today);
                let next: NaiveDate = first.checked_add_months(Months::new(1)).unwrap_or(first);
                (day_start(first), day_start(next) - sec)
            }
            DateFilter::LastMonth => {
                let first: NaiveDate = today.with_day(1).unwrap_or(today);
                let prev: NaiveDate = first.checked_sub_months(Months::new(1)).unwrap_or(first);
                (day_start(prev), day_start(first) - sec)
            }
            DateFilter::All => {
                let lookback: NaiveDate = today
                    .checked_sub_months(Months::new(1200))
                    .unwrap_or(today);
                (day_start(lookback), today_start + day - sec)
            }
        }
    }

    pub fn contains(&self, created: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.range(now);
        start <= created && created <= end
    }
}

/// Filter/sort configuration applied whenever the listing or a field changes.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub type_filter: TypeFilter,
    pub date_filter: DateFilter,
    pub query: String,
    pub sort: SortField,
}

impl FilterState {
    /// Conjunctive narrowing of `entries`, then a stable ascending sort.
    pub fn apply(&self, entries: &[FileEntry]) -> Vec<FileEntry> {
        self.apply_at(entries, Utc::now())
    }

    /// Same as [`FilterState::apply`] with an explicit reference instant for
    /// the date bucket.
    pub fn apply_at(&self, entries: &[FileEntry], now: DateTime<Utc>) -> Vec<FileEntry> {
        let mut out: Vec<FileEntry> = entries
            .iter()
            .filter(|e| self.type_filter.matches(e.kind))
            .filter(|e| self.date_filter.contains(e.created, now))
            .filter(|e| name_matches(e, &self.query))
            .cloned()
            .collect();
        sort_entries(&mut out, self.sort);
        out
    }
}

/// Case-insensitive substring search on the entry name; an empty query
/// matches everything.
pub fn name_matches(entry: &FileEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(&query.to_lowercase())
}

/// Stable ascending sort by `field`; ties keep original enumeration order.
pub fn sort_entries(entries: &mut [FileEntry], field: SortField) {
    match field {
        SortField::Name => entries.sort_by(|a, b| a.name.cmp(&b.name)),
        SortField::Kind => entries.sort_by_key(|e| e.kind.to_string()),
        SortField::Created => entries.sort_by_key(|e| e.created),
        SortField::Size => entries.sort_by_key(|e| e.size),
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //
