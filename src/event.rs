//! Year → month → day event index.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CalendarDate;

/// A caller-supplied event placed on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent<T> {
    /// Unique within one data set
    pub id: String,
    pub date: CalendarDate,
    pub data: T,
}

impl<T> CalendarEvent<T> {
    /// Creates an event from anything convertible to a [`CalendarDate`],
    /// e.g. a `(year, month, day)` tuple already validated elsewhere.
    pub fn new(id: impl Into<String>, date: impl Into<CalendarDate>, data: T) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            data,
        }
    }
}

/// Events of one day, keyed by id in insertion order
type DayBucket<T> = IndexMap<String, Arc<CalendarEvent<T>>>;
type MonthBuckets<T> = IndexMap<u8, DayBucket<T>>;
type YearBuckets<T> = IndexMap<u8, MonthBuckets<T>>;

/// Callback invoked with the flattened event list after a batch insert
type ChangeCallback<T> = Box<dyn FnMut(&[Arc<CalendarEvent<T>>])>;

/// Three-level event index: year → month → day → events.
///
/// Every level is a hash map that remembers insertion order, so lookups are
/// O(1) and month queries list days in the order they were first populated.
/// An id appears at most once per day; re-inserting it is a no-op.
pub struct EventIndex<T> {
    years: IndexMap<i32, YearBuckets<T>>,
    len: usize,
    version: u64,
    on_change: Option<ChangeCallback<T>>,
}

impl<T> EventIndex<T> {
    pub fn new() -> Self {
        Self {
            years: IndexMap::new(),
            len: 0,
            version: 0,
            on_change: None,
        }
    }

    /// Builds an index from a full event set.
    pub fn from_events(events: impl IntoIterator<Item = CalendarEvent<T>>) -> Self {
        let mut index = Self::new();
        index.insert(events);
        index
    }

    /// Registers a callback receiving the flattened event list after every
    /// batch insert or rebuild.
    pub fn set_on_change(&mut self, callback: impl FnMut(&[Arc<CalendarEvent<T>>]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Merges `events` into the index. Returns how many were new.
    pub fn insert(&mut self, events: impl IntoIterator<Item = CalendarEvent<T>>) -> usize {
        let mut added = 0;
        let mut seen = 0;
        for event in events {
            seen += 1;
            if self.insert_one(event) {
                added += 1;
            }
        }
        if added > 0 {
            self.version += 1;
        }
        debug!(seen, added, total = self.len, "event batch inserted");
        self.notify();
        added
    }

    /// Drops every event and rebuilds from `events`.
    pub fn replace_all(&mut self, events: impl IntoIterator<Item = CalendarEvent<T>>) -> usize {
        self.years.clear();
        self.len = 0;
        self.version += 1;
        self.insert(events)
    }

    fn insert_one(&mut self, event: CalendarEvent<T>) -> bool {
        let date = event.date;
        let bucket = self
            .years
            .entry(date.year())
            .or_default()
            .entry(date.month())
            .or_default()
            .entry(date.day())
            .or_default();
        if bucket.contains_key(&event.id) {
            return false;
        }
        bucket.insert(event.id.clone(), Arc::new(event));
        self.len += 1;
        true
    }

    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let all = self.all();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&all);
        }
    }

    /// Events on one day, in insertion order. Empty for unknown days.
    pub fn query_day(&self, year: i32, month: u8, day: u8) -> Vec<Arc<CalendarEvent<T>>> {
        self.day_bucket(year, month, day)
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Events of a whole month: each day's events in insertion order, days in
    /// the order they were first populated.
    pub fn query_month(&self, year: i32, month: u8) -> Vec<Arc<CalendarEvent<T>>> {
        self.month_buckets(year, month)
            .map(|days| days.values().flat_map(|bucket| bucket.values().cloned()).collect())
            .unwrap_or_default()
    }

    /// Day or month granularity query depending on whether `day` is given.
    pub fn query(&self, year: i32, month: u8, day: Option<u8>) -> Vec<Arc<CalendarEvent<T>>> {
        match day {
            Some(day) => self.query_day(year, month, day),
            None => self.query_month(year, month),
        }
    }

    /// Events on the day named by `date`.
    pub fn events_on(&self, date: &CalendarDate) -> Vec<Arc<CalendarEvent<T>>> {
        self.query_day(date.year(), date.month(), date.day())
    }

    /// Number of events in a month without collecting them.
    pub fn monthly_count(&self, year: i32, month: u8) -> usize {
        self.month_buckets(year, month)
            .map_or(0, |days| days.values().map(IndexMap::len).sum())
    }

    /// Every indexed event, flattened year by year in insertion order.
    pub fn all(&self) -> Vec<Arc<CalendarEvent<T>>> {
        self.years
            .values()
            .flat_map(IndexMap::values)
            .flat_map(IndexMap::values)
            .flat_map(|bucket| bucket.values().cloned())
            .collect()
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Changes whenever the indexed content changes; used as a memoization key.
    pub const fn version(&self) -> u64 {
        self.version
    }

    fn month_buckets(&self, year: i32, month: u8) -> Option<&MonthBuckets<T>> {
        self.years.get(&year)?.get(&month)
    }

    fn day_bucket(&self, year: i32, month: u8, day: u8) -> Option<&DayBucket<T>> {
        self.month_buckets(year, month)?.get(&day)
    }
}

impl<T> Default for EventIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventIndex")
            .field("len", &self.len)
            .field("version", &self.version)
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}
