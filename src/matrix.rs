//! Month grid construction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{DAYS_PER_WEEK, MIN_DAY, PADDED_ROW_TRIGGER};
use crate::event::{CalendarEvent, EventIndex};
use crate::types::{Weekday, days_in_month, first_weekday_of_month};
use crate::CalendarDate;

/// Layout switches for [`build_month_matrix`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixOptions {
    /// Fill leading/trailing empty slots with days of the neighbouring months
    pub show_adjacent_days: bool,
    /// Pad five-row months with an empty sixth row
    pub should_maintain_consistent_row_count: bool,
}

impl MatrixOptions {
    pub const fn new() -> Self {
        Self {
            show_adjacent_days: false,
            should_maintain_consistent_row_count: false,
        }
    }

    pub const fn with_adjacent_days(mut self, show: bool) -> Self {
        self.show_adjacent_days = show;
        self
    }

    pub const fn with_consistent_row_count(mut self, maintain: bool) -> Self {
        self.should_maintain_consistent_row_count = maintain;
        self
    }
}

/// Per-cell flags consumed by day renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellMetadata {
    pub is_adjacent_month: bool,
    pub is_selected_day: bool,
    pub is_today: bool,
    pub is_sunday: bool,
    pub is_weekend: bool,
}

/// One populated grid slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell<T> {
    pub date: CalendarDate,
    pub metadata: CellMetadata,
    /// Shared with the [`EventIndex`] the grid was built from
    pub events: Vec<Arc<CalendarEvent<T>>>,
}

/// Seven slots, Sunday first. `None` is a slot with no day.
pub type WeekRow<T> = [Option<CalendarCell<T>>; DAYS_PER_WEEK];

/// A month laid out as rows of seven cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMatrix<T> {
    month: CalendarDate,
    rows: Vec<WeekRow<T>>,
}

impl<T> MonthlyMatrix<T> {
    /// The 1st of the month this grid shows
    pub const fn month(&self) -> CalendarDate {
        self.month
    }

    pub fn rows(&self) -> &[WeekRow<T>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All slots, row-major
    pub fn slots(&self) -> impl Iterator<Item = &Option<CalendarCell<T>>> {
        self.rows.iter().flatten()
    }

    /// Populated cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell<T>> {
        self.slots().flatten()
    }

    /// The cell showing `date`, adjacent-month cells included
    pub fn cell(&self, date: &CalendarDate) -> Option<&CalendarCell<T>> {
        self.cells().find(|cell| cell.date == *date)
    }
}

fn empty_row<T>() -> WeekRow<T> {
    std::array::from_fn(|_| None)
}

fn column_flags(column: usize) -> CellMetadata {
    let weekday = Weekday::from_column(column);
    CellMetadata {
        is_sunday: weekday == Weekday::Sunday,
        is_weekend: weekday.is_weekend(),
        ..CellMetadata::default()
    }
}

fn adjacent_cell<T>(
    date: CalendarDate,
    column: usize,
    index: &EventIndex<T>,
) -> CalendarCell<T> {
    CalendarCell {
        date,
        metadata: CellMetadata {
            is_adjacent_month: true,
            ..column_flags(column)
        },
        events: index.events_on(&date),
    }
}

/// Builds the grid for the month containing `viewing`.
///
/// Days run left to right from the weekday of the 1st, wrapping every seven
/// columns. Output depends only on the inputs.
#[tracing::instrument(level = "trace", skip(index), fields(events = index.len()))]
pub fn build_month_matrix<T>(
    viewing: CalendarDate,
    selected: CalendarDate,
    today: CalendarDate,
    index: &EventIndex<T>,
    options: MatrixOptions,
) -> MonthlyMatrix<T> {
    let month = viewing.shift_month(0);
    let (year, month_number) = (month.year(), month.month());
    let day_count = days_in_month(year, month_number);
    let first_column = first_weekday_of_month(year, month_number).column();

    let mut rows = Vec::with_capacity(6);
    let mut row = empty_row();
    for (offset, day) in (MIN_DAY..=day_count).enumerate() {
        let slot = first_column + offset;
        let column = slot % DAYS_PER_WEEK;
        let date = CalendarDate::from_parts(year, month_number, day);
        row[column] = Some(CalendarCell {
            date,
            metadata: CellMetadata {
                is_selected_day: date == selected,
                is_today: date == today,
                ..column_flags(column)
            },
            events: index.events_on(&date),
        });
        if column == DAYS_PER_WEEK - 1 || day == day_count {
            rows.push(std::mem::replace(&mut row, empty_row()));
        }
    }

    if options.show_adjacent_days {
        fill_previous_month(&mut rows, month, index);
        fill_next_month(&mut rows, month, index);
    }

    if options.should_maintain_consistent_row_count && rows.len() == PADDED_ROW_TRIGGER {
        rows.push(empty_row());
    }

    trace!(rows = rows.len(), "month matrix built");
    MonthlyMatrix { month, rows }
}

fn fill_previous_month<T>(
    rows: &mut [WeekRow<T>],
    month: CalendarDate,
    index: &EventIndex<T>,
) {
    let Some(first_row) = rows.first_mut() else {
        return;
    };
    let leading = first_row.iter().take_while(|slot| slot.is_none()).count();
    if leading == 0 {
        return;
    }
    // nothing precedes the first supported month
    let Some(previous) = month.checked_shift_month(-1) else {
        return;
    };
    let last_day = days_in_month(previous.year(), previous.month());
    // leading < 7 <= last_day, so the first backfilled day is at least 1
    let start = last_day - leading as u8 + 1;
    for (column, slot) in first_row.iter_mut().take(leading).enumerate() {
        let date = CalendarDate::from_parts(previous.year(), previous.month(), start + column as u8);
        *slot = Some(adjacent_cell(date, column, index));
    }
}

fn fill_next_month<T>(rows: &mut [WeekRow<T>], month: CalendarDate, index: &EventIndex<T>) {
    let Some(last_row) = rows.last_mut() else {
        return;
    };
    let Some(next) = month.checked_shift_month(1) else {
        return;
    };
    let mut day = MIN_DAY;
    for (column, slot) in last_row.iter_mut().enumerate() {
        if slot.is_none() {
            let date = CalendarDate::from_parts(next.year(), next.month(), day);
            *slot = Some(adjacent_cell(date, column, index));
            day += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatrixKey {
    selected: CalendarDate,
    today: CalendarDate,
    options: MatrixOptions,
}

/// Memoizes built matrices for one [`EventIndex`] version.
///
/// Holds at most one grid per month: a request with different selection,
/// today or options replaces that month's grid. Entries are dropped
/// wholesale when the index version moves, and [`retain_months`] evicts
/// months that scrolled out of view.
///
/// [`retain_months`]: MatrixCache::retain_months
#[derive(Debug)]
pub struct MatrixCache<T> {
    version: u64,
    entries: HashMap<CalendarDate, (MatrixKey, Arc<MonthlyMatrix<T>>)>,
}

impl<T> MatrixCache<T> {
    pub fn new() -> Self {
        Self {
            version: 0,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached grid or builds and stores it.
    pub fn get_or_build(
        &mut self,
        viewing: CalendarDate,
        selected: CalendarDate,
        today: CalendarDate,
        index: &EventIndex<T>,
        options: MatrixOptions,
    ) -> Arc<MonthlyMatrix<T>> {
        if self.version != index.version() {
            debug!(
                old = self.version,
                new = index.version(),
                dropped = self.entries.len(),
                "event index changed; clearing matrix cache"
            );
            self.entries.clear();
            self.version = index.version();
        }
        let month = viewing.shift_month(0);
        let key = MatrixKey {
            selected,
            today,
            options,
        };
        if let Some((_, hit)) = self.entries.get(&month).filter(|(cached, _)| *cached == key) {
            trace!(%month, "matrix cache hit");
            return Arc::clone(hit);
        }
        debug!(%month, "matrix cache miss");
        let matrix = Arc::new(build_month_matrix(viewing, selected, today, index, options));
        self.entries.insert(month, (key, Arc::clone(&matrix)));
        matrix
    }

    /// Drops grids for every month not in `months`. Days are ignored.
    pub fn retain_months(&mut self, months: &[CalendarDate]) {
        let before = self.entries.len();
        self.entries
            .retain(|month, _| months.iter().any(|keep| keep.is_same_month(month)));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            trace!(evicted, kept = self.entries.len(), "matrix cache pruned");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for MatrixCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
