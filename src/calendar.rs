//! Calendar facade: owns the event index, selection and navigator, and hands
//! out memoized month grids for the buffered window.

use std::sync::Arc;

use tracing::debug;

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::event::{CalendarEvent, EventIndex};
use crate::labels::CalendarLabels;
use crate::matrix::{MatrixCache, MatrixOptions, MonthlyMatrix};
use crate::navigation::{Animator, NavigationController, NavigationEvent};
use crate::CalendarDate;

/// Month calendar state shared by the navigator, grids and event lookups.
#[derive(Debug)]
pub struct Calendar<T, A> {
    index: EventIndex<T>,
    navigator: NavigationController<A>,
    selected: CalendarDate,
    today: CalendarDate,
    options: MatrixOptions,
    labels: CalendarLabels,
    cache: MatrixCache<T>,
}

impl<T, A: Animator> Calendar<T, A> {
    /// Creates a calendar showing and selecting `initial`, with today taken
    /// from the local clock.
    ///
    /// # Errors
    /// Returns the [`CalendarConfig::validate`] error for an invalid config.
    pub fn new(
        initial: CalendarDate,
        config: CalendarConfig,
        animator: A,
    ) -> Result<Self, CalendarError> {
        config.validate()?;
        let CalendarConfig {
            swipe,
            matrix,
            labels,
        } = config;
        Ok(Self {
            index: EventIndex::new(),
            navigator: NavigationController::new(initial, swipe, animator)?,
            selected: initial,
            today: CalendarDate::today(),
            options: matrix,
            labels,
            cache: MatrixCache::new(),
        })
    }

    /// Overrides the date flagged as today.
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = today;
        self
    }

    // --- Dates ---

    /// Month currently committed by the navigator
    pub const fn viewing_date(&self) -> CalendarDate {
        self.navigator.committed_date()
    }

    pub const fn selected_date(&self) -> CalendarDate {
        self.selected
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    pub const fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    /// Day press: selects `date`, navigates to its month and returns the
    /// day's events.
    pub fn select_date(&mut self, date: CalendarDate) -> Vec<Arc<CalendarEvent<T>>> {
        debug!(%date, "day selected");
        self.selected = date;
        self.navigator.go_to_date(date);
        self.index.events_on(&date)
    }

    pub fn go_to_date(&mut self, date: CalendarDate) {
        self.navigator.go_to_date(date);
    }

    /// Prev/next navigation.
    ///
    /// # Errors
    /// Returns `CalendarError::NavigationLocked` while a transition runs.
    pub fn step_months(&mut self, months: i32) -> Result<(), CalendarError> {
        self.navigator.step_months(months)
    }

    pub const fn is_locked(&self) -> bool {
        self.navigator.is_locked()
    }

    pub const fn navigator(&self) -> &NavigationController<A> {
        &self.navigator
    }

    /// Gesture, layout and tween callbacks go through the navigator.
    pub const fn navigator_mut(&mut self) -> &mut NavigationController<A> {
        &mut self.navigator
    }

    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        self.navigator.drain_events()
    }

    // --- Events ---

    pub const fn event_index(&self) -> &EventIndex<T> {
        &self.index
    }

    /// Replaces the whole event set. Returns the number indexed.
    pub fn set_events(&mut self, events: impl IntoIterator<Item = CalendarEvent<T>>) -> usize {
        self.index.replace_all(events)
    }

    /// Merges events into the index. Returns how many were new.
    pub fn add_events(&mut self, events: impl IntoIterator<Item = CalendarEvent<T>>) -> usize {
        self.index.insert(events)
    }

    pub fn set_on_events_change(
        &mut self,
        callback: impl FnMut(&[Arc<CalendarEvent<T>>]) + 'static,
    ) {
        self.index.set_on_change(callback);
    }

    pub fn daily_events(&self, date: &CalendarDate) -> Vec<Arc<CalendarEvent<T>>> {
        self.index.events_on(date)
    }

    pub fn monthly_events(&self, month: &CalendarDate) -> Vec<Arc<CalendarEvent<T>>> {
        self.index.query_month(month.year(), month.month())
    }

    /// Number of events in the viewing month
    pub fn monthly_event_count(&self) -> usize {
        let viewing = self.viewing_date();
        self.index.monthly_count(viewing.year(), viewing.month())
    }

    // --- Labels ---

    pub const fn labels(&self) -> &CalendarLabels {
        &self.labels
    }

    /// Navigator title for the viewing month, e.g. `2025.3`
    pub fn title(&self) -> String {
        CalendarLabels::title(&self.viewing_date())
    }

    pub fn month_label(&self) -> &str {
        self.labels.month(self.viewing_date().month())
    }

    pub fn weekday_labels(&self) -> Vec<&str> {
        self.labels.weekdays().collect()
    }

    // --- Grids ---

    pub const fn options(&self) -> MatrixOptions {
        self.options
    }

    pub const fn set_options(&mut self, options: MatrixOptions) {
        self.options = options;
    }

    /// Grid for the month containing `viewing`. Cached until the next
    /// [`visible_matrices`](Self::visible_matrices) call evicts it.
    pub fn matrix(&mut self, viewing: CalendarDate) -> Arc<MonthlyMatrix<T>> {
        self.cache
            .get_or_build(viewing, self.selected, self.today, &self.index, self.options)
    }

    /// One grid per buffered month, oldest first. Grids for months outside
    /// the window are evicted from the cache.
    pub fn visible_matrices(&mut self) -> Vec<Arc<MonthlyMatrix<T>>> {
        let window = self.navigator.window().to_vec();
        self.cache.retain_months(&window);
        window.iter().map(|&month| self.matrix(month)).collect()
    }
}
