//! # swipe_calendar
//!
//! Calendar computation and navigation engine for month-grid calendar UIs.
//!
//! - [`CalendarDate`] and month arithmetic ([`CalendarDate::shift_month`],
//!   [`CalendarDate::month_difference`])
//! - [`EventIndex`], a year → month → day event lookup
//! - [`build_month_matrix`], week × 7 grids annotated with cell metadata
//! - [`NavigationController`], a buffered-window swipe state machine
//! - [`Calendar`], a facade tying the pieces together
//!
//! Rendering, gestures and animation belong to the host; they reach the engine
//! through [`DayRenderer`], the `on_gesture_*` / `on_layout_measured` inputs and
//! the [`Animator`] trait.

mod calendar;
mod config;
mod consts;
mod error;
mod event;
mod labels;
mod matrix;
mod navigation;
mod prelude;
mod render;
mod types;

pub use calendar::Calendar;
pub use config::{CalendarConfig, SwipeConfig};
pub use consts::*;
pub use error::CalendarError;
pub use event::{CalendarEvent, EventIndex};
pub use labels::CalendarLabels;
pub use matrix::{
    CalendarCell, CellMetadata, MatrixCache, MatrixOptions, MonthlyMatrix, WeekRow,
    build_month_matrix,
};
pub use navigation::{
    Animator, NavigationController, NavigationEvent, NavigationPhase, SwipeDirection, Tween,
    TweenId, month_buffer,
};
pub use render::{DayLabel, DayRenderer, DayTone, DefaultDayRenderer, render_matrix};
pub use types::{Weekday, days_in_month, first_weekday_of_month, is_leap_year, weekday_of};

use crate::prelude::*;
use std::cmp::Ordering;
use std::str::FromStr;

/// A naive calendar day: year, month (1..=12) and day of month.
///
/// No timezone is attached. Years are limited to `MIN_YEAR..=MAX_YEAR`
/// (1..=9999), so the ISO text form is always four digits. Values built
/// through [`CalendarDate::new`] or parsing are validated; month arithmetic
/// always yields the 1st of a month and saturates at the year limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Earliest representable date, 0001-01-01
    pub const MIN: Self = Self::from_parts(MIN_YEAR, JANUARY, MIN_DAY);
    /// Latest representable date, 9999-12-31
    pub const MAX: Self = Self::from_parts(MAX_YEAR, DECEMBER, 31);

    /// Creates a validated date.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `ParseError::InvalidMonth` or
    /// `ParseError::InvalidDay` when the triple does not name a real day.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        if month < JANUARY || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// The 1st of (year, month).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth` for
    /// an out-of-range year or month.
    pub fn first_of(year: i32, month: u8) -> Result<Self, ParseError> {
        Self::new(year, month, MIN_DAY)
    }

    /// Builds a date the caller already knows to be valid.
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Today's date according to the local clock, clamped to
    /// [`CalendarDate::MAX`].
    pub fn today() -> Self {
        Self::try_from(chrono::Local::now().date_naive()).unwrap_or(Self::MAX)
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Number of days in this date's month
    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Weekday of this date
    pub const fn weekday(&self) -> Weekday {
        weekday_of(self.year, self.month, self.day)
    }

    /// Same year and month, ignoring the day
    pub const fn is_same_month(&self, other: &Self) -> bool {
        self.year == other.year && self.month == other.month
    }

    /// Moves by `offset` months, carrying into the year. The result is
    /// always the 1st of the target month, clamped to the first month of
    /// `MIN_YEAR` or the last month of `MAX_YEAR`.
    pub const fn shift_month(&self, offset: i32) -> Self {
        let target = self.month_index() + offset as i64;
        let clamped = if target < Self::MIN.month_index() {
            Self::MIN.month_index()
        } else if target > Self::MAX.month_index() {
            Self::MAX.month_index()
        } else {
            target
        };
        Self::from_month_index(clamped)
    }

    /// Like [`shift_month`](Self::shift_month), but `None` when the target
    /// month falls outside the supported years.
    pub const fn checked_shift_month(&self, offset: i32) -> Option<Self> {
        let target = self.month_index() + offset as i64;
        if target < Self::MIN.month_index() || target > Self::MAX.month_index() {
            None
        } else {
            Some(Self::from_month_index(target))
        }
    }

    /// Months since January of year 0
    const fn month_index(&self) -> i64 {
        self.year as i64 * MONTHS_PER_YEAR as i64 + (self.month as i64 - 1)
    }

    /// 1st of the month at `index`; `index` must lie within the year limits.
    const fn from_month_index(index: i64) -> Self {
        let months = MONTHS_PER_YEAR as i64;
        let year = index.div_euclid(months) as i32;
        let month = (index.rem_euclid(months) + 1) as u8;
        Self::from_parts(year, month, MIN_DAY)
    }

    /// Months from `other` to `self`; positive when `self` is later.
    /// The day component is ignored.
    pub const fn month_difference(&self, other: &Self) -> i32 {
        // bounded years keep this well inside i32
        (self.month_index() - other.month_index()) as i32
    }

    /// Lexicographic comparison on (year, month, day)
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(ParseError::InvalidYear(date.year()));
        }
        // chrono guarantees month in 1..=12 and a valid day
        Ok(Self::from_parts(date.year(), date.month() as u8, date.day() as u8))
    }
}

impl TryFrom<(i32, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<CalendarDate> for (i32, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        (date.year, date.month, date.day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // ISO format: YYYY-MM or YYYY-MM-DD
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month] => {
                Self::first_of(Self::parse_component(year)?, Self::parse_component(month)?)
            }
            [year, month, day] => Self::new(
                Self::parse_component(year)?,
                Self::parse_component(month)?,
                Self::parse_component(day)?,
            ),
            _ => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

impl CalendarDate {
    /// Helper to parse a numeric component with better error messages
    fn parse_component<N: FromStr>(s: &str) -> Result<N, ParseError> {
        s.parse::<N>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_new_validates() {
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
        assert!(matches!(
            CalendarDate::new(2023, 2, 29),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            CalendarDate::new(2023, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarDate::new(2023, 0, 1),
            Err(ParseError::InvalidMonth(0))
        ));
        assert!(matches!(
            CalendarDate::new(2023, 1, 0),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_shift_month_forward_carries_year() {
        let d = date(2024, 11, 15);
        assert_eq!(d.shift_month(1), date(2024, 12, 1));
        assert_eq!(d.shift_month(2), date(2025, 1, 1));
        assert_eq!(d.shift_month(14), date(2026, 1, 1));
    }

    #[test]
    fn test_shift_month_backward_borrows_year() {
        let d = date(2024, 2, 20);
        assert_eq!(d.shift_month(-1), date(2024, 1, 1));
        assert_eq!(d.shift_month(-2), date(2023, 12, 1));
        assert_eq!(d.shift_month(-26), date(2021, 12, 1));
    }

    #[test]
    fn test_new_rejects_years_out_of_range() {
        assert!(matches!(
            CalendarDate::new(0, 1, 1),
            Err(ParseError::InvalidYear(0))
        ));
        assert!(matches!(
            CalendarDate::new(-5, 3, 1),
            Err(ParseError::InvalidYear(-5))
        ));
        assert!(matches!(
            CalendarDate::new(10000, 1, 1),
            Err(ParseError::InvalidYear(10000))
        ));
        assert_eq!(CalendarDate::new(1, 1, 1).unwrap(), CalendarDate::MIN);
        assert_eq!(CalendarDate::new(9999, 12, 31).unwrap(), CalendarDate::MAX);
    }

    #[test]
    fn test_shift_month_saturates_at_year_limits() {
        assert_eq!(CalendarDate::MAX.shift_month(1), date(9999, 12, 1));
        assert_eq!(CalendarDate::MAX.shift_month(i32::MAX), date(9999, 12, 1));
        assert_eq!(CalendarDate::MIN.shift_month(-1), CalendarDate::MIN);
        assert_eq!(CalendarDate::MIN.shift_month(i32::MIN), CalendarDate::MIN);
        assert_eq!(date(9999, 11, 5).shift_month(1), date(9999, 12, 1));
    }

    #[test]
    fn test_checked_shift_month() {
        assert_eq!(CalendarDate::MAX.checked_shift_month(1), None);
        assert_eq!(CalendarDate::MIN.checked_shift_month(-1), None);
        assert_eq!(CalendarDate::MIN.checked_shift_month(i32::MAX), None);
        assert_eq!(
            date(2024, 12, 9).checked_shift_month(1),
            Some(date(2025, 1, 1))
        );
    }

    #[test]
    fn test_month_difference_across_full_range() {
        let span = CalendarDate::MAX.month_difference(&CalendarDate::MIN);
        assert_eq!(span, 9999 * 12 - 1);
        assert_eq!(CalendarDate::MIN.shift_month(span), date(9999, 12, 1));
    }

    #[test]
    fn test_shift_month_zero_resets_day() {
        assert_eq!(date(2024, 5, 31).shift_month(0), date(2024, 5, 1));
    }

    #[test]
    fn test_month_difference_ignores_day() {
        assert_eq!(date(2025, 6, 1).month_difference(&date(2025, 3, 31)), 3);
        assert_eq!(date(2024, 12, 1).month_difference(&date(2025, 1, 1)), -1);
        assert_eq!(date(2025, 3, 1).month_difference(&date(2025, 3, 28)), 0);
    }

    #[test]
    fn test_month_difference_inverts_shift() {
        let base = date(2023, 7, 9);
        for n in -40..=40 {
            assert_eq!(base.shift_month(n).month_difference(&base), n, "offset {n}");
        }
    }

    #[test]
    fn test_compare() {
        let a = date(2024, 1, 31);
        let b = date(2024, 2, 1);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a), Ordering::Equal);
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(date(2023, 12, 31).is_before(&a));
    }

    #[test]
    fn test_display() {
        assert_eq!(date(991, 8, 5).to_string(), "0991-08-05");
        assert_eq!(date(2025, 12, 25).to_string(), "2025-12-25");
    }

    #[test]
    fn test_parse() {
        assert_eq!("2025-03-14".parse::<CalendarDate>().unwrap(), date(2025, 3, 14));
        assert_eq!(" 2025-03 ".parse::<CalendarDate>().unwrap(), date(2025, 3, 1));
        assert!(matches!(
            "".parse::<CalendarDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "2025".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2025-XX-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2025-02-30".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(2025, 3, 14);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""2025-03-14""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2025-13-01""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_round_trip_at_year_limits() {
        for d in [CalendarDate::MIN, CalendarDate::MAX, date(1, 12, 31), date(9999, 1, 1)] {
            let json = serde_json::to_string(&d).unwrap();
            let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, d, "{json}");
        }
        assert_eq!(serde_json::to_string(&CalendarDate::MIN).unwrap(), r#""0001-01-01""#);

        for text in [r#""0000-01-01""#, r#""10000-01-01""#, r#""-005-03-01""#] {
            let result: Result<CalendarDate, _> = serde_json::from_str(text);
            assert!(result.is_err(), "{text}");
        }
    }

    #[test]
    fn test_from_naive_date() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CalendarDate::try_from(naive).unwrap(), date(2024, 2, 29));
        let far = chrono::NaiveDate::from_ymd_opt(12_000, 1, 1).unwrap();
        assert!(matches!(
            CalendarDate::try_from(far),
            Err(ParseError::InvalidYear(12_000))
        ));
    }

    #[test]
    fn test_tuple_conversions() {
        let d: CalendarDate = (2025, 3, 14).try_into().unwrap();
        assert_eq!(d, date(2025, 3, 14));
        let (y, m, day): (i32, u8, u8) = d.into();
        assert_eq!((y, m, day), (2025, 3, 14));
        assert!(CalendarDate::try_from((2025, 4, 31)).is_err());
    }

    #[test]
    fn test_weekday_and_month_helpers() {
        let d = date(2025, 3, 1);
        assert_eq!(d.weekday(), Weekday::Saturday);
        assert_eq!(d.days_in_month(), 31);
        assert!(d.is_same_month(&date(2025, 3, 31)));
        assert!(!d.is_same_month(&date(2024, 3, 1)));
    }
}
