//! Human-readable month and weekday names.

use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, TITLE_SEPARATOR};
use crate::types::Weekday;
use crate::CalendarDate;

const DEFAULT_MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DEFAULT_WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Label provider. Pure data: months are indexed January first, weekdays
/// Sunday first to match grid columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarLabels {
    months: [String; 12],
    weekdays: [String; DAYS_PER_WEEK],
}

impl CalendarLabels {
    pub const fn new(months: [String; 12], weekdays: [String; DAYS_PER_WEEK]) -> Self {
        Self { months, weekdays }
    }

    /// Label for a 1-based month; months outside 1..=12 wrap.
    pub fn month(&self, month: u8) -> &str {
        &self.months[usize::from(month.saturating_sub(1)) % self.months.len()]
    }

    pub fn weekday(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.column()]
    }

    /// Weekday header labels in column order
    pub fn weekdays(&self) -> impl Iterator<Item = &str> {
        self.weekdays.iter().map(String::as_str)
    }

    /// Navigator title, e.g. `2025.3`
    pub fn title(date: &CalendarDate) -> String {
        format!("{}{TITLE_SEPARATOR}{}", date.year(), date.month())
    }
}

impl Default for CalendarLabels {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTH_LABELS.map(str::to_owned),
            weekdays: DEFAULT_WEEKDAY_LABELS.map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labels = CalendarLabels::default();
        assert_eq!(labels.month(1), "Jan");
        assert_eq!(labels.month(12), "Dec");
        assert_eq!(labels.weekday(Weekday::Sunday), "Sun");
        assert_eq!(labels.weekdays().count(), 7);
    }

    #[test]
    fn test_substituted_labels() {
        let months = [
            "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
        ]
        .map(str::to_owned);
        let weekdays = ["일", "월", "화", "수", "목", "금", "토"].map(str::to_owned);
        let labels = CalendarLabels::new(months, weekdays);
        assert_eq!(labels.month(3), "3월");
        assert_eq!(labels.weekday(Weekday::Saturday), "토");
    }

    #[test]
    fn test_title_format() {
        let date = CalendarDate::new(2025, 3, 14).unwrap();
        assert_eq!(CalendarLabels::title(&date), "2025.3");
    }
}
