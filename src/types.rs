use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Day of the week, in month-grid column order (Sunday is column 0).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in column order
    pub const ALL: [Self; DAYS_PER_WEEK] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Weekday for a grid column; columns wrap every seven
    pub const fn from_column(column: usize) -> Self {
        Self::ALL[column % DAYS_PER_WEEK]
    }

    /// Grid column of this weekday (0..=6)
    #[inline]
    pub const fn column(self) -> usize {
        self as usize
    }

    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
const fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Weekday of an arbitrary (year, month, day)
pub const fn weekday_of(year: i32, month: u8, day: u8) -> Weekday {
    // 1970-01-01 was a Thursday
    let offset = (days_from_civil(year, month, day) + 4).rem_euclid(DAYS_PER_WEEK as i64);
    Weekday::from_column(offset as usize)
}

/// Weekday on which the 1st of (year, month) falls
pub const fn first_weekday_of_month(year: i32, month: u8) -> Weekday {
    weekday_of(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2020,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: -4,
                is_leap: true,
                description: "negative year divisible by 4",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_month_30_and_31() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(2024, month), 31, "Month {month}");
        }
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2024, month), 30, "Month {month}");
        }
    }

    #[test]
    fn test_known_weekdays() {
        assert_eq!(weekday_of(1970, 1, 1), Weekday::Thursday);
        assert_eq!(weekday_of(2000, 1, 1), Weekday::Saturday);
        assert_eq!(weekday_of(2024, 2, 29), Weekday::Thursday);
        assert_eq!(first_weekday_of_month(2025, 3), Weekday::Saturday);
        assert_eq!(first_weekday_of_month(2026, 2), Weekday::Sunday);
        assert_eq!(first_weekday_of_month(1900, 1), Weekday::Monday);
    }

    #[test]
    fn test_weekday_columns() {
        assert_eq!(Weekday::from_column(0), Weekday::Sunday);
        assert_eq!(Weekday::from_column(6), Weekday::Saturday);
        assert_eq!(Weekday::from_column(7), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.column(), 3);
        assert!(Weekday::Sunday.is_weekend());
        assert!(Weekday::Saturday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
    }

    #[test]
    fn test_weekday_display() {
        assert_eq!(Weekday::Monday.to_string(), "Monday");
    }
}
