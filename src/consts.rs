use std::time::Duration;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Number of months in a year
pub const MONTHS_PER_YEAR: i32 = 12;

/// Number of columns in a month grid row
pub const DAYS_PER_WEEK: usize = 7;

/// Natural row count that gets padded to a stable six-row layout
pub const PADDED_ROW_TRIGGER: usize = 5;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator used by the navigator title (`2025.3`)
pub const TITLE_SEPARATOR: char = '.';

/// Months kept on each side of the committed month
pub const DEFAULT_BUFFER_SIZE: usize = 1;
/// Largest accepted buffer size (two years each side)
pub const MAX_BUFFER_SIZE: usize = 24;
/// Fraction of a page width a drag must travel to commit
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 0.4;
/// Duration of the page transition tween
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
