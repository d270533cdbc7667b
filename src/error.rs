//! Error types for calendar configuration and navigation.

use crate::consts::MAX_BUFFER_SIZE;
use crate::{CalendarDate, ParseError};

/// Error type for fallible calendar operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// The buffered window needs at least one month on each side.
    #[error("invalid buffer size: {0} (must be 1-{max})", max = MAX_BUFFER_SIZE)]
    InvalidBufferSize(usize),

    /// Swipe threshold must be a fraction of the page width.
    #[error("invalid swipe threshold: {0} (must be finite and in (0, 1))")]
    InvalidThreshold(f64),

    /// Navigation was requested while a transition holds the lock.
    #[error("navigation is locked by an active transition")]
    NavigationLocked,

    /// A computed or reported value was NaN or infinite.
    #[error("non-finite {what}: {value}")]
    NonFiniteValue {
        /// Which quantity was rejected.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Month navigation would leave the supported years.
    #[error("moving {months} months from {from} leaves the supported year range")]
    DateOutOfRange {
        /// Month navigation started from.
        from: CalendarDate,
        /// Requested month offset.
        months: i32,
    },

    /// Error parsing a date.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
