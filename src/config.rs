//! Configuration for swipe navigation and the calendar facade.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANIMATION_DURATION, DEFAULT_BUFFER_SIZE, DEFAULT_SWIPE_THRESHOLD, MAX_BUFFER_SIZE,
};
use crate::error::CalendarError;
use crate::labels::CalendarLabels;
use crate::matrix::MatrixOptions;

/// Configuration for the buffered swipe navigator.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use swipe_calendar::SwipeConfig;
///
/// let config = SwipeConfig::new()
///     .with_buffer_size(2)
///     .with_animation_duration(Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    buffer_size: usize,
    threshold: f64,
    animation_duration: Duration,
}

impl SwipeConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `buffer_size = 1`, `threshold = 0.4`,
    /// `animation_duration = 300ms`.
    pub const fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }

    /// Sets the number of months buffered on each side of the committed month.
    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Sets the fraction of a page width a drag must exceed to commit.
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the page transition duration.
    pub const fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    // --- Accessors ---

    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Number of months in the buffered window (`2k + 1`).
    pub const fn window_len(&self) -> usize {
        self.buffer_size * 2 + 1
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub const fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Validates this configuration.
    ///
    /// # Errors
    /// `InvalidBufferSize` when `buffer_size` is outside
    /// `1..=MAX_BUFFER_SIZE`, `InvalidThreshold` when the threshold is not
    /// finite or outside the open interval (0, 1).
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(1..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(CalendarError::InvalidBufferSize(self.buffer_size));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold >= 1.0 {
            return Err(CalendarError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate configuration for a [`Calendar`](crate::Calendar).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub swipe: SwipeConfig,
    pub matrix: MatrixOptions,
    pub labels: CalendarLabels,
}

impl CalendarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    pub fn with_matrix(mut self, matrix: MatrixOptions) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_labels(mut self, labels: CalendarLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Validates the nested configuration.
    ///
    /// # Errors
    /// Propagates [`SwipeConfig::validate`] failures.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.swipe.validate()
    }
}
