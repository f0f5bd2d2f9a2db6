//! Time-window filtering.
//!
//! A [`TimeWindow`] restricts a scan to events whose ingest time falls within
//! an offset range measured from the log's very first event — not wall-clock
//! time and not the first event of the matched channel, so the same window
//! selects the same events on every re-run of a log, whichever channel is
//! targeted.
//!
//! [`TimeWindow::classify`] places an elapsed offset [`Before`], [`Within`],
//! or [`After`] the window. The two boundaries behave differently on
//! purpose: an event before the window is skipped and the scan continues,
//! while the first event past the end offset terminates the whole scan.
//!
//! [`Before`]: WindowPosition::Before
//! [`Within`]: WindowPosition::Within
//! [`After`]: WindowPosition::After

use crate::error::UnlogError;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Where an event's elapsed offset falls relative to a [`TimeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Earlier than the start offset: skip the event, keep scanning.
    Before,
    /// Inside the window: the event proceeds to channel matching.
    Within,
    /// Past the end offset: the entire scan stops here.
    After,
}

/// A time window in microseconds, relative to the log's first event.
///
/// # Example
///
/// ```
/// use unlog::{TimeWindow, WindowPosition};
///
/// let window = TimeWindow::from_seconds(1.0, Some(3.0)).unwrap();
/// assert_eq!(window.classify(500_000), WindowPosition::Before);
/// assert_eq!(window.classify(2_000_000), WindowPosition::Within);
/// assert_eq!(window.classify(3_000_001), WindowPosition::After);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_offset: i64,
    end_offset: Option<i64>,
}

impl Default for TimeWindow {
    /// The unbounded window: start offset 0, no end offset.
    fn default() -> Self {
        Self {
            start_offset: 0,
            end_offset: None,
        }
    }
}

impl TimeWindow {
    /// Create a window from offsets in microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`UnlogError::NegativeStartOffset`] if `start_offset` is
    /// negative, and [`UnlogError::InvalidRange`] if an end offset precedes
    /// the start offset.
    pub fn new(start_offset: i64, end_offset: Option<i64>) -> Result<Self, UnlogError> {
        if start_offset < 0 {
            return Err(UnlogError::NegativeStartOffset(start_offset));
        }
        if let Some(end) = end_offset {
            if end < start_offset {
                return Err(UnlogError::InvalidRange {
                    start: start_offset,
                    end,
                });
            }
        }
        Ok(Self {
            start_offset,
            end_offset,
        })
    }

    /// Create a window from offsets in (fractional) seconds.
    ///
    /// Offsets are truncated to whole microseconds.
    ///
    /// # Errors
    ///
    /// Same as [`TimeWindow::new`].
    pub fn from_seconds(start: f64, end: Option<f64>) -> Result<Self, UnlogError> {
        let start_offset = (start * MICROS_PER_SECOND) as i64;
        let end_offset = end.map(|seconds| (seconds * MICROS_PER_SECOND) as i64);
        Self::new(start_offset, end_offset)
    }

    /// The start offset in microseconds.
    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    /// The end offset in microseconds, if one was set.
    pub fn end_offset(&self) -> Option<i64> {
        self.end_offset
    }

    /// Classify an elapsed offset (event timestamp minus the log's first
    /// timestamp) against this window.
    pub fn classify(&self, elapsed: i64) -> WindowPosition {
        if elapsed < self.start_offset {
            return WindowPosition::Before;
        }
        if let Some(end) = self.end_offset {
            if elapsed > end {
                return WindowPosition::After;
            }
        }
        WindowPosition::Within
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeWindow, WindowPosition};
    use crate::error::UnlogError;

    #[test]
    fn default_window_accepts_everything() {
        let window = TimeWindow::default();
        assert_eq!(window.classify(0), WindowPosition::Within);
        assert_eq!(window.classify(i64::MAX), WindowPosition::Within);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let window = TimeWindow::new(1_000_000, Some(3_000_000)).unwrap();
        assert_eq!(window.classify(999_999), WindowPosition::Before);
        assert_eq!(window.classify(1_000_000), WindowPosition::Within);
        assert_eq!(window.classify(3_000_000), WindowPosition::Within);
        assert_eq!(window.classify(3_000_001), WindowPosition::After);
    }

    #[test]
    fn fractional_seconds_convert_to_microseconds() {
        let window = TimeWindow::from_seconds(1.5, Some(2.25)).unwrap();
        assert_eq!(window.start_offset(), 1_500_000);
        assert_eq!(window.end_offset(), Some(2_250_000));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let result = TimeWindow::new(2_000_000, Some(1_000_000));
        assert!(matches!(result, Err(UnlogError::InvalidRange { .. })));
    }

    #[test]
    fn equal_start_and_end_is_a_valid_window() {
        let window = TimeWindow::new(2_000_000, Some(2_000_000)).unwrap();
        assert_eq!(window.classify(2_000_000), WindowPosition::Within);
        assert_eq!(window.classify(2_000_001), WindowPosition::After);
    }

    #[test]
    fn negative_start_is_rejected() {
        let result = TimeWindow::from_seconds(-0.5, None);
        assert!(matches!(result, Err(UnlogError::NegativeStartOffset(_))));
    }
}
