//! The frame extraction scan.
//!
//! [`FrameExtractor`] runs the single-pass pipeline over an opened
//! [`EventLog`]: each event is window-filtered, channel-matched, decoded,
//! and written to completion before the next event is read. The only state
//! threaded across iterations is the first event's timestamp and the
//! summary counters.
//!
//! Window semantics are asymmetric by design: an event earlier than the
//! start offset is skipped and the scan continues, but the first event past
//! the end offset terminates the entire scan — later events are never
//! examined, whatever channel they are on.
//!
//! Per-event decode and write failures are recovered: the event is skipped,
//! a diagnostic goes to the [`ScanObserver`](crate::ScanObserver) and the
//! `log` facade, and the scan continues with the frame counter untouched.
//!
//! # Example
//!
//! ```no_run
//! use unlog::{EventLog, ExtractConfig, NamingMode, TimeWindow, UnlogError};
//!
//! let mut log = EventLog::open("session.evl")?;
//! let config = ExtractConfig::new("CAMERA_LEFT")
//!     .with_window(TimeWindow::from_seconds(10.0, Some(20.0))?)
//!     .with_naming(NamingMode::Sequence);
//!
//! let summary = log.frames().extract(&config)?;
//! println!(
//!     "{} frames written, {} decode failures",
//!     summary.frames_written, summary.decode_failures
//! );
//! # Ok::<(), UnlogError>(())
//! ```

use std::fs;

use crate::config::{ExtractConfig, NamingMode};
use crate::error::UnlogError;
use crate::event_log::EventLog;
use crate::image_record::ImageRecord;
use crate::progress::WrittenFrame;
use crate::window::WindowPosition;

/// Counters describing a completed extraction scan.
///
/// Returned by [`FrameExtractor::extract`] whether the scan ran to
/// end-of-file, stopped at the end of the time window, or ended early on a
/// malformed event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ExtractSummary {
    /// Events read from the log, including ones outside the window or on
    /// other channels. Events past the end of the window are never read.
    pub events_scanned: u64,
    /// Events inside the window whose channel matched the configuration.
    pub events_matched: u64,
    /// Frame files successfully written.
    pub frames_written: u64,
    /// Matched events whose payload failed to decode as an image record.
    pub decode_failures: u64,
    /// Decoded frames whose output file could not be created or written.
    pub write_failures: u64,
    /// `true` if the scan ended on a malformed event instead of end-of-file
    /// or the end of the window.
    pub truncated: bool,
}

/// Runs the extraction scan over an [`EventLog`].
///
/// Created via [`EventLog::frames`]. The extractor borrows the log mutably,
/// so no other access can happen while it is alive.
pub struct FrameExtractor<'a> {
    log: &'a mut EventLog,
}

impl<'a> FrameExtractor<'a> {
    pub(crate) fn new(log: &'a mut EventLog) -> Self {
        Self { log }
    }

    /// Scan the log once and write every matching image frame to disk.
    ///
    /// The time window is measured from the very first event in the log,
    /// before any channel filtering, so the same window selects the same
    /// events whichever channel is targeted. Output files are named
    /// according to [`NamingMode`] and created in the configured output
    /// directory; image bytes are written verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`UnlogError::EmptyChannel`] if the configured channel name
    /// is empty. Per-event decode and write failures do not error — they
    /// are counted in the returned [`ExtractSummary`] and reported to the
    /// configured observer.
    pub fn extract(&mut self, config: &ExtractConfig) -> Result<ExtractSummary, UnlogError> {
        if config.channel.is_empty() {
            return Err(UnlogError::EmptyChannel);
        }

        log::debug!(
            "Extracting channel {:?} from {} (window {:?})",
            config.channel,
            self.log.path().display(),
            config.window,
        );

        let mut summary = ExtractSummary::default();
        let mut first_timestamp: Option<i64> = None;

        for event in self.log.events() {
            let event = match event {
                Ok(event) => event,
                Err(error) => {
                    log::warn!("Scan ended early: {error}");
                    summary.truncated = true;
                    break;
                }
            };
            summary.events_scanned += 1;

            // The window is anchored at the first event ever seen, matching
            // channel or not.
            let first = *first_timestamp.get_or_insert(event.timestamp);
            let elapsed = event.timestamp - first;

            match config.window.classify(elapsed) {
                WindowPosition::Before => continue,
                WindowPosition::After => break,
                WindowPosition::Within => {}
            }

            if event.channel != config.channel {
                continue;
            }
            summary.events_matched += 1;

            let record = match ImageRecord::decode(&event.payload) {
                Ok(record) => record,
                Err(error) => {
                    summary.decode_failures += 1;
                    log::warn!("{error}");
                    config.observer.event_skipped(&error);
                    continue;
                }
            };

            let file_name = match config.naming {
                NamingMode::Sequence => format!("{:05}.jpg", summary.frames_written),
                NamingMode::CaptureTime => format!("{}.jpg", record.capture_timestamp),
            };
            let path = config.output_dir.join(file_name);

            match fs::write(&path, &record.data) {
                Ok(()) => {
                    let frame = WrittenFrame {
                        path,
                        frame_number: summary.frames_written,
                        capture_timestamp: record.capture_timestamp,
                        size: record.size(),
                    };
                    summary.frames_written += 1;
                    config.observer.frame_written(&frame);
                }
                Err(error) => {
                    let error = UnlogError::FrameWrite {
                        path,
                        reason: error.to_string(),
                    };
                    summary.write_failures += 1;
                    log::warn!("{error}");
                    config.observer.event_skipped(&error);
                }
            }
        }

        log::debug!(
            "Scan complete: {} scanned, {} matched, {} written",
            summary.events_scanned,
            summary.events_matched,
            summary.frames_written,
        );

        Ok(summary)
    }
}
