//! Scan observation callbacks.
//!
//! This module provides [`ScanObserver`] for monitoring a frame extraction
//! scan as it runs. The library itself never prints: recovered per-event
//! failures and successful writes are delivered to the configured observer,
//! and the CLI (or any other embedder) decides how to present them.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use unlog::{EventLog, ExtractConfig, ScanObserver, UnlogError, WrittenFrame};
//!
//! struct PrintObserver;
//!
//! impl ScanObserver for PrintObserver {
//!     fn frame_written(&self, frame: &WrittenFrame) {
//!         eprintln!("saved frame {} -> {}", frame.frame_number, frame.path.display());
//!     }
//!
//!     fn event_skipped(&self, error: &UnlogError) {
//!         eprintln!("warning: {error}");
//!     }
//! }
//!
//! let mut log = EventLog::open("session.evl")?;
//! let config = ExtractConfig::new("CAMERA_LEFT").with_observer(Arc::new(PrintObserver));
//! let summary = log.frames().extract(&config)?;
//! eprintln!("{} frames written", summary.frames_written);
//! # Ok::<(), UnlogError>(())
//! ```

use std::path::PathBuf;

use crate::error::UnlogError;

/// A successfully written output frame.
#[derive(Debug, Clone)]
pub struct WrittenFrame {
    /// Path of the file that was written.
    pub path: PathBuf,
    /// Zero-based index of this frame among successful writes.
    pub frame_number: u64,
    /// Capture timestamp of the frame, in microseconds.
    pub capture_timestamp: i64,
    /// Number of image bytes written.
    pub size: usize,
}

/// Trait for observing per-event outcomes during a scan.
///
/// Implementations must be [`Send`] and [`Sync`] so a single observer can be
/// shared between configs. Observer callbacks are **infallible** — they see
/// what happened but cannot alter the scan.
///
/// Both methods have empty default bodies; implement only what you need.
pub trait ScanObserver: Send + Sync {
    /// Called after each frame file is successfully written.
    fn frame_written(&self, frame: &WrittenFrame) {
        let _ = frame;
    }

    /// Called when a matched event is skipped by a recovered failure —
    /// either an [`UnlogError::ImageDecode`] or an
    /// [`UnlogError::FrameWrite`].
    fn event_skipped(&self, error: &UnlogError) {
        let _ = error;
    }
}

/// A no-op implementation that discards all notifications.
///
/// This is the default when no observer is configured.
pub(crate) struct NoOpObserver;

impl ScanObserver for NoOpObserver {}
