//! Extraction configuration.
//!
//! [`ExtractConfig`] is a builder that carries the immutable parameters of a
//! frame extraction run: the channel to match, the time window, the output
//! naming mode and directory, and an optional [`ScanObserver`]. It is
//! resolved once before the scan starts and read-only thereafter.
//!
//! # Example
//!
//! ```
//! use unlog::{ExtractConfig, NamingMode, TimeWindow};
//!
//! let window = TimeWindow::from_seconds(1.0, Some(30.0)).unwrap();
//! let config = ExtractConfig::new("CAMERA_LEFT")
//!     .with_window(window)
//!     .with_naming(NamingMode::Sequence)
//!     .with_output_dir("frames");
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::progress::{NoOpObserver, ScanObserver};
use crate::window::TimeWindow;

/// How output frame files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
    /// Name each file by the image's embedded capture timestamp:
    /// `<microseconds>.jpg`, unpadded decimal. Two frames with the same
    /// capture timestamp produce the same name and the second silently
    /// overwrites the first. This is the default.
    #[default]
    CaptureTime,
    /// Name files by a zero-based run-wide counter: `00000.jpg`,
    /// `00001.jpg`, … The counter advances only on successful writes, so
    /// the sequence has no gaps regardless of skipped or failed events.
    Sequence,
}

/// Configuration for a frame extraction run.
///
/// Built via [`ExtractConfig::new`] and chained `with_*` methods, then
/// passed to [`FrameExtractor::extract`](crate::FrameExtractor::extract).
#[derive(Clone)]
pub struct ExtractConfig {
    /// Exact channel name to match.
    pub(crate) channel: String,
    /// Time window relative to the log's first event.
    pub(crate) window: TimeWindow,
    /// Output file naming policy.
    pub(crate) naming: NamingMode,
    /// Directory output files are created in. Defaults to the current
    /// working directory.
    pub(crate) output_dir: PathBuf,
    /// Observer for per-event outcomes. Defaults to a no-op.
    pub(crate) observer: Arc<dyn ScanObserver>,
}

impl Debug for ExtractConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractConfig")
            .field("channel", &self.channel)
            .field("window", &self.window)
            .field("naming", &self.naming)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl ExtractConfig {
    /// Create a configuration matching `channel` with default settings.
    ///
    /// Defaults: unbounded time window, capture-time naming, output to the
    /// current working directory, no observer.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            window: TimeWindow::default(),
            naming: NamingMode::default(),
            output_dir: PathBuf::from("."),
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Restrict the scan to a time window.
    #[must_use]
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Set the output file naming policy.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    /// Set the directory output files are created in.
    ///
    /// The directory must already exist; the scan does not create it.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Attach a [`ScanObserver`] for per-event outcomes.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The configured channel name.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// The configured time window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}
