//! # unlog
//!
//! Extract image frames from recorded event logs — scan a timestamped
//! binary log, pick out the messages on one channel, and write each image
//! payload as an individually named `.jpg` file.
//!
//! `unlog` serves offline log-inspection workflows: a recording session
//! leaves behind a log of heterogeneous, channel-tagged messages, and this
//! crate recovers the camera frames from it. The scan is single-pass,
//! forward-only, and synchronous — one event is read, filtered, matched,
//! decoded, and written before the next is touched.
//!
//! ## Quick Start
//!
//! ### Extract every frame on a channel
//!
//! ```no_run
//! use unlog::{EventLog, ExtractConfig};
//!
//! let mut log = EventLog::open("session.evl").unwrap();
//! let summary = log.frames().extract(&ExtractConfig::new("CAMERA_LEFT")).unwrap();
//! println!("wrote {} frames", summary.frames_written);
//! ```
//!
//! ### Restrict to a time window, name files by frame number
//!
//! ```no_run
//! use unlog::{EventLog, ExtractConfig, NamingMode, TimeWindow};
//!
//! let mut log = EventLog::open("session.evl").unwrap();
//! let config = ExtractConfig::new("CAMERA_LEFT")
//!     .with_window(TimeWindow::from_seconds(10.0, Some(20.0)).unwrap())
//!     .with_naming(NamingMode::Sequence);
//! let summary = log.frames().extract(&config).unwrap();
//! assert_eq!(summary.write_failures, 0);
//! ```
//!
//! ### Inspect a log before extracting
//!
//! ```no_run
//! use unlog::LogProbe;
//!
//! let summary = LogProbe::probe("session.evl").unwrap();
//! for channel in &summary.channels {
//!     println!("{}: {} events", channel.name, channel.event_count);
//! }
//! ```
//!
//! ## Features
//!
//! - **Single-pass extraction** — events flow through window filter,
//!   channel match, decode, and write with no buffering beyond the event
//!   in flight
//! - **Time windows** — start/end offsets in fractional seconds, measured
//!   from the log's first event so results are reproducible across re-runs
//! - **Two naming policies** — embedded capture timestamp (default) or a
//!   gapless zero-based sequence number
//! - **Verbatim output** — the payload's encoded image bytes are written
//!   untouched; nothing is re-encoded
//! - **Partial-failure isolation** — a malformed image payload or a failed
//!   file write skips that event and the scan carries on
//! - **Log probing** — per-channel event counts, byte totals, and time
//!   spans from one scan
//! - **Observer callbacks** — per-event outcomes delivered through
//!   [`ScanObserver`] without the library printing anything
//!
//! The `unlog` binary wraps the library for the command line:
//!
//! ```text
//! unlog -c CAMERA_LEFT -s 10 -e 20 -n -v session.evl
//! ```

pub mod config;
pub mod error;
pub mod event_log;
pub mod extract;
pub mod image_record;
pub mod probe;
pub mod progress;
pub mod window;

pub use config::{ExtractConfig, NamingMode};
pub use error::UnlogError;
pub use event_log::{EventIterator, EventLog, LogEvent, SYNC_WORD};
pub use extract::{ExtractSummary, FrameExtractor};
pub use image_record::{ImageRecord, PixelFormat, RECORD_TAG};
pub use probe::{ChannelSummary, LogProbe, LogSummary};
pub use progress::{ScanObserver, WrittenFrame};
pub use window::{TimeWindow, WindowPosition};
