//! Lightweight event log inspection.
//!
//! [`LogProbe`] scans a log once and summarises what it holds — which
//! channels are present, how many events and payload bytes each carries,
//! and the log's overall time span. This is the usual first step of an
//! offline log-inspection session: probe the log to find the image channel
//! of interest, then extract from it.
//!
//! The probe opens the file, scans to the end, and releases the handle
//! before returning; the resulting [`LogSummary`] is fully owned.
//!
//! # Example
//!
//! ```no_run
//! use unlog::LogProbe;
//!
//! let summary = LogProbe::probe("session.evl")?;
//! println!("{} events over {:.1}s", summary.event_count, summary.duration() as f64 / 1e6);
//! for channel in &summary.channels {
//!     println!("  {}: {} events, {} bytes", channel.name, channel.event_count, channel.payload_bytes);
//! }
//! # Ok::<(), unlog::UnlogError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::UnlogError;
use crate::event_log::EventLog;

/// Per-channel aggregate statistics from a probe scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    /// Channel name.
    pub name: String,
    /// Number of events on this channel.
    pub event_count: u64,
    /// Total payload bytes across the channel's events.
    pub payload_bytes: u64,
    /// Ingest timestamp of the channel's first event, in microseconds.
    pub first_timestamp: i64,
    /// Ingest timestamp of the channel's last event, in microseconds.
    pub last_timestamp: i64,
}

/// Whole-log statistics from a probe scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct LogSummary {
    /// Total number of events read.
    pub event_count: u64,
    /// Ingest timestamp of the first event, if the log is non-empty.
    pub first_timestamp: Option<i64>,
    /// Ingest timestamp of the last event, if the log is non-empty.
    pub last_timestamp: Option<i64>,
    /// Per-channel summaries, sorted by channel name.
    pub channels: Vec<ChannelSummary>,
    /// `true` if the scan ended on a malformed event instead of end-of-file.
    pub truncated: bool,
}

impl LogSummary {
    /// The log's time span in microseconds (zero for empty or single-event
    /// logs).
    pub fn duration(&self) -> i64 {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        }
    }

    /// Look up a channel summary by exact name.
    pub fn channel(&self, name: &str) -> Option<&ChannelSummary> {
        self.channels.iter().find(|channel| channel.name == name)
    }
}

/// One-shot event log probe.
pub struct LogProbe;

impl LogProbe {
    /// Probe an event log and return its summary.
    ///
    /// A malformed event ends the scan early: statistics cover everything
    /// read up to that point and the summary is marked
    /// [`truncated`](LogSummary::truncated).
    ///
    /// # Errors
    ///
    /// Returns [`UnlogError::FileOpen`] if the log cannot be opened.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<LogSummary, UnlogError> {
        let mut log = EventLog::open(path)?;
        let mut summary = LogSummary::default();
        let mut channels: HashMap<String, ChannelSummary> = HashMap::new();

        for event in log.events() {
            let event = match event {
                Ok(event) => event,
                Err(error) => {
                    log::warn!("Probe ended early: {error}");
                    summary.truncated = true;
                    break;
                }
            };

            summary.event_count += 1;
            summary.first_timestamp.get_or_insert(event.timestamp);
            summary.last_timestamp = Some(event.timestamp);

            let entry = channels
                .entry(event.channel.clone())
                .or_insert_with(|| ChannelSummary {
                    name: event.channel.clone(),
                    event_count: 0,
                    payload_bytes: 0,
                    first_timestamp: event.timestamp,
                    last_timestamp: event.timestamp,
                });
            entry.event_count += 1;
            entry.payload_bytes += event.payload.len() as u64;
            entry.last_timestamp = event.timestamp;
        }

        summary.channels = channels.into_values().collect();
        summary.channels.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(summary)
    }
}
