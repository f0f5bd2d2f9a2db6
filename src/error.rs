//! Error types for the `unlog` crate.
//!
//! This module defines [`UnlogError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context to diagnose
//! the problem without additional logging at the call site: file paths,
//! decode error codes, and upstream error messages.
//!
//! Two families matter to callers. Fatal errors ([`FileOpen`],
//! [`InvalidRange`], [`NegativeStartOffset`], [`EmptyChannel`]) abort a run
//! before any frame is written. Per-event errors ([`ImageDecode`],
//! [`FrameWrite`]) are recovered by the scan loop — the offending event is
//! skipped and the scan continues.
//!
//! [`FileOpen`]: UnlogError::FileOpen
//! [`InvalidRange`]: UnlogError::InvalidRange
//! [`NegativeStartOffset`]: UnlogError::NegativeStartOffset
//! [`EmptyChannel`]: UnlogError::EmptyChannel
//! [`ImageDecode`]: UnlogError::ImageDecode
//! [`FrameWrite`]: UnlogError::FrameWrite

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `unlog` operations.
///
/// Every public method that can fail returns `Result<T, UnlogError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UnlogError {
    /// The event log could not be opened.
    #[error("Failed to open event log at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::EventLog::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// An event could not be read from the log mid-scan.
    ///
    /// Covers a bad sync word, an implausible length field, a body truncated
    /// by end-of-file, and a channel name that is not valid UTF-8. The event
    /// iterator yields this once and then terminates.
    #[error("Failed to read log event: {0}")]
    EventRead(String),

    /// A matched event's payload is not a valid image record.
    ///
    /// `code` is the negative decode error code reported in diagnostics;
    /// see the constants in [`crate::image_record`].
    #[error("Error {code} decoding image record: {reason}")]
    ImageDecode {
        /// Negative decode error code.
        code: i32,
        /// Human-readable description of what was malformed.
        reason: String,
    },

    /// An output frame file could not be created or written.
    #[error("Failed to write frame file {path}: {reason}")]
    FrameWrite {
        /// Path of the output file that could not be written.
        path: PathBuf,
        /// Underlying reason the write failed.
        reason: String,
    },

    /// The time window's end offset precedes its start offset.
    #[error("Invalid time window: end offset {end}us precedes start offset {start}us")]
    InvalidRange {
        /// Start offset in microseconds.
        start: i64,
        /// End offset in microseconds.
        end: i64,
    },

    /// A negative start offset was provided.
    #[error("Start offset must not be negative (got {0}us)")]
    NegativeStartOffset(i64),

    /// The configured channel name is empty.
    #[error("Channel name must not be empty")]
    EmptyChannel,

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}
