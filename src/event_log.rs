//! Event log reading.
//!
//! This module provides [`EventLog`], which opens a recorded event log for
//! forward-only sequential reading, and [`EventIterator`], a lazy iterator
//! over its [`LogEvent`]s. Events are read one at a time in on-disk (arrival)
//! order; nothing is buffered beyond the event currently in flight.
//!
//! # On-disk layout
//!
//! A log is a flat sequence of records with no file header. Each record is,
//! in big-endian byte order:
//!
//! | field         | type  | notes                          |
//! |---------------|-------|--------------------------------|
//! | sync word     | `u32` | always `0xEDA1DA01`            |
//! | event number  | `i64` | zero-based, assigned at record |
//! | timestamp     | `i64` | ingest time in microseconds    |
//! | channel length| `u32` |                                |
//! | payload length| `u32` |                                |
//! | channel       | bytes | UTF-8, `channel length` bytes  |
//! | payload       | bytes | opaque, `payload length` bytes |
//!
//! # Example
//!
//! ```no_run
//! use unlog::{EventLog, UnlogError};
//!
//! let mut log = EventLog::open("session.evl")?;
//! for event in log.events() {
//!     let event = event?;
//!     println!("{} @ {}us ({} bytes)", event.channel, event.timestamp, event.payload.len());
//! }
//! # Ok::<(), UnlogError>(())
//! ```

use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::UnlogError;
use crate::extract::FrameExtractor;

/// The sync word that begins every record in an event log.
pub const SYNC_WORD: u32 = 0xEDA1_DA01;

/// Upper bound on a plausible channel-name length, in bytes.
///
/// A length field above this is treated as corruption rather than attempting
/// a giant allocation.
const MAX_CHANNEL_LENGTH: u32 = 1024;

/// Upper bound on a plausible payload length, in bytes (1 GiB).
const MAX_PAYLOAD_LENGTH: u32 = 1 << 30;

/// A single timestamped, channel-tagged record read from an event log.
///
/// Events are owned values: the iterator hands each one to the caller and
/// retains nothing, so the payload buffer is freed as soon as the event is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Zero-based sequence number assigned when the log was recorded.
    pub event_number: i64,
    /// Ingest timestamp in microseconds. Monotonic within a log, but not
    /// necessarily starting at zero.
    pub timestamp: i64,
    /// Channel name tagging this record.
    pub channel: String,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

/// An opened event log.
///
/// Created via [`EventLog::open`], this struct owns the underlying file
/// handle for its whole lifetime; the handle is released when the `EventLog`
/// is dropped, whether the scan ran to completion or stopped early.
///
/// # Example
///
/// ```no_run
/// use unlog::{EventLog, ExtractConfig, UnlogError};
///
/// let mut log = EventLog::open("session.evl")?;
/// let summary = log.frames().extract(&ExtractConfig::new("CAMERA_LEFT"))?;
/// println!("wrote {} frames", summary.frames_written);
/// # Ok::<(), UnlogError>(())
/// ```
pub struct EventLog {
    reader: BufReader<File>,
    path: PathBuf,
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl EventLog {
    /// Open an event log for sequential reading.
    ///
    /// The file's first four bytes are checked against the record sync word
    /// so that a missing, unreadable, or non-log file fails here rather than
    /// mid-scan. An empty file is a valid log containing zero events.
    ///
    /// # Errors
    ///
    /// Returns [`UnlogError::FileOpen`] if the file cannot be opened or does
    /// not begin with a valid record.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unlog::{EventLog, UnlogError};
    ///
    /// let log = EventLog::open("session.evl")?;
    /// # Ok::<(), UnlogError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, UnlogError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening event log: {}", path.display());

        let file = File::open(&path).map_err(|error| UnlogError::FileOpen {
            path: path.clone(),
            reason: error.to_string(),
        })?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        let filled = read_available(&mut reader, &mut magic).map_err(|error| {
            UnlogError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            }
        })?;

        if filled > 0 && (filled < magic.len() || u32::from_be_bytes(magic) != SYNC_WORD) {
            return Err(UnlogError::FileOpen {
                path,
                reason: "not an event log (bad leading sync word)".to_string(),
            });
        }

        reader
            .seek(SeekFrom::Start(0))
            .map_err(|error| UnlogError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        Ok(Self { reader, path })
    }

    /// The path this log was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate over the log's events in arrival order.
    ///
    /// The iterator borrows the log mutably and reads events on demand. It
    /// ends at end-of-file, or after yielding a single
    /// [`UnlogError::EventRead`] if a malformed record is encountered.
    pub fn events(&mut self) -> EventIterator<'_> {
        EventIterator::new(self)
    }

    /// Obtain a [`FrameExtractor`] for running the frame extraction scan.
    pub fn frames(&mut self) -> FrameExtractor<'_> {
        FrameExtractor::new(self)
    }
}

/// Read as many bytes as are available into `buffer`, stopping at EOF.
///
/// Returns the number of bytes actually filled.
fn read_available<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

/// A lazy iterator over the events of an [`EventLog`].
///
/// Yields `Result<LogEvent, UnlogError>` in on-disk order. The iterator
/// borrows the log mutably, so no other access can happen while it is alive;
/// dropping it releases the borrow without consuming the remaining events.
pub struct EventIterator<'a> {
    log: &'a mut EventLog,
    done: bool,
}

impl<'a> EventIterator<'a> {
    pub(crate) fn new(log: &'a mut EventLog) -> Self {
        Self { log, done: false }
    }

    /// Read one event. `Ok(None)` is clean end-of-file.
    fn read_event(&mut self) -> Result<Option<LogEvent>, UnlogError> {
        let reader = &mut self.log.reader;

        let sync = match reader.read_u32::<BigEndian>() {
            Ok(value) => value,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(error) => return Err(UnlogError::EventRead(error.to_string())),
        };
        if sync != SYNC_WORD {
            return Err(UnlogError::EventRead(format!(
                "bad sync word {sync:#010x}"
            )));
        }

        let event_number = reader.read_i64::<BigEndian>().map_err(truncated)?;
        let timestamp = reader.read_i64::<BigEndian>().map_err(truncated)?;
        let channel_length = reader.read_u32::<BigEndian>().map_err(truncated)?;
        let payload_length = reader.read_u32::<BigEndian>().map_err(truncated)?;

        if channel_length > MAX_CHANNEL_LENGTH {
            return Err(UnlogError::EventRead(format!(
                "implausible channel length {channel_length}"
            )));
        }
        if payload_length > MAX_PAYLOAD_LENGTH {
            return Err(UnlogError::EventRead(format!(
                "implausible payload length {payload_length}"
            )));
        }

        let mut channel_bytes = vec![0u8; channel_length as usize];
        reader.read_exact(&mut channel_bytes).map_err(truncated)?;
        let channel = String::from_utf8(channel_bytes).map_err(|_| {
            UnlogError::EventRead("channel name is not valid UTF-8".to_string())
        })?;

        let mut payload = vec![0u8; payload_length as usize];
        reader.read_exact(&mut payload).map_err(truncated)?;

        Ok(Some(LogEvent {
            event_number,
            timestamp,
            channel,
            payload,
        }))
    }
}

fn truncated(error: io::Error) -> UnlogError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        UnlogError::EventRead("event truncated by end of file".to_string())
    } else {
        UnlogError::EventRead(error.to_string())
    }
}

impl Iterator for EventIterator<'_> {
    type Item = Result<LogEvent, UnlogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
