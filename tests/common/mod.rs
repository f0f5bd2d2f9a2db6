//! Shared helpers for integration tests: synthetic log and payload
//! encoders matching the on-disk layouts the crate reads.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use unlog::{RECORD_TAG, SYNC_WORD};

/// One event to be written to a synthetic log: `(channel, ingest timestamp
/// in microseconds, payload)`.
pub type Event<'a> = (&'a str, i64, Vec<u8>);

/// Write a log file containing `events` in order, numbering them from zero.
pub fn write_log(path: &Path, events: &[Event<'_>]) {
    let mut file = File::create(path).expect("Failed to create log file");
    for (event_number, (channel, timestamp, payload)) in events.iter().enumerate() {
        write_event(&mut file, event_number as i64, channel, *timestamp, payload);
    }
}

/// Append one framed event to `writer`.
pub fn write_event<W: Write>(
    writer: &mut W,
    event_number: i64,
    channel: &str,
    timestamp: i64,
    payload: &[u8],
) {
    writer.write_u32::<BigEndian>(SYNC_WORD).unwrap();
    writer.write_i64::<BigEndian>(event_number).unwrap();
    writer.write_i64::<BigEndian>(timestamp).unwrap();
    writer.write_u32::<BigEndian>(channel.len() as u32).unwrap();
    writer.write_u32::<BigEndian>(payload.len() as u32).unwrap();
    writer.write_all(channel.as_bytes()).unwrap();
    writer.write_all(payload).unwrap();
}

/// Encode a well-formed image record payload carrying `data` verbatim.
pub fn image_payload(capture_timestamp: i64, data: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u64::<BigEndian>(RECORD_TAG).unwrap();
    payload.write_i64::<BigEndian>(capture_timestamp).unwrap();
    payload.write_i32::<BigEndian>(64).unwrap(); // width
    payload.write_i32::<BigEndian>(48).unwrap(); // height
    payload.write_i32::<BigEndian>(192).unwrap(); // row stride
    payload
        .write_i32::<BigEndian>(u32::from_be_bytes(*b"MJPG") as i32)
        .unwrap();
    payload.write_i32::<BigEndian>(data.len() as i32).unwrap();
    payload.extend_from_slice(data);
    payload
}
