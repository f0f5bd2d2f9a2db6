//! Image record decoding.
//!
//! Image messages carry their payload as a fixed big-endian record:
//!
//! | field             | type  | notes                              |
//! |-------------------|-------|------------------------------------|
//! | record tag        | `u64` | ASCII `IMGFRM01`                   |
//! | capture timestamp | `i64` | microseconds, embedded at capture  |
//! | width             | `i32` | pixels                             |
//! | height            | `i32` | pixels                             |
//! | row stride        | `i32` | bytes per row                      |
//! | pixel format      | `i32` | fourcc code, see [`PixelFormat`]   |
//! | size              | `i32` | length of `data` in bytes          |
//! | data              | bytes | already-encoded image bytes        |
//!
//! [`ImageRecord::decode`] parses a payload into an [`ImageRecord`] or
//! reports a [`UnlogError::ImageDecode`] carrying one of the negative error
//! codes below. The `data` buffer is the image in its final encoded form
//! (typically JPEG); this crate never reinterprets or re-encodes it.

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::UnlogError;

/// The tag that begins every image record: ASCII `IMGFRM01`.
pub const RECORD_TAG: u64 = u64::from_be_bytes(*b"IMGFRM01");

/// Decode error code: the payload ended before the record did.
pub const DECODE_ERR_TRUNCATED: i32 = -1;
/// Decode error code: the payload does not begin with [`RECORD_TAG`].
pub const DECODE_ERR_BAD_TAG: i32 = -2;
/// Decode error code: a dimension or length field is negative.
pub const DECODE_ERR_BAD_FIELD: i32 = -3;
/// Decode error code: the payload continues past the declared data size.
pub const DECODE_ERR_TRAILING: i32 = -4;

/// Pixel format of an image record's encoded data, as a fourcc code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Motion JPEG (`MJPG`) — the data bytes are a complete JPEG image.
    Mjpeg,
    /// Packed 24-bit RGB (`RGB3`).
    Rgb,
    /// Packed 24-bit BGR (`BGR3`).
    Bgr,
    /// 8-bit grayscale (`GREY`).
    Gray,
    /// Any fourcc this crate does not recognise. Unknown formats decode and
    /// write normally; the code is preserved for inspection.
    Unknown(u32),
}

impl PixelFormat {
    /// Map a fourcc code to a pixel format.
    pub fn from_fourcc(code: u32) -> Self {
        match &code.to_be_bytes() {
            b"MJPG" => PixelFormat::Mjpeg,
            b"RGB3" => PixelFormat::Rgb,
            b"BGR3" => PixelFormat::Bgr,
            b"GREY" => PixelFormat::Gray,
            _ => PixelFormat::Unknown(code),
        }
    }

    /// The fourcc code for this pixel format.
    pub fn fourcc(self) -> u32 {
        match self {
            PixelFormat::Mjpeg => u32::from_be_bytes(*b"MJPG"),
            PixelFormat::Rgb => u32::from_be_bytes(*b"RGB3"),
            PixelFormat::Bgr => u32::from_be_bytes(*b"BGR3"),
            PixelFormat::Gray => u32::from_be_bytes(*b"GREY"),
            PixelFormat::Unknown(code) => code,
        }
    }
}

/// A decoded image record.
///
/// Exists only transiently between decode and write: the scan loop decodes a
/// matched event, writes `data` verbatim, and drops the record before the
/// next event is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Capture timestamp in microseconds, embedded in the payload at capture
    /// time. Independent of the event's ingest timestamp.
    pub capture_timestamp: i64,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bytes per image row.
    pub row_stride: u32,
    /// Pixel format of the encoded data.
    pub pixel_format: PixelFormat,
    /// The image bytes in their final encoded form.
    pub data: Vec<u8>,
}

impl ImageRecord {
    /// Decode an event payload into an image record.
    ///
    /// # Errors
    ///
    /// Returns [`UnlogError::ImageDecode`] with one of the `DECODE_ERR_*`
    /// codes if the payload is truncated, mistagged, carries a negative
    /// field, or continues past its declared data size.
    pub fn decode(payload: &[u8]) -> Result<Self, UnlogError> {
        let mut cursor = payload;

        let tag = cursor
            .read_u64::<BigEndian>()
            .map_err(|_| decode_error(DECODE_ERR_TRUNCATED, "payload shorter than record tag"))?;
        if tag != RECORD_TAG {
            return Err(decode_error(
                DECODE_ERR_BAD_TAG,
                format!("unrecognised record tag {tag:#018x}"),
            ));
        }

        let capture_timestamp = read_i64(&mut cursor, "capture timestamp")?;
        let width = read_dimension(&mut cursor, "width")?;
        let height = read_dimension(&mut cursor, "height")?;
        let row_stride = read_dimension(&mut cursor, "row stride")?;
        let pixel_format = PixelFormat::from_fourcc(read_i32(&mut cursor, "pixel format")? as u32);
        let size = read_i32(&mut cursor, "size")?;

        if size < 0 {
            return Err(decode_error(
                DECODE_ERR_BAD_FIELD,
                format!("negative data size {size}"),
            ));
        }
        let size = size as usize;

        if cursor.len() < size {
            return Err(decode_error(
                DECODE_ERR_TRUNCATED,
                format!("data truncated: declared {size} bytes, {} remain", cursor.len()),
            ));
        }
        if cursor.len() > size {
            return Err(decode_error(
                DECODE_ERR_TRAILING,
                format!("{} bytes past the declared data size", cursor.len() - size),
            ));
        }

        Ok(Self {
            capture_timestamp,
            width,
            height,
            row_stride,
            pixel_format,
            data: cursor.to_vec(),
        })
    }

    /// Size of the encoded image data in bytes.
    ///
    /// Always equal to `self.data.len()`; a record cannot be constructed by
    /// [`decode`](ImageRecord::decode) otherwise.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

fn decode_error(code: i32, reason: impl Into<String>) -> UnlogError {
    UnlogError::ImageDecode {
        code,
        reason: reason.into(),
    }
}

fn read_i64(cursor: &mut &[u8], field: &str) -> Result<i64, UnlogError> {
    cursor
        .read_i64::<BigEndian>()
        .map_err(|_| decode_error(DECODE_ERR_TRUNCATED, format!("payload ends inside {field}")))
}

fn read_i32(cursor: &mut &[u8], field: &str) -> Result<i32, UnlogError> {
    cursor
        .read_i32::<BigEndian>()
        .map_err(|_| decode_error(DECODE_ERR_TRUNCATED, format!("payload ends inside {field}")))
}

fn read_dimension(cursor: &mut &[u8], field: &str) -> Result<u32, UnlogError> {
    let value = read_i32(cursor, field)?;
    if value < 0 {
        return Err(decode_error(
            DECODE_ERR_BAD_FIELD,
            format!("negative {field} {value}"),
        ));
    }
    Ok(value as u32)
}
