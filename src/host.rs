//! Native-messaging framing and stdio helpers.
//!
//! Every message on the wire is a 4-byte length prefix (`u32`, **native** endianness)
//! followed by exactly that many bytes of UTF-8 JSON. The browser and the host always run
//! on the same machine, so native byte order is what both sides agree on.

use serde::Serialize;
use serde_json::Value;
use std::io::{self, Read, Write};

/// Largest frame the host will send (browser-enforced limit for host -> browser).
pub const MAX_TO_BROWSER: usize = 1_048_576; // 1 MB (host -> browser)
/// Largest frame the host will accept (browser -> host).
pub const MAX_FROM_BROWSER: usize = 64 * 1_048_576; // 64 MB (browser -> host)

/// Errors produced while reading or writing framed messages.
#[derive(Debug, thiserror::Error)]
pub enum NmError {
    /// stdin closed before a single byte of a new frame arrived.
    ///
    /// This is the normal "invoked with nothing to send" case, not a protocol fault.
    #[error("input closed before any message arrived")]
    Disconnected,

    /// The stream ended part-way through a frame.
    #[error("short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: usize, received: usize },

    #[error("incoming message too large ({len} bytes, max {max})")]
    TooLarge { len: usize, max: usize },

    #[error("outgoing message too large ({len} bytes, max {max})")]
    OutgoingTooLarge { len: usize, max: usize },

    #[error("message is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("message is not valid JSON: {0}")]
    DeserializeJson(#[source] serde_json::Error),

    #[error("failed to serialize message: {0}")]
    SerializeJson(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fill `buf` from `r`, returning how many bytes were read before EOF.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[inline]
fn read_exact_u32_len<R: Read>(r: &mut R) -> Result<u32, NmError> {
    let mut len_buf = [0u8; 4];
    match read_full(r, &mut len_buf)? {
        0 => Err(NmError::Disconnected),
        4 => Ok(u32::from_ne_bytes(len_buf)),
        received => Err(NmError::ShortRead {
            expected: 4,
            received,
        }),
    }
}

/// Encode any serde-serializable value into the native-messaging frame:
/// 4-byte native-endian length + JSON bytes.
pub fn encode_message<T: Serialize>(msg: &T) -> Result<Vec<u8>, NmError> {
    let json = serde_json::to_vec(msg).map_err(NmError::SerializeJson)?;
    if json.len() > MAX_TO_BROWSER {
        return Err(NmError::OutgoingTooLarge {
            len: json.len(),
            max: MAX_TO_BROWSER,
        });
    }
    let mut out = Vec::with_capacity(4 + json.len());
    out.extend_from_slice(&(json.len() as u32).to_ne_bytes());
    out.extend_from_slice(&json);
    Ok(out)
}

/// Decode a single framed message from a reader, returning the raw JSON text.
///
/// `max_size` is clamped to [`MAX_FROM_BROWSER`]; oversized frames are rejected before
/// the body is read.
pub fn decode_message<R: Read>(reader: &mut R, max_size: usize) -> Result<String, NmError> {
    let len = read_exact_u32_len(&mut *reader)? as usize;
    let cap = max_size.min(MAX_FROM_BROWSER);
    if len > cap {
        return Err(NmError::TooLarge { len, max: cap });
    }
    let mut buf = vec![0u8; len];
    let received = read_full(reader, &mut buf)?;
    if received < len {
        return Err(NmError::ShortRead {
            expected: len,
            received,
        });
    }
    Ok(String::from_utf8(buf)?)
}

/// Read one message and parse it as JSON.
///
/// Returns `Ok(None)` when the stream was already closed (no bytes at all).
pub fn read_message<R: Read>(reader: &mut R) -> Result<Option<Value>, NmError> {
    match decode_message(reader, MAX_FROM_BROWSER) {
        Ok(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(NmError::DeserializeJson),
        Err(NmError::Disconnected) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write one framed message and flush, so the reader sees it before we return.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> Result<(), NmError> {
    let frame = encode_message(msg)?;
    write_frame(writer, &frame)
}

/// Write an already-encoded frame and flush.
pub fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<(), NmError> {
    writer.write_all(frame)?;
    writer.flush()?;
    Ok(())
}

fn join_error(e: tokio::task::JoinError) -> NmError {
    NmError::Io(io::Error::other(e))
}

/// Read one message from stdin on the blocking pool.
pub async fn get_message() -> Result<Option<Value>, NmError> {
    tokio::task::spawn_blocking(move || {
        let mut stdin = io::stdin().lock();
        read_message(&mut stdin)
    })
    .await
    .map_err(join_error)?
}

/// Write one pre-encoded frame to stdout on the blocking pool.
pub async fn send_frame(frame: Vec<u8>) -> Result<(), NmError> {
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout().lock();
        write_frame(&mut stdout, &frame)
    })
    .await
    .map_err(join_error)?
}

/// Encode `msg` and write it to stdout.
pub async fn send_message<T: Serialize>(msg: &T) -> Result<(), NmError> {
    let frame = encode_message(msg)?;
    send_frame(frame).await
}
