//! Exact-length frame transport over blocking streams.
//!
//! The protocol has no length prefixes: both sides know the exact byte count
//! of the next message from the conversation state. The transport contract
//! is therefore "read exactly N bytes or fail" — a short read must never be
//! interpreted as a message.

use std::io::{Read, Write};

use thiserror::Error;

use crate::protocol::codec::{self, WireError};
use crate::protocol::messages::{
    CardPayload, Decision, Request, CARD_PAYLOAD_LEN, DECISION_PAYLOAD_LEN, REQUEST_LEN,
};

/// Errors from the exact-read primitive.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer closed the connection before the full frame arrived.
    #[error("connection closed while expecting {remaining} more byte(s)")]
    Closed { remaining: usize },

    /// Any other I/O failure on the stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A frame-level failure: either the bytes never arrived, or they arrived
/// but failed validation.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("protocol violation: {0}")]
    Wire(#[from] WireError),
}

/// Reads until `buf` is full, or fails.
///
/// # Errors
///
/// Returns [`TransportError::Closed`] if the stream reports end-of-stream
/// before the buffer is full; no partial frame is ever returned.
pub fn read_exact_frame<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), TransportError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(TransportError::Closed {
                remaining: buf.len() - filled,
            });
        }
        filled += n;
    }
    Ok(())
}

/// Reads and decodes one 38-byte [`Request`] handshake.
pub fn read_request<R: Read>(reader: &mut R) -> Result<Request, FrameError> {
    let mut buf = [0u8; REQUEST_LEN];
    read_exact_frame(reader, &mut buf)?;
    Ok(codec::decode_request(&buf)?)
}

/// Reads and decodes one 10-byte [`Decision`] message.
pub fn read_decision<R: Read>(reader: &mut R) -> Result<Decision, FrameError> {
    let mut buf = [0u8; DECISION_PAYLOAD_LEN];
    read_exact_frame(reader, &mut buf)?;
    Ok(codec::decode_decision(&buf)?)
}

/// Reads and decodes one 9-byte server [`CardPayload`].
pub fn read_card<R: Read>(reader: &mut R) -> Result<CardPayload, FrameError> {
    let mut buf = [0u8; CARD_PAYLOAD_LEN];
    read_exact_frame(reader, &mut buf)?;
    Ok(codec::decode_card(&buf)?)
}

/// Writes a full message and flushes the stream.
pub fn send_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), TransportError> {
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::codec::{encode_decision, encode_request};
    use std::io::Cursor;

    /// Reader that hands out one byte per call, to exercise short reads.
    struct Trickle(Vec<u8>, usize);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.1 >= self.0.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[self.1];
            self.1 += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_read_exact_frame_accumulates_across_short_reads() {
        let request = Request {
            rounds: 4,
            team_name: "trickle".to_string(),
        };
        let mut reader = Trickle(encode_request(&request).to_vec(), 0);
        let decoded = read_request(&mut reader).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_read_exact_frame_fails_on_early_close() {
        let request = Request {
            rounds: 4,
            team_name: "cut".to_string(),
        };
        let bytes = encode_request(&request);
        let mut reader = Cursor::new(&bytes[..REQUEST_LEN - 3]);
        match read_request(&mut reader) {
            Err(FrameError::Transport(TransportError::Closed { remaining })) => {
                assert_eq!(remaining, 3)
            }
            other => panic!("expected Closed, got {other:?}"),
        }
    }

    #[test]
    fn test_read_decision_rejects_garbage_after_full_read() {
        let mut bytes = encode_decision(Decision::Stand);
        bytes[5..10].copy_from_slice(b"ZZZZZ");
        let mut reader = Cursor::new(bytes.to_vec());
        assert!(matches!(
            read_decision(&mut reader),
            Err(FrameError::Wire(WireError::UnknownDecision(_)))
        ));
    }

    #[test]
    fn test_send_bytes_writes_everything() {
        let mut out = Vec::new();
        let bytes = encode_decision(Decision::Hit);
        send_bytes(&mut out, &bytes).unwrap();
        assert_eq!(out, bytes);
    }
}
