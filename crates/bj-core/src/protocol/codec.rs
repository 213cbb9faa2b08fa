//! Binary codec for encoding and decoding LAN Blackjack messages.
//!
//! Wire formats (all multi-byte integers big-endian):
//! ```text
//! Offer    (39): [cookie:4][type:1=0x2][tcp_port:2][server_name:32]
//! Request  (38): [cookie:4][type:1=0x3][rounds:1][team_name:32]
//! Decision (10): [cookie:4][type:1=0x4][literal:5]
//! Card     ( 9): [cookie:4][type:1=0x4][result:1][rank:2][suit:1]
//! ```
//!
//! Every `decode_*` function validates, in order: exact buffer length, magic
//! cookie, type tag, then field ranges. A failure at any step rejects the
//! whole message before any of it reaches game logic. `encode_*` applies the
//! same range checks so invalid bytes are never produced.

use thiserror::Error;

use crate::protocol::messages::{
    CardPayload, Decision, MessageType, Offer, Request, ResultCode, WireSuit, CARD_PAYLOAD_LEN,
    DECISION_LEN, DECISION_PAYLOAD_LEN, MAGIC_COOKIE, NAME_LEN, OFFER_LEN, REQUEST_LEN,
};

/// Errors that can occur during message encoding or decoding.
///
/// Framing failures (length/cookie/tag) and range failures are one category
/// to the caller: the message is rejected either way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The buffer is not exactly the fixed length for this message kind.
    #[error("bad {kind} length: {actual} (expected {expected})")]
    Length {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The first four bytes are not the magic cookie.
    #[error("bad magic cookie: 0x{0:08X}")]
    BadCookie(u32),

    /// The type tag does not match the expected tag for this message kind.
    #[error("bad message type: 0x{actual:02X} (expected 0x{expected:02X})")]
    BadMessageType { expected: u8, actual: u8 },

    /// Card rank outside 1..=13.
    #[error("rank must be in range 1..13, got {0}")]
    RankOutOfRange(u16),

    /// Card suit outside 0..=3.
    #[error("suit must be in range 0..3, got {0}")]
    SuitOutOfRange(u8),

    /// Result byte is not one of the four defined codes.
    #[error("unknown result code: 0x{0:02X}")]
    UnknownResultCode(u8),

    /// Decision field is not one of the two recognized 5-byte literals.
    #[error("unknown decision literal: {0:?}")]
    UnknownDecision([u8; DECISION_LEN]),
}

// ── Offer ─────────────────────────────────────────────────────────────────────

/// Encodes an [`Offer`] into its fixed 39-byte form.
pub fn encode_offer(offer: &Offer) -> [u8; OFFER_LEN] {
    let mut buf = [0u8; OFFER_LEN];
    write_header(&mut buf, MessageType::Offer);
    buf[5..7].copy_from_slice(&offer.tcp_port.to_be_bytes());
    write_fixed_str(&mut buf[7..7 + NAME_LEN], &offer.server_name);
    buf
}

/// Decodes an [`Offer`] from exactly 39 bytes.
///
/// # Errors
///
/// Returns [`WireError`] if the length, cookie, or type tag is wrong.
pub fn decode_offer(data: &[u8]) -> Result<Offer, WireError> {
    check_frame(data, "offer", OFFER_LEN, MessageType::Offer)?;
    let tcp_port = u16::from_be_bytes([data[5], data[6]]);
    let server_name = read_fixed_str(&data[7..7 + NAME_LEN]);
    Ok(Offer {
        tcp_port,
        server_name,
    })
}

// ── Request ───────────────────────────────────────────────────────────────────

/// Encodes a [`Request`] into its fixed 38-byte form.
pub fn encode_request(request: &Request) -> [u8; REQUEST_LEN] {
    let mut buf = [0u8; REQUEST_LEN];
    write_header(&mut buf, MessageType::Request);
    buf[5] = request.rounds;
    write_fixed_str(&mut buf[6..6 + NAME_LEN], &request.team_name);
    buf
}

/// Decodes a [`Request`] from exactly 38 bytes.
///
/// # Errors
///
/// Returns [`WireError`] if the length, cookie, or type tag is wrong.
pub fn decode_request(data: &[u8]) -> Result<Request, WireError> {
    check_frame(data, "request", REQUEST_LEN, MessageType::Request)?;
    let rounds = data[5];
    let team_name = read_fixed_str(&data[6..6 + NAME_LEN]);
    Ok(Request { rounds, team_name })
}

// ── Decision ──────────────────────────────────────────────────────────────────

/// Encodes a [`Decision`] into its fixed 10-byte form.
pub fn encode_decision(decision: Decision) -> [u8; DECISION_PAYLOAD_LEN] {
    let mut buf = [0u8; DECISION_PAYLOAD_LEN];
    write_header(&mut buf, MessageType::Payload);
    buf[5..5 + DECISION_LEN].copy_from_slice(decision.literal());
    buf
}

/// Decodes a [`Decision`] from exactly 10 bytes.
///
/// # Errors
///
/// Returns [`WireError::UnknownDecision`] when the literal is neither
/// `"Hittt"` nor `"Stand"`, and the usual framing errors otherwise.
pub fn decode_decision(data: &[u8]) -> Result<Decision, WireError> {
    check_frame(data, "decision", DECISION_PAYLOAD_LEN, MessageType::Payload)?;
    let mut literal = [0u8; DECISION_LEN];
    literal.copy_from_slice(&data[5..5 + DECISION_LEN]);
    Decision::from_literal(&literal).ok_or(WireError::UnknownDecision(literal))
}

// ── Card payload ──────────────────────────────────────────────────────────────

/// Encodes a [`CardPayload`] into its fixed 9-byte form.
///
/// # Errors
///
/// Returns [`WireError::RankOutOfRange`] for a rank outside 1..=13; the
/// codec refuses to produce invalid bytes.
pub fn encode_card(payload: &CardPayload) -> Result<[u8; CARD_PAYLOAD_LEN], WireError> {
    check_rank(u16::from(payload.rank))?;
    let mut buf = [0u8; CARD_PAYLOAD_LEN];
    write_header(&mut buf, MessageType::Payload);
    buf[5] = payload.result as u8;
    buf[6..8].copy_from_slice(&u16::from(payload.rank).to_be_bytes());
    buf[8] = payload.suit as u8;
    Ok(buf)
}

/// Decodes a [`CardPayload`] from exactly 9 bytes.
///
/// # Errors
///
/// Returns [`WireError`] for framing failures or for rank/suit/result values
/// outside their domains.
pub fn decode_card(data: &[u8]) -> Result<CardPayload, WireError> {
    check_frame(data, "card payload", CARD_PAYLOAD_LEN, MessageType::Payload)?;
    let result =
        ResultCode::try_from(data[5]).map_err(|_| WireError::UnknownResultCode(data[5]))?;
    let rank = u16::from_be_bytes([data[6], data[7]]);
    check_rank(rank)?;
    let suit = WireSuit::try_from(data[8]).map_err(|_| WireError::SuitOutOfRange(data[8]))?;
    Ok(CardPayload {
        result,
        rank: rank as u8,
        suit,
    })
}

// ── Shared validation ─────────────────────────────────────────────────────────

/// Checks buffer length, magic cookie, and type tag, in that order.
fn check_frame(
    data: &[u8],
    kind: &'static str,
    expected_len: usize,
    expected_type: MessageType,
) -> Result<(), WireError> {
    if data.len() != expected_len {
        return Err(WireError::Length {
            kind,
            expected: expected_len,
            actual: data.len(),
        });
    }
    let cookie = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if cookie != MAGIC_COOKIE {
        return Err(WireError::BadCookie(cookie));
    }
    if data[4] != expected_type as u8 {
        return Err(WireError::BadMessageType {
            expected: expected_type as u8,
            actual: data[4],
        });
    }
    Ok(())
}

fn check_rank(rank: u16) -> Result<(), WireError> {
    if (1..=13).contains(&rank) {
        Ok(())
    } else {
        Err(WireError::RankOutOfRange(rank))
    }
}

/// Writes the common cookie + type-tag prefix.
fn write_header(buf: &mut [u8], msg_type: MessageType) {
    buf[0..4].copy_from_slice(&MAGIC_COOKIE.to_be_bytes());
    buf[4] = msg_type as u8;
}

/// Writes `s` into `field` as UTF-8, truncated to the field width and
/// right-padded with NUL bytes.
fn write_fixed_str(field: &mut [u8], s: &str) {
    let bytes = s.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);
    for b in field[len..].iter_mut() {
        *b = 0;
    }
}

/// Reads a fixed-length string field: split at the first NUL, decode the
/// prefix as UTF-8. Malformed names are replaced, never fatal.
fn read_fixed_str(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
