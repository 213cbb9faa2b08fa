//! All LAN Blackjack wire message types and protocol constants.
//!
//! Every message begins with the 4-byte magic cookie and a 1-byte type tag.
//! All messages are fixed length; there is no framing header beyond that.

// ── Protocol constants ────────────────────────────────────────────────────────

/// Fixed sentinel value every message must begin with. Used to detect
/// protocol desynchronization.
pub const MAGIC_COOKIE: u32 = 0xABCD_DCBA;

/// Well-known UDP port clients listen on for server offers.
pub const OFFER_PORT: u16 = 13122;

/// Width of the fixed-length name fields (server name, team name).
pub const NAME_LEN: usize = 32;

/// Width of the decision literal field.
pub const DECISION_LEN: usize = 5;

/// Total length of an Offer message: cookie(4) + type(1) + port(2) + name(32).
pub const OFFER_LEN: usize = 4 + 1 + 2 + NAME_LEN;

/// Total length of a Request message: cookie(4) + type(1) + rounds(1) + name(32).
pub const REQUEST_LEN: usize = 4 + 1 + 1 + NAME_LEN;

/// Total length of a client Decision message: cookie(4) + type(1) + literal(5).
pub const DECISION_PAYLOAD_LEN: usize = 4 + 1 + DECISION_LEN;

/// Total length of a server card payload: cookie(4) + type(1) + result(1) +
/// rank(2) + suit(1).
pub const CARD_PAYLOAD_LEN: usize = 4 + 1 + 1 + 2 + 1;

// ── Message type tags ─────────────────────────────────────────────────────────

/// Type tag byte following the magic cookie in every message.
///
/// Decision and card payloads share the `Payload` tag; they are told apart
/// by direction and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Offer = 0x2,
    Request = 0x3,
    Payload = 0x4,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x2 => Ok(MessageType::Offer),
            0x3 => Ok(MessageType::Request),
            0x4 => Ok(MessageType::Payload),
            _ => Err(()),
        }
    }
}

// ── Result codes ──────────────────────────────────────────────────────────────

/// Round result code carried in every server card payload.
///
/// `NotOver` marks an intermediate card; the other three codes terminate the
/// round and appear only on the final payload of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultCode {
    NotOver = 0x0,
    Tie = 0x1,
    Loss = 0x2,
    Win = 0x3,
}

impl ResultCode {
    /// Returns `true` for the three terminating codes.
    pub fn is_final(self) -> bool {
        self != ResultCode::NotOver
    }
}

impl TryFrom<u8> for ResultCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(ResultCode::NotOver),
            0x1 => Ok(ResultCode::Tie),
            0x2 => Ok(ResultCode::Loss),
            0x3 => Ok(ResultCode::Win),
            _ => Err(()),
        }
    }
}

// ── Wire suit encoding ────────────────────────────────────────────────────────

/// Suit numbering used on the wire (HDCS order).
///
/// This is deliberately a distinct type from the engine's
/// [`crate::game::Suit`] (SHDC order); the two numberings must never be
/// conflated. Conversion goes through [`crate::session::wire_suit`] and
/// [`crate::session::engine_suit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireSuit {
    Heart = 0,
    Diamond = 1,
    Club = 2,
    Spade = 3,
}

impl TryFrom<u8> for WireSuit {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WireSuit::Heart),
            1 => Ok(WireSuit::Diamond),
            2 => Ok(WireSuit::Club),
            3 => Ok(WireSuit::Spade),
            _ => Err(()),
        }
    }
}

// ── Player decisions ──────────────────────────────────────────────────────────

/// 5-byte ASCII literal meaning HIT.
pub const DECISION_HIT: &[u8; DECISION_LEN] = b"Hittt";

/// 5-byte ASCII literal meaning STAND.
pub const DECISION_STAND: &[u8; DECISION_LEN] = b"Stand";

/// A player's move, carried as one of two exact 5-byte literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

impl Decision {
    /// The exact wire literal for this decision.
    pub fn literal(self) -> &'static [u8; DECISION_LEN] {
        match self {
            Decision::Hit => DECISION_HIT,
            Decision::Stand => DECISION_STAND,
        }
    }

    /// Parses a 5-byte literal; anything but the two recognized values fails.
    pub fn from_literal(bytes: &[u8; DECISION_LEN]) -> Option<Self> {
        if bytes == DECISION_HIT {
            Some(Decision::Hit)
        } else if bytes == DECISION_STAND {
            Some(Decision::Stand)
        } else {
            None
        }
    }
}

// ── Message structs ───────────────────────────────────────────────────────────

/// Offer (UDP broadcast, 39 bytes): advertises the server's TCP port and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// TCP port the server accepts game connections on.
    pub tcp_port: u16,
    /// Server display name (truncated to 32 UTF-8 bytes on the wire).
    pub server_name: String,
}

/// Request (TCP handshake, 38 bytes): the client's opening message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Number of rounds to play. The wire admits 0..=255; the client UI only
    /// offers 1..=255.
    pub rounds: u8,
    /// Team display name (truncated to 32 UTF-8 bytes on the wire).
    pub team_name: String,
}

/// Server card payload (TCP, 9 bytes): one revealed card plus the round
/// result so far.
///
/// Note the absence of any addressee field: whose hand the card belongs to
/// is determined entirely by its position in the message stream (see
/// [`crate::session`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPayload {
    /// `NotOver` for intermediate cards; a final code ends the round.
    pub result: ResultCode,
    /// Card rank, 1..=13 (1 = Ace, 11..=13 = face cards).
    pub rank: u8,
    /// Card suit in wire (HDCS) numbering.
    pub suit: WireSuit,
}
