//! # bj-core
//!
//! Shared library for LAN Blackjack containing the wire protocol codec,
//! the card-game engine, and the session sequencing state machines.
//!
//! This crate is used by both the server and client applications.
//! It opens no sockets and reads no input; everything here is driven by the
//! binaries in `bj-server` and `bj-client`.
//!
//! - **`protocol`** – How bytes travel over the network. Four fixed-length
//!   message kinds (Offer, Request, Decision, card payload), all big-endian,
//!   each prefixed with a 4-byte magic cookie and a 1-byte type tag.
//!
//! - **`game`** – The blackjack round engine: deck, hands, the
//!   player-turn/dealer-turn state machine, and round outcomes. Pure logic;
//!   it opens no sockets and encodes no bytes.
//!
//! - **`session`** – The contract that binds the two. Card payloads carry no
//!   "whose card is this" field, so both sides run a small state machine
//!   that attributes each payload purely by its position in the stream.
//!   The server-side [`session::RoundSequencer`] emits payloads in the
//!   agreed order; the client-side [`session::RoundMirror`] reconstructs
//!   hand state from that order alone.

pub mod game;
pub mod protocol;
pub mod session;

pub use game::{blackjack_sum, Card, Deck, Hand, Outcome, Round, RoundState, Suit};
pub use protocol::codec::WireError;
pub use protocol::messages::{CardPayload, Decision, Offer, Request, ResultCode, WireSuit};
pub use protocol::transport::{FrameError, TransportError};
pub use session::{GameSession, RoundMirror, RoundSequencer, SessionStats};
