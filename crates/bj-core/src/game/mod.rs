//! Blackjack round engine: cards, deck, hands, and the turn state machine.
//!
//! Everything here is pure game logic; the only wire type it consumes is
//! the shared [`Decision`](crate::protocol::messages::Decision) enum. Suit
//! numbering in this module is the *engine* order (SHDC), not the wire order.

pub mod card;
pub mod deck;
pub mod hand;
pub mod round;

pub use card::{Card, Suit};
pub use deck::Deck;
pub use hand::{blackjack_sum, Hand};
pub use round::{EngineError, Outcome, Round, RoundState};
