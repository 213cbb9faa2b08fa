//! Session layer shared by server and client.
//!
//! The wire never names an addressee for a card payload; both ends rely on
//! the same positional contract. [`RoundSequencer`] is the server half that
//! emits payloads in the agreed order, [`RoundMirror`] is the client half
//! that attributes them. [`GameSession`] tracks the multi-round tally.

pub mod client;
pub mod server;

pub use client::{Expecting, RoundMirror, SequenceError};
pub use server::RoundSequencer;

use crate::game::{Outcome, Round, Suit};
use crate::protocol::messages::{ResultCode, WireSuit};

/// Maps the engine's suit numbering to the wire numbering.
///
/// The two orderings differ on every variant; this table and [`engine_suit`]
/// are the only places the mismatch is allowed to exist.
pub fn wire_suit(suit: Suit) -> WireSuit {
    match suit {
        Suit::Spade => WireSuit::Spade,
        Suit::Heart => WireSuit::Heart,
        Suit::Diamond => WireSuit::Diamond,
        Suit::Club => WireSuit::Club,
    }
}

/// Inverse of [`wire_suit`].
pub fn engine_suit(suit: WireSuit) -> Suit {
    match suit {
        WireSuit::Spade => Suit::Spade,
        WireSuit::Heart => Suit::Heart,
        WireSuit::Diamond => Suit::Diamond,
        WireSuit::Club => Suit::Club,
    }
}

/// Result byte for a round's current standing: `NotOver` while the round is
/// live, the terminal code once an outcome exists.
pub fn result_code(outcome: Option<Outcome>) -> ResultCode {
    match outcome {
        None => ResultCode::NotOver,
        Some(Outcome::Win) | Some(Outcome::Blackjack) => ResultCode::Win,
        Some(Outcome::Loss) => ResultCode::Loss,
        Some(Outcome::Tie) => ResultCode::Tie,
    }
}

/// Win/loss/tie tally for a finished (or in-progress) session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl SessionStats {
    /// Fraction of played rounds won, in `[0, 1]`. Zero rounds yields 0.0.
    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.rounds_played)
        }
    }
}

/// Server-side multi-round session: hands out rounds up to the requested
/// count and accumulates the tally.
#[derive(Debug)]
pub struct GameSession {
    num_rounds: u8,
    rounds_started: u8,
    stats: SessionStats,
}

impl GameSession {
    pub fn new(num_rounds: u8) -> Self {
        Self {
            num_rounds,
            rounds_started: 0,
            stats: SessionStats::default(),
        }
    }

    pub fn num_rounds(&self) -> u8 {
        self.num_rounds
    }

    pub fn rounds_started(&self) -> u8 {
        self.rounds_started
    }

    /// Starts the next round with a fresh shuffled deck, or `None` once the
    /// requested number of rounds has been played.
    pub fn start_next_round(&mut self) -> Option<Round> {
        if self.rounds_started >= self.num_rounds {
            return None;
        }
        self.rounds_started += 1;
        Some(Round::start())
    }

    /// Records a finished round's outcome in the tally.
    pub fn record(&mut self, outcome: Outcome) {
        self.stats.rounds_played += 1;
        match outcome {
            Outcome::Win | Outcome::Blackjack => self.stats.wins += 1,
            Outcome::Loss => self.stats.losses += 1,
            Outcome::Tie => self.stats.ties += 1,
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
