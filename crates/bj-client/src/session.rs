//! Plays the requested rounds over an established stream.
//!
//! Each round is a loop over the [`RoundMirror`]: read card payloads until
//! the table waits on the player, ask the [`DecisionSource`], send the
//! decision, keep reading. The stream and the decision source are both
//! generic so the whole session runs against in-memory fakes in tests.

use std::io::{Read, Write};

use thiserror::Error;
use tracing::debug;

use bj_core::protocol::codec::encode_decision;
use bj_core::protocol::messages::ResultCode;
use bj_core::protocol::transport::{read_card, send_bytes, FrameError, TransportError};
use bj_core::session::{RoundMirror, SequenceError, SessionStats};

use crate::prompt::DecisionSource;
use crate::table;

/// Ways a session can fail mid-play.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("send failed: {0}")]
    Send(#[from] TransportError),
    #[error("ordering contract broken: {0}")]
    Sequence(#[from] SequenceError),
    #[error("round ended without a result code")]
    MissingResult,
}

/// Plays `rounds` rounds against the dealer on `stream`.
///
/// Returns the tally. Fails fast on any protocol violation; a dealer that
/// breaks the ordering contract cannot be resynchronized with.
pub fn run_session<S, D>(
    stream: &mut S,
    rounds: u8,
    decisions: &mut D,
) -> Result<SessionStats, ClientError>
where
    S: Read + Write,
    D: DecisionSource,
{
    let mut stats = SessionStats::default();
    for number in 1..=u32::from(rounds) {
        println!("\n── Round {number} of {rounds} ──");
        let result = play_round(stream, decisions)?;
        stats.rounds_played += 1;
        match result {
            ResultCode::Win => stats.wins += 1,
            ResultCode::Loss => stats.losses += 1,
            ResultCode::Tie => stats.ties += 1,
            ResultCode::NotOver => return Err(ClientError::MissingResult),
        }
    }
    Ok(stats)
}

fn play_round<S, D>(stream: &mut S, decisions: &mut D) -> Result<ResultCode, ClientError>
where
    S: Read + Write,
    D: DecisionSource,
{
    let mut table = RoundMirror::new();
    while !table.is_over() {
        if table.awaiting_decision() {
            println!("{}", table::render(&table));
            let decision = decisions.choose(&table);
            debug!("sending decision: {decision:?}");
            send_bytes(stream, &encode_decision(decision))?;
            table.decided(decision)?;
        } else {
            let payload = read_card(stream)?;
            debug!("card payload: {payload:?}");
            table.ingest(payload)?;
        }
    }

    println!("{}", table::render(&table));
    let result = table.result().ok_or(ClientError::MissingResult)?;
    println!("{}", table::result_banner(result));
    Ok(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
