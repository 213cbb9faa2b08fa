//! Drives one client's whole session over any blocking byte stream.
//!
//! The flow per connection: read the 38-byte request, then for each round
//! send the opening triple, exchange decision/payload frames until the round
//! settles, and tally the outcome. The stream type is generic so tests can
//! run a full session against an in-memory script.

use std::io::{Read, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use bj_core::game::EngineError;
use bj_core::protocol::codec::encode_card;
use bj_core::protocol::messages::Decision;
use bj_core::protocol::transport::{read_decision, read_request, send_bytes, FrameError};
use bj_core::protocol::WireError;
use bj_core::session::{GameSession, RoundSequencer, SessionStats};

/// Ways a session can end before its rounds are played out.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("codec failure: {0}")]
    Wire(#[from] WireError),
    #[error("send failed: {0}")]
    Send(#[from] bj_core::protocol::transport::TransportError),
    #[error("round sequencing failure: {0}")]
    Engine(#[from] EngineError),
}

/// Plays an entire session with one client.
///
/// Returns the team name from the handshake together with the final tally.
/// A request for zero rounds is honored as-is: the handshake is read, no
/// round is played, and the session ends cleanly.
pub fn run_session<S: Read + Write>(mut stream: S) -> Result<(String, SessionStats), SessionError> {
    let request = read_request(&mut stream)?;
    info!(
        "team \"{}\" requested {} round(s)",
        request.team_name, request.rounds
    );

    let mut session = GameSession::new(request.rounds);
    while let Some(round) = session.start_next_round() {
        let number = session.rounds_started();
        debug!("round {number} of {} starting", session.num_rounds());

        let mut sequencer = RoundSequencer::new(round);
        let outcome = play_round(&mut stream, &mut sequencer)?;
        info!("round {number} finished: {outcome:?}");
        session.record(outcome);
    }

    let stats = session.stats();
    info!(
        "session over for \"{}\": {} won, {} lost, {} tied",
        request.team_name, stats.wins, stats.losses, stats.ties
    );
    Ok((request.team_name, stats))
}

/// Plays one round to completion over `io`.
///
/// An unreadable decision literal is treated as STAND: the frame itself was
/// well-formed, so the conversation stays in lockstep, and standing is the
/// move that ends the round fastest.
fn play_round<S: Read + Write>(
    io: &mut S,
    sequencer: &mut RoundSequencer,
) -> Result<bj_core::game::Outcome, SessionError> {
    for payload in sequencer.begin() {
        send_bytes(io, &encode_card(&payload)?)?;
    }

    while sequencer.needs_decision() {
        let decision = match read_decision(io) {
            Ok(decision) => decision,
            Err(FrameError::Wire(WireError::UnknownDecision(literal))) => {
                warn!(
                    "unrecognized decision literal {:?}, standing the player",
                    String::from_utf8_lossy(&literal)
                );
                Decision::Stand
            }
            Err(e) => return Err(e.into()),
        };
        debug!("client decided: {decision:?}");

        for payload in sequencer.apply(decision)? {
            send_bytes(io, &encode_card(&payload)?)?;
        }
    }

    // A round leaves the decision loop only once it is settled.
    sequencer
        .outcome()
        .ok_or(SessionError::Engine(EngineError::NotPlayersTurn(
            bj_core::game::RoundState::RoundOver,
        )))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bj_core::game::{Card, Deck, Outcome, Round, Suit};
    use bj_core::protocol::codec::{decode_card, encode_decision, encode_request};
    use bj_core::protocol::messages::{
        Request, ResultCode, CARD_PAYLOAD_LEN, DECISION_LEN, DECISION_PAYLOAD_LEN, MAGIC_COOKIE,
    };
    use std::io::Cursor;

    /// In-memory peer: reads from a pre-built script, captures all writes.
    struct ScriptedClient {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl ScriptedClient {
        fn new(input: Vec<u8>) -> Self {
            Self {
                input: Cursor::new(input),
                output: Vec::new(),
            }
        }

        /// Splits the captured output into 9-byte card frames and decodes
        /// them.
        fn sent_cards(&self) -> Vec<bj_core::protocol::messages::CardPayload> {
            assert_eq!(self.output.len() % CARD_PAYLOAD_LEN, 0);
            self.output
                .chunks(CARD_PAYLOAD_LEN)
                .map(|chunk| decode_card(chunk).unwrap())
                .collect()
        }
    }

    impl Read for ScriptedClient {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for ScriptedClient {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn c(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Deck dealing player, dealer, player, dealer, then `extra`.
    fn scripted(deal: [Card; 4], extra: &[Card]) -> Deck {
        let mut cards: Vec<Card> = extra.to_vec();
        cards.extend(deal.iter().rev());
        Deck::from_cards(cards)
    }

    #[test]
    fn test_zero_round_request_ends_cleanly_with_empty_tally() {
        let request = encode_request(&Request {
            rounds: 0,
            team_name: "idlers".to_string(),
        });
        let mut client = ScriptedClient::new(request.to_vec());

        let (team, stats) = run_session(&mut client).unwrap();
        assert_eq!(team, "idlers");
        assert_eq!(stats, SessionStats::default());
        assert!(client.output.is_empty());
    }

    #[test]
    fn test_disconnect_before_request_fails_the_session() {
        let mut client = ScriptedClient::new(Vec::new());
        assert!(run_session(&mut client).is_err());
    }

    #[test]
    fn test_blackjack_round_sends_three_payloads_and_reads_nothing() {
        let deck = scripted(
            [
                c(1, Suit::Spade),
                c(9, Suit::Heart),
                c(13, Suit::Club),
                c(9, Suit::Diamond),
            ],
            &[],
        );
        let mut sequencer = RoundSequencer::new(Round::start_with_deck(deck));
        let mut client = ScriptedClient::new(Vec::new());

        let outcome = play_round(&mut client, &mut sequencer).unwrap();
        assert_eq!(outcome, Outcome::Blackjack);

        let cards = client.sent_cards();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].result, ResultCode::Win);
    }

    #[test]
    fn test_stand_round_streams_dealer_cards_after_the_decision() {
        // Player 18, dealer 6 + 10 draws a 5: two dealer payloads, Loss last.
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(6, Suit::Heart),
                c(8, Suit::Diamond),
                c(10, Suit::Club),
            ],
            &[c(5, Suit::Heart)],
        );
        let mut sequencer = RoundSequencer::new(Round::start_with_deck(deck));
        let mut client = ScriptedClient::new(encode_decision(Decision::Stand).to_vec());

        let outcome = play_round(&mut client, &mut sequencer).unwrap();
        assert_eq!(outcome, Outcome::Loss);

        let cards = client.sent_cards();
        assert_eq!(cards.len(), 5); // opening triple + hole card + draw
        assert_eq!(cards[3].result, ResultCode::NotOver);
        assert_eq!(cards[4].result, ResultCode::Loss);
    }

    #[test]
    fn test_unrecognized_decision_literal_is_played_as_stand() {
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(10, Suit::Heart),
                c(8, Suit::Diamond),
                c(7, Suit::Club),
            ],
            &[],
        );
        let mut sequencer = RoundSequencer::new(Round::start_with_deck(deck));

        // Well-formed frame, nonsense literal.
        let mut frame = [0u8; DECISION_PAYLOAD_LEN];
        frame[0..4].copy_from_slice(&MAGIC_COOKIE.to_be_bytes());
        frame[4] = 0x4;
        frame[5..5 + DECISION_LEN].copy_from_slice(b"Foooo");
        let mut client = ScriptedClient::new(frame.to_vec());

        let outcome = play_round(&mut client, &mut sequencer).unwrap();
        assert_eq!(outcome, Outcome::Win); // 18 beats a pat 17
    }

    #[test]
    fn test_disconnect_while_awaiting_decision_fails_the_round() {
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(10, Suit::Heart),
                c(8, Suit::Diamond),
                c(7, Suit::Club),
            ],
            &[],
        );
        let mut sequencer = RoundSequencer::new(Round::start_with_deck(deck));
        let mut client = ScriptedClient::new(Vec::new());

        assert!(play_round(&mut client, &mut sequencer).is_err());
        // The opening triple still went out before the failure.
        assert_eq!(client.sent_cards().len(), 3);
    }
}
