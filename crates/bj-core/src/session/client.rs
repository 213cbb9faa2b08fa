//! Client half of the positional ordering contract.
//!
//! Incoming card payloads name no owner; [`RoundMirror`] attributes each one
//! by tracking where the round stands. The mirror is deliberately explicit
//! about what it expects next, so a payload arriving out of turn is caught
//! instead of silently mis-attributed.

use thiserror::Error;

use crate::game::{blackjack_sum, Card};
use crate::protocol::messages::{CardPayload, Decision, ResultCode};
use crate::session::engine_suit;

/// What the mirror expects the next event to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expecting {
    /// First card of the opening triple (player's).
    PlayerFirst,
    /// Second card of the opening triple (dealer's up-card).
    DealerUp,
    /// Third card of the opening triple (player's).
    PlayerSecond,
    /// No payload: the local user owes a HIT/STAND.
    Decision,
    /// One card answering a HIT (player's).
    PlayerHit,
    /// Dealer cards streaming in after a STAND, until one carries a final
    /// result code.
    DealerPlay,
    /// Round settled; nothing more may arrive.
    Finished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("card payload arrived while expecting {0:?}")]
    UnexpectedPayload(Expecting),
    #[error("decision recorded while expecting {0:?}")]
    NotAwaitingDecision(Expecting),
}

/// Client-side replica of one round, built purely from payload order.
#[derive(Debug)]
pub struct RoundMirror {
    expecting: Expecting,
    player: Vec<Card>,
    dealer: Vec<Card>,
    result: Option<ResultCode>,
}

impl Default for RoundMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundMirror {
    pub fn new() -> Self {
        Self {
            expecting: Expecting::PlayerFirst,
            player: Vec::new(),
            dealer: Vec::new(),
            result: None,
        }
    }

    pub fn expecting(&self) -> Expecting {
        self.expecting
    }

    /// Attributes one incoming payload and advances the expectation.
    ///
    /// A final result code ends the round no matter where it shows up; the
    /// server only promises one on the payloads the contract marks terminal,
    /// but honoring it anywhere keeps the two ends from deadlocking if they
    /// ever disagree.
    pub fn ingest(&mut self, payload: CardPayload) -> Result<(), SequenceError> {
        let card = Card::new(payload.rank, engine_suit(payload.suit));
        let next = match self.expecting {
            Expecting::PlayerFirst => {
                self.player.push(card);
                Expecting::DealerUp
            }
            Expecting::DealerUp => {
                self.dealer.push(card);
                Expecting::PlayerSecond
            }
            Expecting::PlayerSecond => {
                self.player.push(card);
                Expecting::Decision
            }
            Expecting::PlayerHit => {
                self.player.push(card);
                Expecting::Decision
            }
            Expecting::DealerPlay => {
                self.dealer.push(card);
                Expecting::DealerPlay
            }
            Expecting::Decision | Expecting::Finished => {
                return Err(SequenceError::UnexpectedPayload(self.expecting));
            }
        };
        self.expecting = if payload.result.is_final() {
            self.result = Some(payload.result);
            Expecting::Finished
        } else {
            next
        };
        Ok(())
    }

    /// Records the decision the local user just sent, so the mirror knows
    /// whether the next payload is a player card or the dealer's.
    pub fn decided(&mut self, decision: Decision) -> Result<(), SequenceError> {
        if self.expecting != Expecting::Decision {
            return Err(SequenceError::NotAwaitingDecision(self.expecting));
        }
        self.expecting = match decision {
            Decision::Hit => Expecting::PlayerHit,
            Decision::Stand => Expecting::DealerPlay,
        };
        Ok(())
    }

    pub fn player_cards(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer
    }

    pub fn player_sum(&self) -> u8 {
        blackjack_sum(self.player.iter().map(|c| c.rank))
    }

    pub fn dealer_sum(&self) -> u8 {
        blackjack_sum(self.dealer.iter().map(|c| c.rank))
    }

    /// The final result once the round is over.
    pub fn result(&self) -> Option<ResultCode> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.expecting == Expecting::Finished
    }

    /// True when the next move is the local user's.
    pub fn awaiting_decision(&self) -> bool {
        self.expecting == Expecting::Decision
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Suit;
    use crate::protocol::messages::WireSuit;

    fn p(rank: u8, suit: WireSuit, result: ResultCode) -> CardPayload {
        CardPayload { result, rank, suit }
    }

    #[test]
    fn test_opening_triple_attributes_player_dealer_player() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(10, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(6, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(8, WireSuit::Diamond, ResultCode::NotOver)).unwrap();

        assert_eq!(mirror.player_cards().len(), 2);
        assert_eq!(mirror.dealer_cards().len(), 1);
        assert_eq!(mirror.player_sum(), 18);
        assert_eq!(mirror.dealer_sum(), 6);
        assert!(mirror.awaiting_decision());
    }

    #[test]
    fn test_wire_suits_convert_to_engine_suits() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(1, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        assert_eq!(mirror.player_cards()[0].suit, Suit::Heart);
    }

    #[test]
    fn test_blackjack_on_third_payload_finishes_the_round() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(1, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(9, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(13, WireSuit::Club, ResultCode::Win)).unwrap();

        assert!(mirror.is_over());
        assert_eq!(mirror.result(), Some(ResultCode::Win));
        assert_eq!(mirror.player_sum(), 21);
        assert!(!mirror.awaiting_decision());
    }

    #[test]
    fn test_hit_card_goes_to_the_player() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(10, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(9, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(5, WireSuit::Diamond, ResultCode::NotOver)).unwrap();
        mirror.decided(Decision::Hit).unwrap();
        mirror.ingest(p(13, WireSuit::Heart, ResultCode::Loss)).unwrap();

        assert_eq!(mirror.player_cards().len(), 3);
        assert_eq!(mirror.dealer_cards().len(), 1);
        assert_eq!(mirror.player_sum(), 25);
        assert_eq!(mirror.result(), Some(ResultCode::Loss));
    }

    #[test]
    fn test_hit_below_21_returns_to_decision() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(5, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(9, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(6, WireSuit::Diamond, ResultCode::NotOver)).unwrap();
        mirror.decided(Decision::Hit).unwrap();
        mirror.ingest(p(7, WireSuit::Heart, ResultCode::NotOver)).unwrap();

        assert!(mirror.awaiting_decision());
        assert_eq!(mirror.player_sum(), 18);
    }

    #[test]
    fn test_stand_attributes_every_following_card_to_the_dealer() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(10, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(6, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(8, WireSuit::Diamond, ResultCode::NotOver)).unwrap();
        mirror.decided(Decision::Stand).unwrap();
        mirror.ingest(p(10, WireSuit::Club, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(5, WireSuit::Heart, ResultCode::Loss)).unwrap();

        assert_eq!(mirror.dealer_cards().len(), 3);
        assert_eq!(mirror.dealer_sum(), 21);
        assert_eq!(mirror.player_cards().len(), 2);
        assert!(mirror.is_over());
        assert_eq!(mirror.result(), Some(ResultCode::Loss));
    }

    #[test]
    fn test_payload_while_awaiting_decision_is_rejected() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(10, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(6, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(8, WireSuit::Diamond, ResultCode::NotOver)).unwrap();

        assert_eq!(
            mirror.ingest(p(2, WireSuit::Club, ResultCode::NotOver)),
            Err(SequenceError::UnexpectedPayload(Expecting::Decision))
        );
    }

    #[test]
    fn test_payload_after_finish_is_rejected() {
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(1, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(9, WireSuit::Heart, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(13, WireSuit::Club, ResultCode::Win)).unwrap();

        assert!(mirror.ingest(p(2, WireSuit::Club, ResultCode::NotOver)).is_err());
    }

    #[test]
    fn test_decision_out_of_turn_is_rejected() {
        let mut mirror = RoundMirror::new();
        assert_eq!(
            mirror.decided(Decision::Hit),
            Err(SequenceError::NotAwaitingDecision(Expecting::PlayerFirst))
        );
    }

    #[test]
    fn test_early_final_result_finishes_defensively() {
        // The contract never marks the dealer up-card terminal, but a final
        // code still closes the round rather than leaving the client hung.
        let mut mirror = RoundMirror::new();
        mirror.ingest(p(10, WireSuit::Spade, ResultCode::NotOver)).unwrap();
        mirror.ingest(p(6, WireSuit::Heart, ResultCode::Tie)).unwrap();
        assert!(mirror.is_over());
        assert_eq!(mirror.result(), Some(ResultCode::Tie));
    }
}
