//! Server half of the positional ordering contract.
//!
//! Card payloads carry no addressee, so what each one *means* is fixed by
//! position: the round opens with player-1, dealer-up, player-2, a HIT is
//! answered by exactly one player card, and a STAND is answered by one
//! payload per dealer card not yet shown, the last carrying the outcome.

use tracing::warn;

use crate::game::{Card, EngineError, Outcome, Round, RoundState};
use crate::protocol::messages::{CardPayload, Decision, ResultCode};
use crate::session::{result_code, wire_suit};

/// Emits the wire payloads for one round in contract order.
#[derive(Debug)]
pub struct RoundSequencer {
    round: Round,
    /// Dealer cards already shown to the client. The up-card goes out with
    /// the opening triple, so this starts at 1 after [`begin`](Self::begin).
    dealer_sent: usize,
}

impl RoundSequencer {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            dealer_sent: 0,
        }
    }

    /// The opening triple: player-1, dealer-up, player-2.
    ///
    /// The first two always carry `NotOver`; the third carries the round's
    /// standing, so a dealt blackjack ends the round right here and the
    /// client must expect no further payloads.
    pub fn begin(&mut self) -> [CardPayload; 3] {
        let player = self.round.player_hand().cards();
        let dealer = self.round.dealer_hand().cards();
        self.dealer_sent = 1;
        [
            payload(player[0], ResultCode::NotOver),
            payload(dealer[0], ResultCode::NotOver),
            payload(player[1], result_code(self.round.outcome())),
        ]
    }

    /// Applies a client decision and returns the payloads it produces.
    ///
    /// A HIT yields exactly one payload. A STAND yields one payload per
    /// dealer card not yet shown; the last one carries the outcome. If the
    /// dealer somehow has nothing new to show while the round is settled,
    /// the most recent known card is re-sent so the terminating payload is
    /// never skipped.
    pub fn apply(&mut self, decision: Decision) -> Result<Vec<CardPayload>, EngineError> {
        self.round.apply_decision(decision)?;
        match decision {
            Decision::Hit => {
                let cards = self.round.player_hand().cards();
                let drawn = cards[cards.len() - 1];
                Ok(vec![payload(drawn, result_code(self.round.outcome()))])
            }
            Decision::Stand => Ok(self.dealer_payloads()),
        }
    }

    /// Payloads for every dealer card the client has not seen, outcome on
    /// the last.
    fn dealer_payloads(&mut self) -> Vec<CardPayload> {
        let dealer = self.round.dealer_hand().cards();
        let fresh = &dealer[self.dealer_sent..];
        self.dealer_sent = dealer.len();

        if fresh.is_empty() {
            // Every dealer card already went out. The client still needs a
            // terminating payload, so re-send the last known card.
            warn!("no unseen dealer cards at round end, re-sending last card");
            let last = self
                .round
                .dealer_hand()
                .cards()
                .last()
                .or_else(|| self.round.player_hand().cards().last())
                .copied();
            return match last {
                Some(card) => vec![payload(card, result_code(self.round.outcome()))],
                None => Vec::new(),
            };
        }

        let final_idx = fresh.len() - 1;
        fresh
            .iter()
            .enumerate()
            .map(|(i, &card)| {
                let code = if i == final_idx {
                    result_code(self.round.outcome())
                } else {
                    ResultCode::NotOver
                };
                payload(card, code)
            })
            .collect()
    }

    /// True while the round is waiting on the client's HIT/STAND.
    pub fn needs_decision(&self) -> bool {
        self.round.state() == RoundState::PlayerTurn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.round.outcome()
    }
}

fn payload(card: Card, result: ResultCode) -> CardPayload {
    CardPayload {
        result,
        rank: card.rank,
        suit: wire_suit(card.suit),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Deck, Suit};
    use crate::protocol::messages::{ResultCode, WireSuit};

    fn c(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Deck dealing `deal` in order (player, dealer, player, dealer), then
    /// `extra` for subsequent draws.
    fn scripted(deal: [Card; 4], extra: &[Card]) -> Deck {
        let mut cards: Vec<Card> = extra.to_vec();
        cards.extend(deal.iter().rev());
        Deck::from_cards(cards)
    }

    #[test]
    fn test_dealt_blackjack_ends_after_the_opening_triple() {
        // Player: ace of spades + king of clubs.
        let deck = scripted(
            [
                c(1, Suit::Spade),
                c(9, Suit::Heart),
                c(13, Suit::Club),
                c(9, Suit::Diamond),
            ],
            &[],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        let opening = seq.begin();

        assert_eq!(opening[0].result, ResultCode::NotOver);
        assert_eq!(opening[0].rank, 1);
        assert_eq!(opening[0].suit, WireSuit::Spade);
        assert_eq!(opening[1].result, ResultCode::NotOver);
        assert_eq!(opening[1].rank, 9);
        assert_eq!(opening[2].result, ResultCode::Win);
        assert_eq!(opening[2].rank, 13);
        assert!(!seq.needs_decision());
        assert_eq!(seq.outcome(), Some(Outcome::Blackjack));
    }

    #[test]
    fn test_hit_into_bust_yields_one_terminal_payload() {
        // Player at 15 hits into a king.
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(9, Suit::Heart),
                c(5, Suit::Diamond),
                c(9, Suit::Club),
            ],
            &[c(13, Suit::Heart)],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        let opening = seq.begin();
        assert_eq!(opening[2].result, ResultCode::NotOver);
        assert!(seq.needs_decision());

        let payloads = seq.apply(Decision::Hit).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].rank, 13);
        assert_eq!(payloads[0].suit, WireSuit::Heart);
        assert_eq!(payloads[0].result, ResultCode::Loss);
    }

    #[test]
    fn test_hit_below_21_yields_one_not_over_payload() {
        let deck = scripted(
            [
                c(5, Suit::Spade),
                c(9, Suit::Heart),
                c(6, Suit::Diamond),
                c(9, Suit::Club),
            ],
            &[c(7, Suit::Heart)],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        seq.begin();
        let payloads = seq.apply(Decision::Hit).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].result, ResultCode::NotOver);
        assert!(seq.needs_decision());
    }

    #[test]
    fn test_stand_streams_hole_card_and_draws_with_outcome_on_last() {
        // Player stands at 18; dealer shows 6, hole card 10, draws 5 -> 21.
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(6, Suit::Heart),
                c(8, Suit::Diamond),
                c(10, Suit::Club),
            ],
            &[c(5, Suit::Heart)],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        seq.begin();

        let payloads = seq.apply(Decision::Stand).unwrap();
        assert_eq!(payloads.len(), 2);
        // Hole card first, still not over.
        assert_eq!(payloads[0].rank, 10);
        assert_eq!(payloads[0].suit, WireSuit::Club);
        assert_eq!(payloads[0].result, ResultCode::NotOver);
        // Drawn 5 carries the outcome.
        assert_eq!(payloads[1].rank, 5);
        assert_eq!(payloads[1].result, ResultCode::Loss);
    }

    #[test]
    fn test_stand_with_pat_dealer_sends_only_the_hole_card() {
        // Dealer 10 + 7 = 17, no draw: one payload, terminal.
        let deck = scripted(
            [
                c(10, Suit::Spade),
                c(10, Suit::Heart),
                c(8, Suit::Diamond),
                c(7, Suit::Club),
            ],
            &[],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        seq.begin();
        let payloads = seq.apply(Decision::Stand).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].rank, 7);
        assert_eq!(payloads[0].result, ResultCode::Win); // 18 > 17
    }

    #[test]
    fn test_decision_after_round_over_propagates_engine_error() {
        let deck = scripted(
            [
                c(1, Suit::Spade),
                c(9, Suit::Heart),
                c(13, Suit::Club),
                c(9, Suit::Diamond),
            ],
            &[],
        );
        let mut seq = RoundSequencer::new(Round::start_with_deck(deck));
        seq.begin();
        assert!(seq.apply(Decision::Hit).is_err());
    }
}
