//! One round of blackjack: deal, player turn, dealer auto-play, outcome.

use thiserror::Error;

use crate::game::deck::Deck;
use crate::game::hand::Hand;
use crate::protocol::messages::Decision;

/// Phase of the round. No transition ever leaves `RoundOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    PlayerTurn,
    DealerTurn,
    RoundOver,
}

/// Terminal outcome of a round, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    /// A 21 on the initial two cards. Counts as a win for the session tally
    /// and maps to the WIN result code on the wire.
    Blackjack,
}

/// Defensive errors: these indicate a sequencing bug in the caller, not a
/// recoverable runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("decision applied while in {0:?}, not PlayerTurn")]
    NotPlayersTurn(RoundState),
}

/// A single round: one deck, two hands, the turn state machine.
///
/// The deal order in [`Round::start`] — player, dealer, player, dealer — is
/// part of the contract the sequencing layer depends on: the first three
/// payloads a client receives are player-1, dealer-up, player-2.
#[derive(Debug)]
pub struct Round {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    state: RoundState,
    outcome: Option<Outcome>,
    dealer_revealed: bool,
}

impl Round {
    /// Starts a round with a freshly shuffled standard deck.
    pub fn start() -> Self {
        let mut deck = Deck::standard();
        deck.shuffle();
        Self::start_with_deck(deck)
    }

    /// Starts a round drawing from `deck` as-is (no shuffle). Lets tests and
    /// demos script exact deals.
    pub fn start_with_deck(mut deck: Deck) -> Self {
        let mut player = Hand::new();
        let mut dealer = Hand::new();

        // Strict alternation: player, dealer, player, dealer.
        for _ in 0..2 {
            player.add(deck.draw());
            dealer.add(deck.draw());
        }

        // The blackjack check decides the state; a dealt 21 never enters
        // PlayerTurn.
        let (state, outcome) = if player.sum() == 21 {
            (RoundState::RoundOver, Some(Outcome::Blackjack))
        } else {
            (RoundState::PlayerTurn, None)
        };

        Self {
            deck,
            player,
            dealer,
            state,
            outcome,
            dealer_revealed: false,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Whether the dealer's hole card has been revealed yet.
    pub fn dealer_revealed(&self) -> bool {
        self.dealer_revealed
    }

    /// True while the round is waiting on a player decision.
    pub fn needs_player_decision(&self) -> bool {
        self.state == RoundState::PlayerTurn && !self.player.is_bust()
    }

    /// Applies a player decision.
    ///
    /// HIT draws one card; going over 21 loses immediately. STAND hands the
    /// round to the dealer and synchronously runs dealer auto-play to the
    /// round's end.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotPlayersTurn`] when called in any state but
    /// `PlayerTurn`.
    pub fn apply_decision(&mut self, decision: Decision) -> Result<(), EngineError> {
        if self.state != RoundState::PlayerTurn {
            return Err(EngineError::NotPlayersTurn(self.state));
        }
        match decision {
            Decision::Hit => {
                self.player.add(self.deck.draw());
                if self.player.is_bust() {
                    self.outcome = Some(Outcome::Loss);
                    self.state = RoundState::RoundOver;
                }
            }
            Decision::Stand => {
                self.state = RoundState::DealerTurn;
                self.play_dealer_turn();
            }
        }
        Ok(())
    }

    /// Dealer auto-play: reveal the hole card, draw while the soft-ace sum
    /// is below 17 (never once it is 17 or more), then settle the round.
    fn play_dealer_turn(&mut self) {
        self.dealer_revealed = true;
        while self.dealer.sum() < 17 {
            self.dealer.add(self.deck.draw());
        }

        self.outcome = Some(if self.dealer.is_bust() {
            Outcome::Win
        } else {
            match self.player.sum().cmp(&self.dealer.sum()) {
                std::cmp::Ordering::Greater => Outcome::Win,
                std::cmp::Ordering::Less => Outcome::Loss,
                std::cmp::Ordering::Equal => Outcome::Tie,
            }
        });
        self.state = RoundState::RoundOver;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
