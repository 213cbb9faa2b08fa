//! A standard 52-card deck.

use rand::seq::SliceRandom;

use crate::game::card::{Card, Suit};

/// A deck of cards. The end of the internal vector is the top of the deck;
/// drawing strictly shrinks it — the deck is never replenished.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full, ordered 52-card deck (suit-major, ranks 1..=13).
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in 1..=13 {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Builds a deck with a predetermined order. The *end* of the slice is
    /// the top of the deck, i.e. the first card drawn. Used for scripted
    /// rounds in tests and demos.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Shuffles in place with a uniform random permutation.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Draws the top card. Deck exhaustion is not handled: 52 cards are
    /// assumed sufficient for any reachable round.
    pub fn draw(&mut self) -> Card {
        self.cards.pop().expect("deck exhausted")
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
