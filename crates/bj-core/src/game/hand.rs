//! A hand of cards and the soft-ace blackjack sum.

use crate::game::card::Card;

/// Computes the blackjack value of a set of ranks.
///
/// Aces start at 11; while the total exceeds 21 and an ace has not yet been
/// downgraded, 10 is subtracted per ace (at most once each). The sum is
/// recomputed from scratch on every call, so it is order-independent and
/// idempotent — both sides of the wire run this exact algorithm on the same
/// rank sequence and must agree.
pub fn blackjack_sum<I: IntoIterator<Item = u8>>(ranks: I) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0u8;
    for rank in ranks {
        if rank == 1 {
            aces += 1;
            total += 11;
        } else if rank > 10 {
            total += 10;
        } else {
            total += u16::from(rank);
        }
    }
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total as u8
}

/// An ordered hand of cards. Insertion order is significant: the first two
/// cards are the initial deal, later cards are draws, and the sequencing
/// layer relies on that ordering.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Soft-ace blackjack sum of the whole hand, recomputed from scratch.
    pub fn sum(&self) -> u8 {
        blackjack_sum(self.cards.iter().map(|c| c.rank))
    }

    pub fn is_bust(&self) -> bool {
        self.sum() > 21
    }
}
