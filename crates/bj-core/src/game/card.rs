//! A single playing card in engine numbering.

use std::fmt;

/// Suit numbering used inside the game engine (SHDC order).
///
/// Distinct from the wire's [`crate::protocol::messages::WireSuit`] (HDCS
/// order); conversion between the two goes through the explicit mapping in
/// [`crate::session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Suit {
    Spade = 0,
    Heart = 1,
    Diamond = 2,
    Club = 3,
}

impl Suit {
    /// All four suits in engine order.
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    fn symbol(self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }
}

/// One playing card. Immutable once created.
///
/// Ranks: 1 = Ace, 2..=10 numeric, 11 = Jack, 12 = Queen, 13 = King.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!((1..=13).contains(&rank), "rank out of range: {rank}");
        Self { rank, suit }
    }

    /// Blackjack value of this card: face cards count 10, the Ace counts 11
    /// here (the soft-ace downgrade to 1 happens in [`super::blackjack_sum`]).
    pub fn blackjack_value(self) -> u8 {
        match self.rank {
            1 => 11,
            r if r > 10 => 10,
            r => r,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            1 => write!(f, "A{}", self.suit.symbol()),
            11 => write!(f, "J{}", self.suit.symbol()),
            12 => write!(f, "Q{}", self.suit.symbol()),
            13 => write!(f, "K{}", self.suit.symbol()),
            r => write!(f, "{r}{}", self.suit.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_cards_are_worth_ten() {
        for rank in 11..=13 {
            assert_eq!(Card::new(rank, Suit::Club).blackjack_value(), 10);
        }
    }

    #[test]
    fn test_ace_is_worth_eleven() {
        assert_eq!(Card::new(1, Suit::Spade).blackjack_value(), 11);
    }

    #[test]
    fn test_number_cards_are_worth_their_rank() {
        for rank in 2..=10 {
            assert_eq!(Card::new(rank, Suit::Heart).blackjack_value(), rank);
        }
    }

    #[test]
    fn test_display_uses_letters_for_ace_and_faces() {
        assert_eq!(Card::new(1, Suit::Spade).to_string(), "A♠");
        assert_eq!(Card::new(10, Suit::Heart).to_string(), "10♥");
        assert_eq!(Card::new(13, Suit::Diamond).to_string(), "K♦");
    }
}
