//! Decks used while dealing.
//!
//! A `Deck` only exists during setup. Cards are dealt into piles with
//! [`Deck::draw`] and [`Deck::find`], after which the deck is discarded.

use super::card::{Card, Rank, Suit};
use super::rng::GameRng;

/// Ordered deck of cards. The end of the vector is the top.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A standard 52-card deck, suits in `Suit::ALL` order, Ace to King.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_copies(1)
    }

    /// `copies` standard decks concatenated (Spider uses two).
    #[must_use]
    pub fn with_copies(copies: usize) -> Self {
        let mut cards = Vec::with_capacity(52 * copies);
        for _ in 0..copies {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }
        Self { cards }
    }

    /// Uniform shuffle driven by the game's RNG.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the last `n` cards, top card first.
    ///
    /// Returns fewer than `n` cards if the deck runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.cards.pop() {
                Some(card) => out.push(card),
                None => break,
            }
        }
        out
    }

    /// Remove and return the first card of `rank` (and `suit`, when given).
    pub fn find(&mut self, rank: Rank, suit: Option<Suit>) -> Option<Card> {
        let index = self
            .cards
            .iter()
            .position(|c| c.rank == rank && suit.map_or(true, |s| c.suit == s))?;
        Some(self.cards.remove(index))
    }

    /// Cards left in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// `true` once every card has been dealt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
