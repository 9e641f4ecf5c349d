//! Predicates and moves shared by several games.

use crate::core::card::{Card, Rank};
use crate::core::config::{PileId, PileKind};
use crate::piles::primitives::{self, CardStack};
use crate::piles::Candidate;
use crate::rules::game::lift;
use crate::rules::{Game, Hooks};

/// Points for turning a face-down tableau card.
pub const FLIP_SCORE: i32 = 5;

/// `true` if every adjacent pair descends by one rank and alternates colour.
pub fn alternating_run(cards: &[Card]) -> bool {
    cards
        .windows(2)
        .all(|w| w[1].is_one_below(&w[0]) && w[1].alternates(&w[0]))
}

/// `true` if every card is face-up and each pair descends by one in the same suit.
pub fn suited_run(cards: &[Card]) -> bool {
    cards.iter().all(|c| c.visible)
        && cards
            .windows(2)
            .all(|w| w[1].is_one_below(&w[0]) && w[1].suit == w[0].suit)
}

/// Classic foundation rule: same-suit successor, or an Ace on an empty pile.
pub fn builds_on_foundation(top: Option<&Card>, card: &Card) -> bool {
    match top {
        Some(top) => top.is_one_below(card) && top.suit == card.suit,
        None => card.rank == Rank::Ace,
    }
}

/// Lift only the top card, and only when `index` points at it.
pub fn split_top(game: &mut Game, pile: PileId, index: usize) -> Option<Candidate> {
    if primitives::top_index(game.pile(pile)) != Some(index) {
        return None;
    }
    Some(lift(game, pile, index))
}

/// Turn a face-down top card. Returns `true` if a card was flipped.
pub fn flip_top(game: &mut Game, pile: PileId, hooks: &mut dyn Hooks) -> bool {
    let Some(card) = primitives::top_mut(game.pile_mut(pile)) else {
        return false;
    };
    if card.visible {
        return false;
    }
    primitives::flip(Some(card));
    game.add_score(FLIP_SCORE, hooks);
    true
}

/// Flip the top of every pile of `kind`.
pub fn flip_all(game: &mut Game, kind: PileKind, hooks: &mut dyn Hooks) {
    for pile in game.ids_of(kind) {
        flip_top(game, pile, hooks);
    }
}

/// `true` if every pile of `kind` has no alive card.
pub fn all_empty(game: &Game, kind: PileKind) -> bool {
    game.ids_of(kind)
        .into_iter()
        .all(|id| primitives::empty(game.pile(id)))
}

/// `true` if every pile of `kind` holds a full suit.
pub fn all_full(game: &Game, kind: PileKind) -> bool {
    game.ids_of(kind)
        .into_iter()
        .all(|id| game.pile(id).cards().len() >= Rank::ALL.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Suit;

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank).face_up()
    }

    #[test]
    fn test_alternating_run() {
        let run = [
            up(Suit::Spades, Rank::Nine),
            up(Suit::Hearts, Rank::Eight),
            up(Suit::Clubs, Rank::Seven),
        ];
        assert!(alternating_run(&run));
        assert!(alternating_run(&run[..1]));

        let broken = [up(Suit::Spades, Rank::Nine), up(Suit::Clubs, Rank::Eight)];
        assert!(!alternating_run(&broken));

        let gap = [up(Suit::Spades, Rank::Nine), up(Suit::Hearts, Rank::Seven)];
        assert!(!alternating_run(&gap));
    }

    #[test]
    fn test_suited_run() {
        let run = [up(Suit::Hearts, Rank::Five), up(Suit::Hearts, Rank::Four)];
        assert!(suited_run(&run));

        let mixed = [up(Suit::Hearts, Rank::Five), up(Suit::Spades, Rank::Four)];
        assert!(!suited_run(&mixed));

        let hidden = [Card::new(Suit::Hearts, Rank::Five), up(Suit::Hearts, Rank::Four)];
        assert!(!suited_run(&hidden));
    }

    #[test]
    fn test_builds_on_foundation() {
        let ace = up(Suit::Diamonds, Rank::Ace);
        let two = up(Suit::Diamonds, Rank::Two);
        let black_two = up(Suit::Clubs, Rank::Two);

        assert!(builds_on_foundation(None, &ace));
        assert!(!builds_on_foundation(None, &two));
        assert!(builds_on_foundation(Some(&ace), &two));
        assert!(!builds_on_foundation(Some(&ace), &black_two));
        assert!(!builds_on_foundation(Some(&two), &ace));
    }
}
