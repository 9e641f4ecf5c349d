//! Stateless card primitives shared by every rule module.
//!
//! All rules append and remove cards through these functions. They work on
//! anything that is a [`CardStack`]: board piles and lifted candidates alike.
//!
//! The end of a stack's vector is its top. Every lookup skips dead cards.

use crate::core::card::Card;

/// An ordered run of cards, bottom first.
pub trait CardStack {
    /// Cards, bottom first, including dead ones.
    fn cards(&self) -> &[Card];

    /// Mutable access for the primitives in this module.
    fn cards_mut(&mut self) -> &mut Vec<Card>;
}

/// Index of the top alive card.
pub fn top_index<S: CardStack + ?Sized>(pile: &S) -> Option<usize> {
    pile.cards().iter().rposition(|c| c.alive)
}

/// Index of the bottom alive card.
pub fn bottom_index<S: CardStack + ?Sized>(pile: &S) -> Option<usize> {
    pile.cards().iter().position(|c| c.alive)
}

/// The top alive card.
pub fn top<S: CardStack + ?Sized>(pile: &S) -> Option<&Card> {
    top_index(pile).map(|i| &pile.cards()[i])
}

/// Mutable top alive card.
pub fn top_mut<S: CardStack + ?Sized>(pile: &mut S) -> Option<&mut Card> {
    let index = top_index(pile)?;
    pile.cards_mut().get_mut(index)
}

/// The bottom alive card.
pub fn bottom<S: CardStack + ?Sized>(pile: &S) -> Option<&Card> {
    bottom_index(pile).map(|i| &pile.cards()[i])
}

/// Move every card from `from` onto `to`, one at a time from the top.
///
/// Reverses relative order. Call [`reverse`] on `from` first to keep it.
pub fn move_all<A, B>(from: &mut A, to: &mut B, visible: bool)
where
    A: CardStack + ?Sized,
    B: CardStack + ?Sized,
{
    while let Some(mut card) = from.cards_mut().pop() {
        card.visible = visible;
        to.cards_mut().push(card);
    }
}

/// Remove and return the top alive card. Dead cards above it stay put.
pub fn pop<S: CardStack + ?Sized>(pile: &mut S) -> Option<Card> {
    let index = top_index(pile)?;
    Some(pile.cards_mut().remove(index))
}

/// Reverse a stack in place.
pub fn reverse<S: CardStack + ?Sized>(pile: &mut S) -> &mut S {
    pile.cards_mut().reverse();
    pile
}

/// Number of alive cards.
pub fn size<S: CardStack + ?Sized>(pile: &S) -> usize {
    pile.cards().iter().filter(|c| c.alive).count()
}

/// `true` when no alive card remains.
pub fn empty<S: CardStack + ?Sized>(pile: &S) -> bool {
    !pile.cards().iter().any(|c| c.alive)
}

/// Turn a card face-up. No-op on `None`.
pub fn flip(card: Option<&mut Card>) {
    if let Some(card) = card {
        card.visible = true;
    }
}

impl CardStack for Vec<Card> {
    fn cards(&self) -> &[Card] {
        self
    }

    fn cards_mut(&mut self) -> &mut Vec<Card> {
        self
    }
}
