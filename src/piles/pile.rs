//! Board piles and lifted candidates.

use crate::core::card::{Card, Rank};
use crate::core::config::{Orientation, PileId, PileKind, PileSpec, Slot};
use crate::rules::PileRules;

use super::layout::{Layout, Rect};
use super::primitives::{self, CardStack};

/// A named pile on the board.
///
/// The pile's behaviour (`rules`) and `layout` are bound from the game's
/// lookup table when the game is dealt or loaded. Only the data fields are
/// ever persisted.
#[derive(Clone, Debug)]
pub struct Pile {
    key: &'static str,
    kind: PileKind,
    /// Grid position for the current orientation.
    pub slot: Slot,
    pub layout: Layout,
    /// Rank glyph drawn when the pile is empty.
    pub back: Option<Rank>,
    pub outline: bool,
    pub(crate) cards: Vec<Card>,
    pub(crate) rules: PileRules,
}

impl Pile {
    pub(crate) fn from_spec(spec: &PileSpec, rules: PileRules, orientation: Orientation) -> Self {
        Self {
            key: spec.key,
            kind: spec.kind,
            slot: spec.slot(orientation),
            layout: rules.layout,
            back: spec.back,
            outline: spec.outline,
            cards: Vec::new(),
            rules,
        }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    /// Cards, bottom first, dead ones included.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Physical card count, dead cards included. See [`primitives::size`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Behaviour bound to this pile.
    #[must_use]
    pub fn rules(&self) -> PileRules {
        self.rules
    }

    /// Replace the pile's contents. Used when dealing and to set up positions.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Lay the cards out inside `rect` and write the positions into them.
    ///
    /// `z` is the card's index so later cards draw above earlier ones.
    pub fn arrange(&mut self, rect: Rect, width: f32, height: f32) {
        let points = self.layout.positions(rect, width, height, &self.cards);
        for (i, (card, point)) in self.cards.iter_mut().zip(points).enumerate() {
            card.position.x = point.x;
            card.position.y = point.y;
            card.position.z = i as f32;
            card.size.width = width;
            card.size.height = height;
        }
    }

    /// Detach everything from `index` upwards.
    pub(crate) fn split_off(&mut self, index: usize) -> Vec<Card> {
        self.cards.split_off(index)
    }
}

impl CardStack for Pile {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}

/// Cards lifted off a pile by a split, waiting to be merged somewhere.
///
/// Cards keep their source order: index 0 is the touched card. A rejected
/// candidate goes back to `source` unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    source: PileId,
    kind: PileKind,
    cards: Vec<Card>,
}

impl Candidate {
    #[must_use]
    pub fn new(source: PileId, kind: PileKind, cards: Vec<Card>) -> Self {
        Self {
            source,
            kind,
            cards,
        }
    }

    /// Pile the cards were lifted from.
    #[must_use]
    pub fn source(&self) -> PileId {
        self.source
    }

    /// Kind of the source pile.
    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of lifted cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The touched card: lowest alive card in the candidate.
    #[must_use]
    pub fn lead(&self) -> Option<&Card> {
        primitives::bottom(self)
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl CardStack for Candidate {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}
