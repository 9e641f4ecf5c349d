//! Playing cards: suits, ranks, and the mutable per-card state.
//!
//! A `Card` is created once when a `Deck` is built and lives for the whole
//! session. Rules never destroy cards; they flip them (`visible`), select
//! them (`selected`), or retire them in place (`alive = false`).
//!
//! ## Liveness
//!
//! Dead cards stay physically inside their pile so positional arithmetic
//! (the pyramid's parent/child lookups) stays stable. Every pile primitive
//! skips dead cards when it looks for the top or bottom.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Clubs,
    Hearts,
    Diamonds,
    Spades,
}

impl Suit {
    /// All suits in deck construction order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Diamonds, Suit::Spades];

    /// The suit's colour.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }
}

/// Suit colour, used by the alternating-colour tableau rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, Ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, Ace to King.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Zero-based position in natural order (Ace = 0, King = 12).
    #[must_use]
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Face value, Ace = 1 through King = 13.
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32 + 1
    }
}

/// Board position of a card. `z` is the draw order within the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Rendered card size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 35.0,
        }
    }
}

/// Offset applied on top of the layout position, as a fraction of card size.
///
/// Pyramid raises selected cards with `y = SELECTION_OFFSET`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

/// A playing card with its mutable table state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// Face-up?
    pub visible: bool,
    /// Picked by the player (Pyramid pairing).
    pub selected: bool,
    /// `false` once the card has been removed from play.
    pub alive: bool,
    pub position: Position,
    pub size: Size,
    pub offset: Offset,
}

impl Card {
    /// Create a face-down, live card.
    #[must_use]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            visible: false,
            selected: false,
            alive: true,
            position: Position::default(),
            size: Size::default(),
            offset: Offset::default(),
        }
    }

    /// Builder-style face-up copy, handy when dealing fixtures.
    #[must_use]
    pub fn face_up(mut self) -> Self {
        self.visible = true;
        self
    }

    /// The card's colour.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// `true` if `self` sits one rank below `under` in natural order.
    #[must_use]
    pub fn is_one_below(&self, under: &Card) -> bool {
        under.rank.index() - self.rank.index() == 1
    }

    /// `true` if the two cards have different colours.
    #[must_use]
    pub fn alternates(&self, other: &Card) -> bool {
        self.color() != other.color()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} of {:?}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down_and_alive() {
        let card = Card::new(Suit::Hearts, Rank::Seven);

        assert!(!card.visible);
        assert!(!card.selected);
        assert!(card.alive);
        assert_eq!(card.size, Size::default());
    }

    #[test]
    fn test_colors() {
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
    }

    #[test]
    fn test_rank_values() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::Queen.index(), 11);
        assert_eq!(Rank::ALL.len(), 13);
    }

    #[test]
    fn test_one_below_and_alternates() {
        let nine = Card::new(Suit::Spades, Rank::Nine);
        let eight = Card::new(Suit::Hearts, Rank::Eight);
        let seven = Card::new(Suit::Hearts, Rank::Seven);

        assert!(eight.is_one_below(&nine));
        assert!(!seven.is_one_below(&nine));
        assert!(!nine.is_one_below(&eight));
        assert!(eight.alternates(&nine));
        assert!(!eight.alternates(&seven));
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(Suit::Diamonds, Rank::Queen).face_up();

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"DIAMONDS\""));
        assert!(json.contains("\"QUEEN\""));

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
