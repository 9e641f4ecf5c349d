//! Game configuration types.
//!
//! Games configure the engine by providing:
//! - `PileSpec`: the static pile table (key, kind, coordinates, empty glyph)
//! - `Board`: the grid size for each orientation
//! - `Options`: player-facing toggles such as `tripleDraw`
//!
//! The engine never hardcodes piles; each game module owns its table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Rank;

/// Identifier of a pile within a game: its index in the game's pile table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PileId(pub u8);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Index into the game's pile vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// The closed set of pile kinds.
///
/// A kind is the tag persisted with each pile. Behaviour is looked up from
/// `(game, kind)` when a game is dealt or loaded, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PileKind {
    Stock,
    Waste,
    Tableaux,
    Foundation,
    Cell,
    Pyramid,
    Temp,
    /// Calculation foundations, one per rank path.
    Ones,
    Twos,
    Threes,
    Fours,
}

impl PileKind {
    /// Every kind, in tag order.
    pub const ALL: [PileKind; 11] = [
        PileKind::Stock,
        PileKind::Waste,
        PileKind::Tableaux,
        PileKind::Foundation,
        PileKind::Cell,
        PileKind::Pyramid,
        PileKind::Temp,
        PileKind::Ones,
        PileKind::Twos,
        PileKind::Threes,
        PileKind::Fours,
    ];

    /// The persisted tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PileKind::Stock => "stock",
            PileKind::Waste => "waste",
            PileKind::Tableaux => "tableaux",
            PileKind::Foundation => "foundation",
            PileKind::Cell => "cell",
            PileKind::Pyramid => "pyramid",
            PileKind::Temp => "temp",
            PileKind::Ones => "ones",
            PileKind::Twos => "twos",
            PileKind::Threes => "threes",
            PileKind::Fours => "fours",
        }
    }

    /// Parse a persisted tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen orientation, chosen purely on `height > width`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orientation for a surface of the given size.
    #[must_use]
    pub fn for_surface(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Board grid size in card slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cols: u32,
    pub rows: u32,
}

impl Board {
    #[must_use]
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

/// Grid coordinates of a pile. Fractional values offset a pile by part of a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub col: f32,
    pub row: f32,
}

impl Slot {
    #[must_use]
    pub const fn new(col: f32, row: f32) -> Self {
        Self { col, row }
    }
}

/// Static description of one pile in a game's table.
#[derive(Clone, Copy, Debug)]
pub struct PileSpec {
    /// Unique key within the game (`"tableaux3"`).
    pub key: &'static str,
    pub kind: PileKind,
    pub portrait: Slot,
    pub landscape: Slot,
    /// Rank glyph drawn when the pile is empty.
    pub back: Option<Rank>,
    /// Draw the pile's outline rectangle.
    pub outline: bool,
}

impl PileSpec {
    /// A pile that sits in the same slot in both orientations.
    #[must_use]
    pub const fn fixed(key: &'static str, kind: PileKind, col: f32, row: f32) -> Self {
        Self {
            key,
            kind,
            portrait: Slot::new(col, row),
            landscape: Slot::new(col, row),
            back: None,
            outline: true,
        }
    }

    /// A pile with distinct portrait and landscape slots.
    #[must_use]
    pub const fn oriented(
        key: &'static str,
        kind: PileKind,
        portrait: Slot,
        landscape: Slot,
    ) -> Self {
        Self {
            key,
            kind,
            portrait,
            landscape,
            back: None,
            outline: true,
        }
    }

    /// Set the empty-slot glyph.
    #[must_use]
    pub const fn with_back(mut self, rank: Rank) -> Self {
        self.back = Some(rank);
        self
    }

    /// Hide the outline rectangle.
    #[must_use]
    pub const fn without_outline(mut self) -> Self {
        self.outline = false;
        self
    }

    /// Slot for the given orientation.
    #[must_use]
    pub const fn slot(&self, orientation: Orientation) -> Slot {
        match orientation {
            Orientation::Portrait => self.portrait,
            Orientation::Landscape => self.landscape,
        }
    }
}

/// A player-facing toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOption {
    /// Text shown in the options dialog.
    pub display: String,
    pub value: bool,
}

/// Options keyed by name (`"tripleDraw"`, `"instantFlip"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    entries: FxHashMap<String, GameOption>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option with its display text and default value.
    #[must_use]
    pub fn with(mut self, key: &str, display: &str, value: bool) -> Self {
        self.entries.insert(
            key.to_string(),
            GameOption {
                display: display.to_string(),
                value,
            },
        );
        self
    }

    /// Value of an option; missing options read as `false`.
    #[must_use]
    pub fn enabled(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|o| o.value)
    }

    /// Set an existing option. Returns `false` if the game has no such option.
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(option) => {
                option.value = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GameOption> {
        self.entries.get(key)
    }

    /// Iterate over `(key, option)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GameOption)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, GameOption)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, GameOption)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
