//! The built-in games.
//!
//! Each game is a unit struct implementing `RuleSet`, with a static pile
//! table and one set of pile functions per kind it uses. `GameId` is the
//! closed set of games and the lookup from a persisted name to its rules.

pub mod calculation;
pub mod common;
pub mod freecell;
pub mod klondike;
pub mod pyramid;
pub mod spider;

pub use calculation::Calculation;
pub use freecell::Freecell;
pub use klondike::Klondike;
pub use pyramid::Pyramid;
pub use spider::Spider;

use crate::rules::RuleSet;

/// Identifier of a built-in game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameId {
    Klondike,
    Freecell,
    Spider,
    Pyramid,
    Calculation,
}

impl GameId {
    pub const ALL: [GameId; 5] = [
        GameId::Klondike,
        GameId::Freecell,
        GameId::Spider,
        GameId::Pyramid,
        GameId::Calculation,
    ];

    /// Persisted name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameId::Klondike => "klondike",
            GameId::Freecell => "freecell",
            GameId::Spider => "spider",
            GameId::Pyramid => "pyramid",
            GameId::Calculation => "calculation",
        }
    }

    /// Parse a persisted name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }

    /// The game's rule set.
    #[must_use]
    pub fn rules(self) -> &'static dyn RuleSet {
        match self {
            GameId::Klondike => &Klondike,
            GameId::Freecell => &Freecell,
            GameId::Spider => &Spider,
            GameId::Pyramid => &Pyramid,
            GameId::Calculation => &Calculation,
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
