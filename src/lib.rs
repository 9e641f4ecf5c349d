//! # rust-patience
//!
//! A rule engine for pile-based solitaire games.
//!
//! ## Design Principles
//!
//! 1. **Behaviour is looked up, never stored**: Every pile carries a kind
//!    tag. Its tap/split/merge functions and layout are bound from the
//!    game's `(kind -> PileRules)` table when a game is dealt or loaded.
//!
//! 2. **Split, then merge**: A move lifts a legal `Candidate` off its
//!    source and offers it to a target. A rejected candidate comes back
//!    untouched and the caller returns it to its source.
//!
//! 3. **Explicit effects**: Scoring, history, saving and terminal events
//!    go through a `Hooks` object passed to every rule.
//!
//! ## Modules
//!
//! - `core`: Cards, decks, seeded RNG, pile and board configuration
//! - `piles`: Piles, candidates, layouts and the card primitives
//! - `rules`: The `Game` aggregate, the `RuleSet` trait and `Hooks`
//! - `games`: Klondike, Freecell, Spider, Pyramid and Calculation
//! - `persist`: Plain documents, blob encoding and save stores
//! - `session`: Host-facing controller with undo and autosave

pub mod core;
pub mod games;
pub mod persist;
pub mod piles;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, Card, Color, Deck, GameOption, GameRng, Options, Orientation, PileId, PileKind, PileSpec,
    Rank, Slot, Suit,
};

pub use crate::piles::{Candidate, CardStack, Layout, Pile, Point, Rect};

pub use crate::rules::{Game, GameInfo, Hooks, NoHooks, PileRules, Recorder, RuleSet};

pub use crate::games::{Calculation, Freecell, GameId, Klondike, Pyramid, Spider};

pub use crate::persist::{Document, MemoryStore, PersistError, SaveStore, SavedGame};

pub use crate::session::Session;
