//! Core types: cards, decks, RNG, configuration.
//!
//! This module contains the building blocks that are game-agnostic.
//! Games configure these through their pile tables and options rather
//! than modifying the core.

pub mod card;
pub mod config;
pub mod deck;
pub mod rng;

pub use card::{Card, Color, Offset, Position, Rank, Size, Suit};
pub use config::{Board, GameOption, Options, Orientation, PileId, PileKind, PileSpec, Slot};
pub use deck::Deck;
pub use rng::GameRng;
