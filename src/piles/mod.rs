//! Piles: the containers cards live in.
//!
//! Piles are **game-configured**. Each game declares its piles in a static
//! `PileSpec` table; the engine builds a `Pile` per entry and binds its
//! behaviour from the game's `(kind -> PileRules)` lookup.
//!
//! ## Key Types
//!
//! - `Pile`: a keyed, ordered run of cards with bound behaviour
//! - `Candidate`: cards lifted by a split, offered to a merge
//! - `Layout`: pure card placement within a pile's rectangle
//! - `primitives`: the only way rules move cards around

pub mod layout;
pub mod pile;
pub mod primitives;

pub use layout::{Layout, Point, Rect};
pub use pile::{Candidate, Pile};
pub use primitives::CardStack;
