//! Rules: the game object, the rule set trait and the hooks seam.
//!
//! Games implement `RuleSet` to define:
//! - Their pile table, board and options
//! - The deal
//! - Per-kind pile behaviour (`PileRules`: tap, split, merge, layout)
//! - Win/loss conditions and the time bonus
//!
//! The engine calls into `RuleSet` but never interprets game-specific
//! concepts directly.

pub mod engine;
pub mod game;
pub mod hooks;

pub use engine::{GameInfo, MergeFn, PileRules, RuleSet, SplitFn, TapFn};
pub use game::{Game, PileIds};
pub use hooks::{Hooks, NoHooks, Recorder};
