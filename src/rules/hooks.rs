//! Outward effects raised by rules.
//!
//! Rules never talk to the host directly. Every scoring change, history
//! snapshot, save request and terminal event goes through the `Hooks`
//! object passed to the rule.

use super::game::Game;

/// Host callbacks. Every method defaults to doing nothing.
pub trait Hooks {
    /// Score changed by `delta`; `total` is the clamped running score.
    fn score(&mut self, _delta: i32, _total: i32) {}

    /// A move completed; snapshot the game for undo.
    fn history(&mut self, _game: &Game) {}

    /// Persist the game.
    fn save(&mut self, _game: &Game) {}

    /// Fired once when the game is won.
    fn win(&mut self) {}

    /// Fired once when the game is lost.
    fn lose(&mut self) {}
}

/// Hooks that ignore everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl Hooks for NoHooks {}

/// Hooks that count what happened. Handy for hosts that poll, and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    /// Every score delta, in order.
    pub scores: Vec<i32>,
    pub histories: usize,
    pub saves: usize,
    pub wins: usize,
    pub losses: usize,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all reported deltas (before clamping).
    #[must_use]
    pub fn net_score(&self) -> i32 {
        self.scores.iter().sum()
    }
}

impl Hooks for Recorder {
    fn score(&mut self, delta: i32, _total: i32) {
        self.scores.push(delta);
    }

    fn history(&mut self, _game: &Game) {
        self.histories += 1;
    }

    fn save(&mut self, _game: &Game) {
        self.saves += 1;
    }

    fn win(&mut self) {
        self.wins += 1;
    }

    fn lose(&mut self) {
        self.losses += 1;
    }
}
