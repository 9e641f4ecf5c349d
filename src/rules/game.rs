//! The live game: piles, score and terminal flags.
//!
//! ## Move protocol
//!
//! 1. `split(pile, index)` lifts the legal run starting at the touched card,
//!    or returns `None` and leaves the pile alone.
//! 2. `merge(dest, candidate)` either relocates the cards and runs the
//!    game's side effects, or hands the candidate back untouched.
//! 3. A rejected candidate is returned to its source with `restore`.
//!
//! Accepted moves end with `commit`: history snapshot, status check, save.

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::config::{Board, Options, Orientation, PileId, PileKind};
use crate::games::GameId;
use crate::piles::primitives::{self, CardStack};
use crate::piles::{Candidate, Layout, Pile};

use super::engine::{PileRules, RuleSet};
use super::hooks::Hooks;

/// Pile ids of one kind. No game has more than ten piles of a kind.
pub type PileIds = SmallVec<[PileId; 10]>;

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    id: GameId,
    pub board: Board,
    pub orientation: Orientation,
    score: i32,
    won: bool,
    lost: bool,
    undo: bool,
    pub options: Options,
    seed: u64,
    pub(crate) piles: Vec<Pile>,
}

impl Game {
    /// Empty piles for `id`, bound to the game's behaviour table.
    pub(crate) fn new(id: GameId, orientation: Orientation, seed: u64) -> Self {
        let rules = id.rules();
        let piles = rules
            .piles()
            .iter()
            .map(|spec| {
                let bound = rules.pile_rules(spec.kind);
                debug_assert!(bound.is_some(), "{id} has no rules for {}", spec.kind);
                let bound = bound.unwrap_or_else(|| PileRules::inert(Layout::Squared));
                Pile::from_spec(spec, bound, orientation)
            })
            .collect();

        Self {
            id,
            board: rules.board(orientation),
            orientation,
            score: 0,
            won: false,
            lost: false,
            undo: rules.undo(),
            options: rules.options(),
            seed,
            piles,
        }
    }

    /// Restore saved scalars. Used when loading a document.
    pub(crate) fn with_state(mut self, score: i32, won: bool, lost: bool, undo: bool) -> Self {
        self.score = score;
        self.won = won;
        self.lost = lost;
        self.undo = undo;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The game's rule set.
    #[must_use]
    pub fn rules(&self) -> &'static dyn RuleSet {
        self.id.rules()
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Whether the host may offer undo.
    #[must_use]
    pub fn undo_allowed(&self) -> bool {
        self.undo
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All piles in table order.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    /// A pile by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this game.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    /// Mutable pile by id. Same panics as [`Game::pile`].
    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        &mut self.piles[id.index()]
    }

    /// A pile by key, if the game has one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Pile> {
        self.pile_id(key).map(|id| self.pile(id))
    }

    /// Look up a pile id by key.
    #[must_use]
    pub fn pile_id(&self, key: &str) -> Option<PileId> {
        self.piles
            .iter()
            .position(|p| p.key() == key)
            .map(|i| PileId::new(i as u8))
    }

    /// Ids of every pile of `kind`, in table order.
    #[must_use]
    pub fn ids_of(&self, kind: PileKind) -> PileIds {
        self.piles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind() == kind)
            .map(|(i, _)| PileId::new(i as u8))
            .collect()
    }

    /// First pile of `kind`.
    #[must_use]
    pub fn first_of(&self, kind: PileKind) -> Option<PileId> {
        self.piles
            .iter()
            .position(|p| p.kind() == kind)
            .map(|i| PileId::new(i as u8))
    }

    /// Two distinct piles, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn pair_mut(&mut self, a: PileId, b: PileId) -> (&mut Pile, &mut Pile) {
        assert_ne!(a, b, "pair_mut needs two distinct piles");
        let (a, b) = (a.index(), b.index());
        if a < b {
            let (low, high) = self.piles.split_at_mut(b);
            (&mut low[a], &mut high[0])
        } else {
            let (low, high) = self.piles.split_at_mut(a);
            (&mut high[0], &mut low[b])
        }
    }

    // === Side effects ===

    /// Apply a score delta. The running score never drops below zero.
    pub fn add_score(&mut self, delta: i32, hooks: &mut dyn Hooks) {
        self.score = (self.score + delta).max(0);
        hooks.score(delta, self.score);
    }

    /// Mark the game won. Fires `win` only the first time.
    pub fn declare_win(&mut self, hooks: &mut dyn Hooks) {
        if !self.won {
            self.won = true;
            info!(game = %self.id, score = self.score, "game won");
            hooks.win();
        }
    }

    /// Mark the game lost. Fires `lose` only the first time.
    pub fn declare_lose(&mut self, hooks: &mut dyn Hooks) {
        if !self.lost {
            self.lost = true;
            info!(game = %self.id, score = self.score, "game lost");
            hooks.lose();
        }
    }

    /// Re-evaluate won/lost.
    pub fn update_status(&mut self, hooks: &mut dyn Hooks) {
        self.rules().update_status(self, hooks);
    }

    /// Close out an accepted move: snapshot, status, save.
    pub fn commit(&mut self, hooks: &mut dyn Hooks) {
        hooks.history(self);
        self.update_status(hooks);
        hooks.save(self);
    }

    // === Moves ===

    /// Tap a pile. Unknown ids are ignored.
    pub fn tap(&mut self, pile: PileId, hooks: &mut dyn Hooks) {
        let Some(bound) = self.piles.get(pile.index()).map(Pile::rules) else {
            return;
        };
        debug!(game = %self.id, pile = self.pile(pile).key(), "tap");
        (bound.tap)(self, pile, hooks);
    }

    /// Tap a single card.
    pub fn tap_card(&mut self, pile: PileId, index: usize, hooks: &mut dyn Hooks) {
        if pile.index() < self.piles.len() {
            self.rules().tap_card(self, pile, index, hooks);
        }
    }

    /// Lift the legal run starting at `index`, or `None`.
    pub fn split(&mut self, pile: PileId, index: usize) -> Option<Candidate> {
        let bound = self.piles.get(pile.index()).map(Pile::rules)?;
        let candidate = (bound.split)(self, pile, index);
        if candidate.is_none() {
            debug!(game = %self.id, pile = self.pile(pile).key(), index, "split rejected");
        }
        candidate
    }

    /// Offer a candidate to `pile`. On rejection the candidate comes back.
    pub fn merge(
        &mut self,
        pile: PileId,
        candidate: Candidate,
        hooks: &mut dyn Hooks,
    ) -> Result<(), Candidate> {
        let Some(bound) = self.piles.get(pile.index()).map(Pile::rules) else {
            return Err(candidate);
        };
        let result = (bound.merge)(self, pile, candidate, hooks);
        if result.is_err() {
            debug!(game = %self.id, pile = self.pile(pile).key(), "merge rejected");
        }
        result
    }

    /// Put a rejected candidate back on top of its source pile.
    pub fn restore(&mut self, candidate: Candidate) {
        let source = candidate.source();
        if let Some(pile) = self.piles.get_mut(source.index()) {
            pile.cards_mut().extend(candidate.into_cards());
        }
    }
}

/// Detach everything from `index` up as a candidate.
pub(crate) fn lift(game: &mut Game, pile: PileId, index: usize) -> Candidate {
    let source = game.pile_mut(pile);
    let kind = source.kind();
    Candidate::new(pile, kind, source.split_off(index))
}

/// Put a candidate on `pile` face-up, keeping its order.
pub(crate) fn land(game: &mut Game, pile: PileId, mut candidate: Candidate) {
    primitives::move_all(primitives::reverse(&mut candidate), game.pile_mut(pile), true);
}
