//! Rule set trait for game implementations.
//!
//! Games implement `RuleSet` to define:
//! - Which piles exist and where they sit (`piles`, `board`)
//! - How a fresh game is dealt (`deal`)
//! - What each pile kind does (`pile_rules`)
//! - Win/loss conditions (`update_status`) and the time bonus
//!
//! The engine calls into `RuleSet` and the bound `PileRules` but never
//! interprets game-specific concepts directly.

use tracing::info;

use crate::core::config::{Board, Options, Orientation, PileId, PileKind, PileSpec};
use crate::core::rng::GameRng;
use crate::games::GameId;
use crate::persist::{Document, PersistError};
use crate::piles::{Candidate, Layout};

use super::game::Game;
use super::hooks::Hooks;

/// Tap on a pile.
pub type TapFn = fn(&mut Game, PileId, &mut dyn Hooks);

/// Lift the legal run starting at the touched card index, or `None`.
pub type SplitFn = fn(&mut Game, PileId, usize) -> Option<Candidate>;

/// Accept a candidate, or hand it back untouched.
pub type MergeFn = fn(&mut Game, PileId, Candidate, &mut dyn Hooks) -> Result<(), Candidate>;

/// Behaviour bound to a pile kind within one game.
#[derive(Clone, Copy)]
pub struct PileRules {
    pub tap: TapFn,
    pub split: SplitFn,
    pub merge: MergeFn,
    /// Default layout; `RuleSet::layout` may override per orientation or option.
    pub layout: Layout,
}

impl PileRules {
    #[must_use]
    pub const fn new(tap: TapFn, split: SplitFn, merge: MergeFn, layout: Layout) -> Self {
        Self {
            tap,
            split,
            merge,
            layout,
        }
    }

    /// A pile that does nothing: no tap, no split, no merge.
    #[must_use]
    pub const fn inert(layout: Layout) -> Self {
        Self::new(no_tap, no_split, no_merge, layout)
    }
}

impl std::fmt::Debug for PileRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PileRules")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

pub fn no_tap(_game: &mut Game, _pile: PileId, _hooks: &mut dyn Hooks) {}

pub fn no_split(_game: &mut Game, _pile: PileId, _index: usize) -> Option<Candidate> {
    None
}

pub fn no_merge(
    _game: &mut Game,
    _pile: PileId,
    candidate: Candidate,
    _hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    Err(candidate)
}

/// Player-facing description of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// One paragraph per pile family.
    pub rules: &'static [&'static str],
}

/// Rule set trait.
///
/// ## Implementation Notes
///
/// - `piles`: order is the pile order on the `Game` and in documents
/// - `pile_rules`: return `None` for kinds the game does not use
/// - `update_status`: only sets `won`/`lost` through `Game::declare_*`
/// - `bonus`: called once by the host when the game is won
pub trait RuleSet: Sync {
    fn id(&self) -> GameId;

    fn info(&self) -> &'static GameInfo;

    /// Static pile table.
    fn piles(&self) -> &'static [PileSpec];

    /// Board grid for an orientation.
    fn board(&self, orientation: Orientation) -> Board;

    /// Default option values.
    fn options(&self) -> Options {
        Options::new()
    }

    /// Whether the host may offer undo.
    fn undo(&self) -> bool {
        true
    }

    /// Deal a fresh game into empty piles.
    fn deal(&self, game: &mut Game, rng: &mut GameRng);

    /// Behaviour for a pile kind, `None` if the game has no such pile.
    fn pile_rules(&self, kind: PileKind) -> Option<PileRules>;

    /// Layout for a pile kind given the game's options and orientation.
    fn layout(&self, kind: PileKind, _game: &Game) -> Layout {
        self.pile_rules(kind).map_or(Layout::Squared, |r| r.layout)
    }

    /// Re-evaluate `won`/`lost`.
    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks);

    /// Score bonus for finishing in `elapsed_ms`.
    fn bonus(&self, elapsed_ms: u64) -> i32;

    /// Tap on an individual card. Only card-selection games care.
    fn tap_card(&self, _game: &mut Game, _pile: PileId, _index: usize, _hooks: &mut dyn Hooks) {}

    // === Lifecycle ===

    /// Deal a new game from `seed`.
    fn init(&self, seed: u64) -> Game {
        let mut game = Game::new(self.id(), Orientation::default(), seed);
        let mut rng = GameRng::new(seed);
        self.deal(&mut game, &mut rng);
        self.refresh_layouts(&mut game);
        info!(game = %self.id(), seed, "dealt new game");
        game
    }

    /// Adopt the orientation for a `width` x `height` surface.
    fn resize(&self, game: &mut Game, width: u32, height: u32) {
        self.orient(game, Orientation::for_surface(width, height));
    }

    /// Move every pile to its slot for `orientation` and re-derive layouts.
    fn orient(&self, game: &mut Game, orientation: Orientation) {
        game.orientation = orientation;
        game.board = self.board(orientation);
        for (pile, spec) in game.piles.iter_mut().zip(self.piles()) {
            pile.slot = spec.slot(orientation);
        }
        self.refresh_layouts(game);
    }

    /// Apply option changes that affect the board.
    fn update_options(&self, game: &mut Game) {
        self.refresh_layouts(game);
    }

    /// Re-derive each pile's layout.
    fn refresh_layouts(&self, game: &mut Game) {
        let layouts: Vec<Layout> = game
            .piles()
            .iter()
            .map(|p| self.layout(p.kind(), game))
            .collect();
        for (pile, layout) in game.piles.iter_mut().zip(layouts) {
            pile.layout = layout;
        }
    }

    /// Plain document for storage. No behaviour is captured.
    fn serialize(&self, game: &Game) -> Document {
        Document::capture(game)
    }

    /// Rebuild a game from a document, re-binding behaviour from the
    /// pile kinds.
    fn deserialize(&self, document: &Document) -> Result<Game, PersistError> {
        if document.game != self.id().as_str() {
            return Err(PersistError::WrongGame {
                expected: self.id().as_str(),
                found: document.game.clone(),
            });
        }
        document.restore()
    }
}

/// `round(numerator / secs)`, or 0 when no time has passed.
pub(crate) fn time_bonus(numerator: f64, elapsed_ms: u64) -> i32 {
    if elapsed_ms == 0 {
        return 0;
    }
    let secs = elapsed_ms as f64 / 1000.0;
    (numerator / secs).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PileKind;
    use crate::rules::hooks::NoHooks;

    #[test]
    fn test_time_bonus() {
        assert_eq!(time_bonus(60000.0, 0), 0);
        assert_eq!(time_bonus(60000.0, 60_000), 1000);
        assert_eq!(time_bonus(35000.0, 90_000), 389);
    }

    #[test]
    fn test_inert_rules() {
        let mut game = GameId::Pyramid.rules().init(1);
        let stock = game.first_of(PileKind::Stock).unwrap();
        let rules = PileRules::inert(Layout::Squared);

        assert!((rules.split)(&mut game, stock, 0).is_none());

        let candidate = Candidate::new(stock, PileKind::Stock, Vec::new());
        let back = (rules.merge)(&mut game, stock, candidate.clone(), &mut NoHooks);
        assert_eq!(back, Err(candidate));
    }

    #[test]
    fn test_deserialize_rejects_other_game() {
        let game = GameId::Klondike.rules().init(3);
        let document = game.rules().serialize(&game);

        let err = GameId::Spider.rules().deserialize(&document).unwrap_err();
        assert!(matches!(err, PersistError::WrongGame { .. }));
    }
}
