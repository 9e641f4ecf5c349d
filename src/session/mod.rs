//! Play sessions.
//!
//! A `Session` is the glue between a host and one game: it turns gestures
//! into split/merge calls, hands rejected candidates back to their source,
//! keeps the undo log and writes every accepted move to a `SaveStore`.
//!
//! ## Flow
//!
//! ```text
//! drag(pile, index) -> Candidate
//! drop_on(target, candidate)
//!   accepted: history -> status -> save
//!   rejected: candidate restored to its source
//! ```

use im::Vector;
use tracing::{debug, info, warn};

use crate::core::config::PileId;
use crate::games::GameId;
use crate::persist::{Document, PersistError, SaveStore, SavedGame};
use crate::piles::Candidate;
use crate::rules::{Game, Hooks, NoHooks};

/// Hooks that keep the undo log and the store up to date, forwarding
/// everything to the host's own hooks.
struct Journal<S, H> {
    key: &'static str,
    history: Vector<Document>,
    store: S,
    host: H,
}

impl<S: SaveStore, H: Hooks> Journal<S, H> {
    fn persist(&mut self, game: &Game) {
        let saved = SavedGame {
            document: Document::capture(game),
            history: self.history.clone(),
        };
        match saved.to_bytes() {
            Ok(blob) => self.store.save(self.key, blob),
            Err(err) => warn!(game = self.key, %err, "failed to encode save"),
        }
    }
}

impl<S: SaveStore, H: Hooks> Hooks for Journal<S, H> {
    fn score(&mut self, delta: i32, total: i32) {
        self.host.score(delta, total);
    }

    fn history(&mut self, game: &Game) {
        self.history.push_back(Document::capture(game));
        self.host.history(game);
    }

    fn save(&mut self, game: &Game) {
        self.persist(game);
        self.host.save(game);
    }

    fn win(&mut self) {
        self.host.win();
    }

    fn lose(&mut self) {
        self.host.lose();
    }
}

/// One game being played, with its undo log and save store.
pub struct Session<S: SaveStore, H: Hooks = NoHooks> {
    game: Game,
    journal: Journal<S, H>,
    bonus_paid: bool,
}

impl<S: SaveStore> Session<S> {
    /// Deal a new game and save it.
    pub fn new(id: GameId, seed: u64, store: S) -> Self {
        Self::with_hooks(id, seed, store, NoHooks)
    }

    /// Load the game saved under `id`.
    pub fn resume(id: GameId, store: S) -> Result<Self, PersistError> {
        Self::resume_with_hooks(id, store, NoHooks)
    }
}

impl<S: SaveStore, H: Hooks> Session<S, H> {
    /// Deal a new game, forwarding outward effects to `host`.
    pub fn with_hooks(id: GameId, seed: u64, store: S, host: H) -> Self {
        let game = id.rules().init(seed);
        let mut journal = Journal {
            key: id.as_str(),
            history: Vector::new(),
            store,
            host,
        };
        journal.history.push_back(Document::capture(&game));
        journal.persist(&game);
        Self {
            game,
            journal,
            bonus_paid: false,
        }
    }

    /// Load the game saved under `id`, forwarding outward effects to `host`.
    pub fn resume_with_hooks(id: GameId, store: S, host: H) -> Result<Self, PersistError> {
        let Some(blob) = store.load(id.as_str()) else {
            return Err(PersistError::NotFound(id.as_str().to_string()));
        };
        let saved = SavedGame::from_bytes(&blob)
            .and_then(|saved| Ok((id.rules().deserialize(&saved.document)?, saved.history)));
        let (game, mut history) = match saved {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(game = %id, %err, "failed to load saved game");
                return Err(err);
            }
        };
        if history.is_empty() {
            history.push_back(Document::capture(&game));
        }

        info!(game = %id, score = game.score(), moves = history.len(), "resumed game");
        Ok(Self {
            game,
            journal: Journal {
                key: id.as_str(),
                history,
                store,
                host,
            },
            bonus_paid: false,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn score(&self) -> i32 {
        self.game.score()
    }

    /// Snapshots in the undo log, the starting position included.
    pub fn history_len(&self) -> usize {
        self.journal.history.len()
    }

    pub fn store(&self) -> &S {
        &self.journal.store
    }

    pub fn hooks(&self) -> &H {
        &self.journal.host
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.journal.store
    }

    pub fn tap(&mut self, pile: PileId) {
        self.game.tap(pile, &mut self.journal);
    }

    pub fn tap_card(&mut self, pile: PileId, index: usize) {
        self.game.tap_card(pile, index, &mut self.journal);
    }

    /// Start dragging from the card at `index`.
    pub fn drag(&mut self, pile: PileId, index: usize) -> Option<Candidate> {
        self.game.split(pile, index)
    }

    /// Drop a dragged candidate on `target`. Returns `true` if it was
    /// accepted; otherwise the cards go back where they came from.
    pub fn drop_on(&mut self, target: PileId, candidate: Candidate) -> bool {
        if candidate.source() == target {
            self.game.restore(candidate);
            return false;
        }
        match self.game.merge(target, candidate, &mut self.journal) {
            Ok(()) => true,
            Err(candidate) => {
                self.game.restore(candidate);
                false
            }
        }
    }

    /// Drag from `from` at `index` and drop on `to`.
    pub fn play(&mut self, from: PileId, index: usize, to: PileId) -> bool {
        match self.drag(from, index) {
            Some(candidate) => self.drop_on(to, candidate),
            None => false,
        }
    }

    /// Step back one move. Returns `false` when the game forbids undo, is
    /// already over, or there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.game.undo_allowed() || self.journal.history.len() < 2 {
            return false;
        }
        // Won and lost are final.
        if self.game.is_won() || self.game.is_lost() {
            return false;
        }
        let Some(previous) = self.journal.history.get(self.journal.history.len() - 2) else {
            return false;
        };
        match previous.restore() {
            Ok(mut game) => {
                // Options and orientation are settings, not moves.
                game.options = self.game.options.clone();
                game.rules().orient(&mut game, self.game.orientation);
                self.journal.history.pop_back();
                self.game = game;
                self.journal.persist(&self.game);
                debug!(game = self.journal.key, "undo");
                true
            }
            Err(err) => {
                warn!(game = self.journal.key, %err, "failed to restore snapshot");
                false
            }
        }
    }

    /// Adopt a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.game.rules().resize(&mut self.game, width, height);
        self.journal.persist(&self.game);
    }

    /// Change an option. Returns `false` if the game has no such option.
    pub fn set_option(&mut self, key: &str, value: bool) -> bool {
        if !self.game.options.set(key, value) {
            return false;
        }
        self.game.rules().update_options(&mut self.game);
        self.journal.persist(&self.game);
        true
    }

    /// Add the time bonus to a won game, once. Returns the bonus paid.
    pub fn finish(&mut self, elapsed_ms: u64) -> i32 {
        if !self.game.is_won() || self.bonus_paid {
            return 0;
        }
        self.bonus_paid = true;
        let bonus = self.game.rules().bonus(elapsed_ms);
        if bonus != 0 {
            self.game.add_score(bonus, &mut self.journal);
            self.journal.persist(&self.game);
        }
        bonus
    }
}
