//! Saved-game documents.
//!
//! A `Document` is a plain tree mirroring the `Game`: scalars, options and
//! piles of cards. It carries no behaviour. Loading re-binds each pile's
//! rules and layout from the game's table, keyed by the pile's kind tag.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Rank};
use crate::core::config::{Board, GameOption, Orientation, PileKind, Slot};
use crate::games::GameId;
use crate::rules::Game;

use super::error::PersistError;

/// Document format version.
pub const VERSION: u32 = 1;

/// One pile as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PileDocument {
    pub key: String,
    /// Kind tag, e.g. `"tableaux"`.
    pub kind: String,
    pub slot: Slot,
    pub back: Option<Rank>,
    pub outline: bool,
    pub cards: Vec<Card>,
}

/// A whole game as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Game id, e.g. `"klondike"`.
    pub game: String,
    pub version: u32,
    pub board: Board,
    pub orientation: Orientation,
    pub score: i32,
    pub won: bool,
    pub lost: bool,
    pub undo: bool,
    pub seed: u64,
    pub options: BTreeMap<String, GameOption>,
    pub piles: Vec<PileDocument>,
}

impl Document {
    /// Snapshot a game.
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        Self {
            game: game.id().as_str().to_string(),
            version: VERSION,
            board: game.board,
            orientation: game.orientation,
            score: game.score(),
            won: game.is_won(),
            lost: game.is_lost(),
            undo: game.undo_allowed(),
            seed: game.seed(),
            options: game
                .options
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            piles: game
                .piles()
                .iter()
                .map(|p| PileDocument {
                    key: p.key().to_string(),
                    kind: p.kind().as_str().to_string(),
                    slot: p.slot,
                    back: p.back,
                    outline: p.outline,
                    cards: p.cards().to_vec(),
                })
                .collect(),
        }
    }

    /// Rebuild the game this document describes.
    ///
    /// Every pile must carry a known kind tag that the game uses, and every
    /// pile in the game's table must be present with the matching kind.
    pub fn restore(&self) -> Result<Game, PersistError> {
        let id = GameId::parse(&self.game)
            .ok_or_else(|| PersistError::UnknownGame(self.game.clone()))?;
        let rules = id.rules();

        for stored in &self.piles {
            let kind = PileKind::parse(&stored.kind).ok_or_else(|| PersistError::UnknownPileKind {
                key: stored.key.clone(),
                kind: stored.kind.clone(),
            })?;
            if rules.pile_rules(kind).is_none() {
                return Err(PersistError::UnsupportedPile {
                    game: id.as_str(),
                    key: stored.key.clone(),
                    kind: stored.kind.clone(),
                });
            }
            if !rules.piles().iter().any(|spec| spec.key == stored.key) {
                return Err(PersistError::UnknownPile(stored.key.clone()));
            }
        }

        let mut game = Game::new(id, self.orientation, self.seed)
            .with_state(self.score, self.won, self.lost, self.undo);
        game.board = self.board;
        game.options = self
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for (pile, spec) in game.piles.iter_mut().zip(rules.piles()) {
            let stored = self
                .piles
                .iter()
                .find(|p| p.key == spec.key)
                .ok_or(PersistError::MissingPile(spec.key))?;
            if stored.kind != spec.kind.as_str() {
                return Err(PersistError::PileMismatch {
                    key: spec.key,
                    expected: spec.kind.as_str(),
                    found: stored.kind.clone(),
                });
            }
            pile.slot = stored.slot;
            pile.back = stored.back;
            pile.outline = stored.outline;
            pile.set_cards(stored.cards.clone());
        }

        rules.refresh_layouts(&mut game);
        Ok(game)
    }

    /// Total number of cards across all piles, dead ones included.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(|p| p.cards.len()).sum()
    }

    /// Encode as a bincode blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a bincode blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// What a session writes to its store: the current game and its undo log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub document: Document,
    /// Snapshots after each move, oldest first. The last one equals `document`.
    pub history: Vector<Document>,
}

impl SavedGame {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
