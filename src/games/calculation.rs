//! Calculation.
//!
//! Four foundations start on A, 2, 3 and 4 and are each built along a fixed
//! rank path, suit ignored. The stock is turned one card at a time and the
//! turned card must be played at once, onto a foundation or any tableau.
//! Tableau tops can only go up to a foundation.

use crate::core::card::{Card, Rank};
use crate::core::config::{Board, Orientation, PileId, PileKind, PileSpec, Slot};
use crate::core::deck::Deck;
use crate::core::rng::GameRng;
use crate::games::common::split_top;
use crate::games::GameId;
use crate::piles::primitives;
use crate::piles::{Candidate, Layout};
use crate::rules::engine::{no_merge, no_split, no_tap, time_bonus};
use crate::rules::game::land;
use crate::rules::{Game, GameInfo, Hooks, PileRules, RuleSet};

use Rank::*;

/// Foundation paths, indexed by the foundation's start rank.
pub const ONES: [Rank; 13] = [
    Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
];
pub const TWOS: [Rank; 13] = [
    Two, Four, Six, Eight, Ten, Queen, Ace, Three, Five, Seven, Nine, Jack, King,
];
pub const THREES: [Rank; 13] = [
    Three, Six, Nine, Queen, Two, Five, Eight, Jack, Ace, Four, Seven, Ten, King,
];
pub const FOURS: [Rank; 13] = [
    Four, Eight, Queen, Three, Seven, Jack, Two, Six, Ten, Ace, Five, Nine, King,
];

const FOUNDATIONS: [PileKind; 4] =
    [PileKind::Ones, PileKind::Twos, PileKind::Threes, PileKind::Fours];

const STOCK: PileId = PileId(8);

static INFO: GameInfo = GameInfo {
    name: "Calculation",
    description: "A challenging patience game involving skill.",
    rules: &[
        "Foundations: Each foundation is built by rank, suit ignored. Ones: A 2 3 4 5 6 7 8 9 10 J Q K. \
         Twos: 2 4 6 8 10 Q A 3 5 7 9 J K. Threes: 3 6 9 Q 2 5 8 J A 4 7 10 K. \
         Fours: 4 8 Q 3 7 J 2 6 10 A 5 9 K.",
        "Tableaux: Any card can go anywhere in the tableaux, but once placed it can only move to a foundation.",
        "Stock: One card may be drawn at a time and must be placed immediately.",
    ],
};

static PILES: [PileSpec; 9] = [
    PileSpec::oriented("tableaux1", PileKind::Tableaux, Slot::new(0.0, 1.0), Slot::new(1.5, 0.0)),
    PileSpec::oriented("tableaux2", PileKind::Tableaux, Slot::new(1.0, 1.0), Slot::new(1.5, 1.0)),
    PileSpec::oriented("tableaux3", PileKind::Tableaux, Slot::new(2.0, 1.0), Slot::new(1.5, 2.0)),
    PileSpec::oriented("tableaux4", PileKind::Tableaux, Slot::new(3.0, 1.0), Slot::new(1.5, 3.0)),
    PileSpec::oriented("ones", PileKind::Ones, Slot::new(0.0, 0.0), Slot::new(0.0, 0.0)),
    PileSpec::oriented("twos", PileKind::Twos, Slot::new(1.0, 0.0), Slot::new(0.0, 1.0)),
    PileSpec::oriented("threes", PileKind::Threes, Slot::new(2.0, 0.0), Slot::new(0.0, 2.0)),
    PileSpec::oriented("fours", PileKind::Fours, Slot::new(3.0, 0.0), Slot::new(0.0, 3.0)),
    PileSpec::oriented("stock", PileKind::Stock, Slot::new(4.0, 0.0), Slot::new(0.0, 4.0)),
];

/// Calculation rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Calculation;

impl RuleSet for Calculation {
    fn id(&self) -> GameId {
        GameId::Calculation
    }

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn piles(&self) -> &'static [PileSpec] {
        &PILES
    }

    fn board(&self, orientation: Orientation) -> Board {
        match orientation {
            Orientation::Portrait => Board::new(5, 4),
            Orientation::Landscape => Board::new(7, 5),
        }
    }

    fn undo(&self) -> bool {
        false
    }

    fn deal(&self, game: &mut Game, rng: &mut GameRng) {
        let mut deck = Deck::standard();
        deck.shuffle(rng);

        for kind in FOUNDATIONS {
            let start = path(kind)[0];
            let Some(pile) = game.first_of(kind) else {
                continue;
            };
            let cards: Vec<Card> = deck.find(start, None).map(Card::face_up).into_iter().collect();
            game.pile_mut(pile).set_cards(cards);
        }
        game.pile_mut(STOCK).set_cards(deck.draw(48));
    }

    fn pile_rules(&self, kind: PileKind) -> Option<PileRules> {
        match kind {
            PileKind::Tableaux => Some(PileRules::new(
                no_tap,
                tableau_split,
                tableau_merge,
                Layout::Fanned,
            )),
            PileKind::Ones | PileKind::Twos | PileKind::Threes | PileKind::Fours => {
                Some(PileRules::new(no_tap, no_split, path_merge, Layout::Squared))
            }
            PileKind::Stock => {
                Some(PileRules::new(stock_tap, stock_split, no_merge, Layout::Squared))
            }
            _ => None,
        }
    }

    fn layout(&self, kind: PileKind, game: &Game) -> Layout {
        match (kind, game.orientation) {
            (PileKind::Tableaux, Orientation::Landscape) => Layout::FannedRight,
            _ => self.pile_rules(kind).map_or(Layout::Squared, |r| r.layout),
        }
    }

    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks) {
        let full = FOUNDATIONS
            .into_iter()
            .filter_map(|kind| game.first_of(kind))
            .all(|f| game.pile(f).len() == ONES.len());
        if full {
            game.declare_win(hooks);
            return;
        }

        if !primitives::empty(game.pile(STOCK)) {
            return;
        }
        let playable = game.ids_of(PileKind::Tableaux).into_iter().any(|t| {
            primitives::top(game.pile(t)).is_some_and(|card| {
                FOUNDATIONS
                    .into_iter()
                    .filter_map(|kind| game.first_of(kind))
                    .any(|f| continues_path(game, f, card))
            })
        });
        if !playable {
            game.declare_lose(hooks);
        }
    }

    fn bonus(&self, elapsed_ms: u64) -> i32 {
        time_bonus(70_000.0, elapsed_ms)
    }
}

/// The rank path a foundation kind is built along.
pub fn path(kind: PileKind) -> &'static [Rank; 13] {
    match kind {
        PileKind::Twos => &TWOS,
        PileKind::Threes => &THREES,
        PileKind::Fours => &FOURS,
        _ => &ONES,
    }
}

fn path_index(path: &[Rank; 13], rank: Rank) -> Option<usize> {
    path.iter().position(|&r| r == rank)
}

/// `true` if `card` is the next rank along `foundation`'s path.
fn continues_path(game: &Game, foundation: PileId, card: &Card) -> bool {
    next_index(game, foundation, card).is_some()
}

/// Path index `card` would take on `foundation`, if it is the next one.
fn next_index(game: &Game, foundation: PileId, card: &Card) -> Option<usize> {
    let pile = game.pile(foundation);
    let path = path(pile.kind());
    let top = path_index(path, primitives::top(pile)?.rank)?;
    let index = path_index(path, card.rank)?;
    (index == top + 1).then_some(index)
}

fn stock_tap(game: &mut Game, stock: PileId, hooks: &mut dyn Hooks) {
    primitives::flip(primitives::top_mut(game.pile_mut(stock)));
    game.update_status(hooks);
}

fn stock_split(game: &mut Game, stock: PileId, index: usize) -> Option<Candidate> {
    if !primitives::top(game.pile(stock)).is_some_and(|c| c.visible) {
        return None;
    }
    split_top(game, stock, index)
}

/// Tableau tops wait while a turned stock card is pending.
fn tableau_split(game: &mut Game, pile: PileId, index: usize) -> Option<Candidate> {
    if primitives::top(game.pile(STOCK)).is_some_and(|c| c.visible) {
        return None;
    }
    split_top(game, pile, index)
}

fn tableau_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    if candidate.len() != 1 || candidate.kind() != PileKind::Stock {
        return Err(candidate);
    }
    land(game, pile, candidate);
    game.commit(hooks);
    Ok(())
}

/// Shared by all four foundations; the path comes from the pile's kind.
fn path_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    if candidate.len() != 1 {
        return Err(candidate);
    }
    let Some(index) = candidate.lead().and_then(|card| next_index(game, pile, card)) else {
        return Err(candidate);
    };

    land(game, pile, candidate);
    game.add_score(index as i32 + 1, hooks);
    game.commit(hooks);
    Ok(())
}
