//! Spider, played with two decks.
//!
//! Ten tableaux are built down regardless of suit, but only same-suit runs
//! move together. A complete King-to-Ace run of one suit leaves the board.
//! The stock deals one card onto every tableau, and only while none is empty.

use crate::core::card::{Card, Rank};
use crate::core::config::{Board, Options, Orientation, PileId, PileKind, PileSpec};
use crate::core::deck::Deck;
use crate::core::rng::GameRng;
use crate::games::common::{all_empty, flip_all, flip_top, suited_run};
use crate::games::GameId;
use crate::piles::primitives::{self, CardStack};
use crate::piles::{Candidate, Layout};
use crate::rules::engine::{no_merge, no_split};
use crate::rules::game::{land, lift};
use crate::rules::{Game, GameInfo, Hooks, PileRules, RuleSet};

/// Turn exposed tableau cards after every move.
pub const INSTANT_FLIP: &str = "instantFlip";

const STOCK: PileId = PileId(10);

/// Cards in a complete run.
const RUN: usize = 13;
const RUN_SCORE: i32 = 100;
const MOVE_COST: i32 = -1;

static INFO: GameInfo = GameInfo {
    name: "Spider",
    description: "Stop the rampaging horde of cards.",
    rules: &[
        "Tableaux: Built down by rank in any suit. Only groups of one suit move together.",
        "Stock: Drawing from the stock will play another card on top of each tableaux.",
        "To win, build stacks of cards of the same suit from ace to king.",
    ],
};

static PILES: [PileSpec; 11] = [
    PileSpec::fixed("tableaux1", PileKind::Tableaux, 1.5, 0.0),
    PileSpec::fixed("tableaux2", PileKind::Tableaux, 2.5, 0.0),
    PileSpec::fixed("tableaux3", PileKind::Tableaux, 3.5, 0.0),
    PileSpec::fixed("tableaux4", PileKind::Tableaux, 4.5, 0.0),
    PileSpec::fixed("tableaux5", PileKind::Tableaux, 5.5, 0.0),
    PileSpec::fixed("tableaux6", PileKind::Tableaux, 6.5, 0.0),
    PileSpec::fixed("tableaux7", PileKind::Tableaux, 7.5, 0.0),
    PileSpec::fixed("tableaux8", PileKind::Tableaux, 8.5, 0.0),
    PileSpec::fixed("tableaux9", PileKind::Tableaux, 9.5, 0.0),
    PileSpec::fixed("tableaux10", PileKind::Tableaux, 10.5, 0.0),
    PileSpec::fixed("stock", PileKind::Stock, 0.0, 0.0),
];

/// Spider rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spider;

impl RuleSet for Spider {
    fn id(&self) -> GameId {
        GameId::Spider
    }

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn piles(&self) -> &'static [PileSpec] {
        &PILES
    }

    fn board(&self, _orientation: Orientation) -> Board {
        Board::new(12, 4)
    }

    fn options(&self) -> Options {
        Options::new().with(INSTANT_FLIP, "Flip tableaux cards automatically", true)
    }

    fn deal(&self, game: &mut Game, rng: &mut GameRng) {
        let mut deck = Deck::with_copies(2);
        deck.shuffle(rng);

        for (i, pile) in game.ids_of(PileKind::Tableaux).into_iter().enumerate() {
            let count = if i < 4 { 6 } else { 5 };
            game.pile_mut(pile).set_cards(deck.draw(count));
            primitives::flip(primitives::top_mut(game.pile_mut(pile)));
        }
        game.pile_mut(STOCK).set_cards(deck.draw(50));
    }

    fn pile_rules(&self, kind: PileKind) -> Option<PileRules> {
        match kind {
            PileKind::Tableaux => Some(PileRules::new(
                tableau_tap,
                tableau_split,
                tableau_merge,
                Layout::Fanned,
            )),
            PileKind::Stock => Some(PileRules::new(stock_tap, no_split, no_merge, Layout::Squared)),
            _ => None,
        }
    }

    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks) {
        if primitives::empty(game.pile(STOCK)) && all_empty(game, PileKind::Tableaux) {
            game.declare_win(hooks);
        }
    }

    fn bonus(&self, _elapsed_ms: u64) -> i32 {
        0
    }
}

fn stock_tap(game: &mut Game, stock: PileId, hooks: &mut dyn Hooks) {
    let tableaux = game.ids_of(PileKind::Tableaux);
    if primitives::empty(game.pile(stock))
        || tableaux.iter().any(|&t| primitives::empty(game.pile(t)))
    {
        return;
    }

    for &t in &tableaux {
        let (from, to) = game.pair_mut(stock, t);
        if let Some(card) = primitives::pop(from) {
            to.cards_mut().push(card);
        }
    }

    if game.options.enabled(INSTANT_FLIP) {
        flip_all(game, PileKind::Tableaux, hooks);
    }
    clear_runs(game, hooks);
    game.commit(hooks);
}

fn tableau_tap(game: &mut Game, pile: PileId, hooks: &mut dyn Hooks) {
    if flip_top(game, pile, hooks) {
        clear_runs(game, hooks);
        game.commit(hooks);
    }
}

fn tableau_split(game: &mut Game, pile: PileId, index: usize) -> Option<Candidate> {
    let cards = game.pile(pile).cards();
    if index >= cards.len() || !suited_run(&cards[index..]) {
        return None;
    }
    Some(lift(game, pile, index))
}

fn tableau_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    let fits = match (primitives::top(game.pile(pile)), candidate.lead()) {
        (Some(top), Some(lead)) => lead.is_one_below(top),
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if !fits {
        return Err(candidate);
    }

    land(game, pile, candidate);
    clear_runs(game, hooks);
    if game.options.enabled(INSTANT_FLIP) {
        flip_all(game, PileKind::Tableaux, hooks);
    }
    game.add_score(MOVE_COST, hooks);
    game.commit(hooks);
    Ok(())
}

/// Start of the topmost face-up King-to-Ace run of one suit, if any.
fn complete_run(cards: &[Card]) -> Option<usize> {
    cards
        .windows(RUN)
        .rposition(|run| {
            run[0].rank == Rank::King && run[RUN - 1].rank == Rank::Ace && suited_run(run)
        })
}

/// Take every complete run off the tableaux, 100 points each.
fn clear_runs(game: &mut Game, hooks: &mut dyn Hooks) {
    for t in game.ids_of(PileKind::Tableaux) {
        loop {
            let pile = game.pile_mut(t);
            let Some(start) = complete_run(pile.cards()) else {
                break;
            };
            pile.cards_mut().drain(start..start + RUN);
            game.add_score(RUN_SCORE, hooks);
        }
    }
}
