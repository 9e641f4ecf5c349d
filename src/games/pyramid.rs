//! Pyramid.
//!
//! Clear a 28-card pyramid by removing exposed cards that sum to 13, or
//! Kings on their own. Cards never move between piles by dragging: the
//! player selects cards with taps and matched cards die in place, so the
//! pyramid's index arithmetic stays valid.
//!
//! A pyramid card at index `i` on row `r` is covered by the cards at
//! `i + r + 1` and `i + r + 2`. It is exposed once both are dead, or when it
//! sits on the bottom row.

use smallvec::SmallVec;

use crate::core::card::Card;
use crate::core::config::{Board, Orientation, PileId, PileKind, PileSpec, Slot};
use crate::core::deck::Deck;
use crate::core::rng::GameRng;
use crate::games::GameId;
use crate::piles::layout::pyramid_row;
use crate::piles::primitives::{self, CardStack};
use crate::piles::Layout;
use crate::rules::engine::{no_merge, no_split, time_bonus};
use crate::rules::{Game, GameInfo, Hooks, PileRules, RuleSet};

const PYRAMID: PileId = PileId(0);
const STOCK: PileId = PileId(1);
const TEMP: PileId = PileId(2);
const WASTE: PileId = PileId(3);

const ROWS: usize = 7;
/// Raise selected cards by this fraction of their height.
pub const SELECTION_OFFSET: f32 = 0.3;
const MATCH_SCORE: i32 = 10;
const ROW_SCORE: i32 = 50;
const RECYCLE_PENALTY: i32 = -100;

static INFO: GameInfo = GameInfo {
    name: "Pyramid",
    description: "Clear the pyramid.",
    rules: &[
        "Pyramid: Clear the pyramid by selecting pairs of cards that sum to 13.",
        "Stock: Cards may be drawn from the stock and placed in the waste.",
        "Waste: The top card in the waste may be selected.",
    ],
};

static PILES: [PileSpec; 4] = [
    PileSpec::oriented("pyramid", PileKind::Pyramid, Slot::new(0.0, 0.0), Slot::new(2.0, 0.0))
        .without_outline(),
    PileSpec::oriented("stock", PileKind::Stock, Slot::new(0.0, 4.5), Slot::new(0.0, 0.0)),
    PileSpec::oriented("temp", PileKind::Temp, Slot::new(1.0, 4.5), Slot::new(1.0, 0.0)),
    PileSpec::oriented("waste", PileKind::Waste, Slot::new(6.0, 4.5), Slot::new(9.0, 0.0)),
];

/// Pyramid rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pyramid;

impl RuleSet for Pyramid {
    fn id(&self) -> GameId {
        GameId::Pyramid
    }

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn piles(&self) -> &'static [PileSpec] {
        &PILES
    }

    fn board(&self, orientation: Orientation) -> Board {
        match orientation {
            Orientation::Portrait => Board::new(7, 6),
            Orientation::Landscape => Board::new(10, 4),
        }
    }

    fn undo(&self) -> bool {
        false
    }

    fn deal(&self, game: &mut Game, rng: &mut GameRng) {
        let mut deck = Deck::standard();
        deck.shuffle(rng);

        let pyramid = deck.draw(28).into_iter().map(Card::face_up).collect();
        game.pile_mut(PYRAMID).set_cards(pyramid);
        game.pile_mut(STOCK).set_cards(deck.draw(24));
    }

    fn pile_rules(&self, kind: PileKind) -> Option<PileRules> {
        match kind {
            PileKind::Pyramid => Some(PileRules::inert(Layout::Pyramid)),
            PileKind::Stock => Some(PileRules::new(stock_tap, no_split, no_merge, Layout::Squared)),
            PileKind::Temp | PileKind::Waste => Some(PileRules::inert(Layout::Squared)),
            _ => None,
        }
    }

    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks) {
        let pyramid = game.pile(PYRAMID).cards();
        if !pyramid.iter().any(|c| c.alive) {
            game.declare_win(hooks);
            return;
        }

        let open: Vec<&Card> = (0..pyramid.len())
            .filter(|&i| pyramid[i].alive && exposed(pyramid, i))
            .map(|i| &pyramid[i])
            .collect();

        let king = open.iter().any(|c| c.rank.value() == 13);
        let pair = open.iter().enumerate().any(|(i, a)| {
            open.iter()
                .skip(i + 1)
                .any(|b| a.rank.value() + b.rank.value() == 13)
        });
        let reserve = [WASTE, STOCK, TEMP]
            .into_iter()
            .flat_map(|id| game.pile(id).cards())
            .filter(|c| c.alive)
            .any(|a| open.iter().any(|b| a.rank.value() + b.rank.value() == 13));

        if !king && !pair && !reserve {
            game.declare_lose(hooks);
        }
    }

    fn bonus(&self, elapsed_ms: u64) -> i32 {
        time_bonus(60_000.0, elapsed_ms)
    }

    fn tap_card(&self, game: &mut Game, pile: PileId, index: usize, hooks: &mut dyn Hooks) {
        let Some(card) = game.pile(pile).cards().get(index) else {
            return;
        };
        if !card.alive {
            return;
        }
        if card.selected {
            set_selected(&mut game.pile_mut(pile).cards_mut()[index], false);
            return;
        }

        let selectable = match game.pile(pile).kind() {
            PileKind::Pyramid => exposed(game.pile(pile).cards(), index),
            PileKind::Waste | PileKind::Temp => {
                primitives::top_index(game.pile(pile)) == Some(index)
            }
            _ => false,
        };
        if !selectable {
            return;
        }
        set_selected(&mut game.pile_mut(pile).cards_mut()[index], true);

        let selected = selection(game);
        let before = row_counts(game.pile(PYRAMID).cards());

        let matched = match selected.as_slice() {
            [a, b] => {
                let sum = card_at(game, *a).rank.value() + card_at(game, *b).rank.value();
                for &at in &selected {
                    set_selected(card_mut_at(game, at), false);
                }
                sum == 13
            }
            [a] => {
                let king = card_at(game, *a).rank.value() == 13;
                if king {
                    set_selected(card_mut_at(game, *a), false);
                }
                king
            }
            _ => false,
        };
        if !matched {
            return;
        }

        for &at in &selected {
            card_mut_at(game, at).alive = false;
        }
        game.add_score(MATCH_SCORE, hooks);

        let after = row_counts(game.pile(PYRAMID).cards());
        for row in 0..ROWS {
            if before[row] > 0 && after[row] == 0 {
                game.add_score((ROWS - row) as i32 * ROW_SCORE, hooks);
            }
        }
        game.commit(hooks);
    }
}

/// `true` if the card at `index` has no alive card covering it.
pub fn exposed(pyramid: &[Card], index: usize) -> bool {
    let row = pyramid_row(index);
    if row + 1 >= ROWS {
        return true;
    }
    let covered = |i: usize| pyramid.get(i).is_some_and(|c| c.alive);
    !covered(index + row + 1) && !covered(index + row + 2)
}

/// Alive cards per pyramid row.
fn row_counts(pyramid: &[Card]) -> [usize; ROWS] {
    let mut counts = [0; ROWS];
    for (i, card) in pyramid.iter().enumerate() {
        if card.alive {
            if let Some(count) = counts.get_mut(pyramid_row(i)) {
                *count += 1;
            }
        }
    }
    counts
}

type At = (PileId, usize);

/// Selected cards across the pyramid, waste and temp.
fn selection(game: &Game) -> SmallVec<[At; 2]> {
    [PYRAMID, WASTE, TEMP]
        .into_iter()
        .flat_map(|id| {
            game.pile(id)
                .cards()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.selected)
                .map(move |(i, _)| (id, i))
        })
        .collect()
}

fn card_at(game: &Game, (pile, index): At) -> &Card {
    &game.pile(pile).cards()[index]
}

fn card_mut_at(game: &mut Game, (pile, index): At) -> &mut Card {
    &mut game.pile_mut(pile).cards_mut()[index]
}

fn set_selected(card: &mut Card, selected: bool) {
    card.selected = selected;
    card.offset.y = if selected { SELECTION_OFFSET } else { 0.0 };
}

fn stock_tap(game: &mut Game, stock: PileId, hooks: &mut dyn Hooks) {
    for id in [TEMP, WASTE] {
        for card in game.pile_mut(id).cards_mut() {
            set_selected(card, false);
        }
    }

    {
        let (temp, waste) = game.pair_mut(TEMP, WASTE);
        primitives::move_all(temp, waste, true);
    }

    if primitives::empty(game.pile(stock)) {
        let (waste, stock_pile) = game.pair_mut(WASTE, stock);
        primitives::move_all(waste, stock_pile, false);
        game.add_score(RECYCLE_PENALTY, hooks);
    } else {
        let (stock_pile, temp) = game.pair_mut(stock, TEMP);
        if let Some(mut card) = primitives::pop(stock_pile) {
            card.visible = true;
            temp.cards_mut().push(card);
        }
    }

    game.commit(hooks);
}
