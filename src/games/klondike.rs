//! Klondike, the classic solitaire.
//!
//! - Stock: tap to deal one (or three) cards face-up onto the waste; an
//!   empty stock recycles the waste
//! - Waste: only its top card can be lifted
//! - Tableaux: built down in alternating colours, Kings on empty piles
//! - Foundations: built up by suit from the Ace, one card at a time
//!
//! ## Scoring
//!
//! | Event | Points |
//! |---|---|
//! | turn a tableau card | +5 |
//! | waste to tableau | +5 |
//! | any card to a foundation | +10 |
//! | foundation back to tableau | -15 |
//! | recycle the waste (single draw) | -100 |

use crate::core::card::Rank;
use crate::core::config::{Board, Options, Orientation, PileId, PileKind, PileSpec, Slot};
use crate::core::deck::Deck;
use crate::core::rng::GameRng;
use crate::games::common::{
    all_empty, all_full, alternating_run, builds_on_foundation, flip_all, flip_top, split_top,
};
use crate::games::GameId;
use crate::piles::primitives::{self, CardStack};
use crate::piles::{Candidate, Layout};
use crate::rules::engine::{no_merge, no_split, no_tap, time_bonus};
use crate::rules::game::{land, lift};
use crate::rules::{Game, GameInfo, Hooks, PileRules, RuleSet};

/// Deal three cards per stock tap.
pub const TRIPLE_DRAW: &str = "tripleDraw";
/// Turn exposed tableau cards after every move.
pub const INSTANT_FLIP: &str = "instantFlip";

const STOCK: PileId = PileId(0);
const WASTE: PileId = PileId(1);

const RECYCLE_PENALTY: i32 = -100;
const FROM_WASTE: i32 = 5;
const TO_FOUNDATION: i32 = 10;
const FROM_FOUNDATION: i32 = -15;

static INFO: GameInfo = GameInfo {
    name: "Klondike",
    description: "The classic game of solitaire.",
    rules: &[
        "Foundations: The foundations are built up by suit starting with an ace.",
        "Tableaux: The tableaux are built down by alternating colors starting with a king.",
        "Stock: Cards may be drawn from the stock and placed in the waste.",
        "Waste: The top card in the waste may be placed on the tableaux or the foundations.",
    ],
};

static PILES: [PileSpec; 13] = [
    PileSpec::oriented("stock", PileKind::Stock, Slot::new(0.0, 0.0), Slot::new(11.0, 0.0)),
    PileSpec::oriented("waste", PileKind::Waste, Slot::new(1.0, 0.0), Slot::new(9.0, 0.0)),
    tableau("tableaux1", 0.0, 1.5),
    tableau("tableaux2", 1.0, 2.5),
    tableau("tableaux3", 2.0, 3.5),
    tableau("tableaux4", 3.0, 4.5),
    tableau("tableaux5", 4.0, 5.5),
    tableau("tableaux6", 5.0, 6.5),
    tableau("tableaux7", 6.0, 7.5),
    foundation("foundation1", Slot::new(3.0, 0.0), Slot::new(0.0, 0.0)),
    foundation("foundation2", Slot::new(4.0, 0.0), Slot::new(0.0, 1.0)),
    foundation("foundation3", Slot::new(5.0, 0.0), Slot::new(0.0, 2.0)),
    foundation("foundation4", Slot::new(6.0, 0.0), Slot::new(0.0, 3.0)),
];

/// Tableaux sit in row 1.5 in portrait and along row 0 in landscape.
const fn tableau(key: &'static str, portrait_col: f32, landscape_col: f32) -> PileSpec {
    PileSpec::oriented(
        key,
        PileKind::Tableaux,
        Slot::new(portrait_col, 1.5),
        Slot::new(landscape_col, 0.0),
    )
    .with_back(Rank::King)
}

const fn foundation(key: &'static str, portrait: Slot, landscape: Slot) -> PileSpec {
    PileSpec::oriented(key, PileKind::Foundation, portrait, landscape).with_back(Rank::Ace)
}

/// Klondike rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Klondike;

impl RuleSet for Klondike {
    fn id(&self) -> GameId {
        GameId::Klondike
    }

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn piles(&self) -> &'static [PileSpec] {
        &PILES
    }

    fn board(&self, orientation: Orientation) -> Board {
        match orientation {
            Orientation::Portrait => Board::new(7, 4),
            Orientation::Landscape => Board::new(12, 4),
        }
    }

    fn options(&self) -> Options {
        Options::new()
            .with(TRIPLE_DRAW, "Deal 3 cards", false)
            .with(INSTANT_FLIP, "Flip tableaux cards automatically", true)
    }

    fn deal(&self, game: &mut Game, rng: &mut GameRng) {
        let mut deck = Deck::standard();
        deck.shuffle(rng);

        game.pile_mut(STOCK).set_cards(deck.draw(24));
        for (i, pile) in game.ids_of(PileKind::Tableaux).into_iter().enumerate() {
            game.pile_mut(pile).set_cards(deck.draw(i + 1));
            primitives::flip(primitives::top_mut(game.pile_mut(pile)));
        }
    }

    fn pile_rules(&self, kind: PileKind) -> Option<PileRules> {
        match kind {
            PileKind::Stock => Some(PileRules::new(stock_tap, no_split, no_merge, Layout::Squared)),
            PileKind::Waste => Some(PileRules::new(no_tap, split_top, no_merge, Layout::Squared)),
            PileKind::Tableaux => Some(PileRules::new(
                tableau_tap,
                tableau_split,
                tableau_merge,
                Layout::Fanned,
            )),
            PileKind::Foundation => Some(PileRules::new(
                no_tap,
                split_top,
                foundation_merge,
                Layout::Squared,
            )),
            _ => None,
        }
    }

    fn layout(&self, kind: PileKind, game: &Game) -> Layout {
        match kind {
            PileKind::Waste if game.options.enabled(TRIPLE_DRAW) => Layout::TripleDraw,
            PileKind::Tableaux => Layout::Fanned,
            _ => Layout::Squared,
        }
    }

    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks) {
        if !primitives::empty(game.pile(STOCK)) || !primitives::empty(game.pile(WASTE)) {
            return;
        }

        let victory = if all_empty(game, PileKind::Tableaux) {
            all_full(game, PileKind::Foundation)
        } else {
            game.ids_of(PileKind::Tableaux)
                .into_iter()
                .all(|id| game.pile(id).cards().iter().all(|c| c.visible))
        };

        if victory {
            game.declare_win(hooks);
        }
    }

    fn bonus(&self, elapsed_ms: u64) -> i32 {
        if elapsed_ms > 30_000 {
            time_bonus(35_000.0, elapsed_ms)
        } else {
            0
        }
    }
}

fn stock_tap(game: &mut Game, stock: PileId, hooks: &mut dyn Hooks) {
    let triple = game.options.enabled(TRIPLE_DRAW);
    let (stock_pile, waste) = game.pair_mut(stock, WASTE);

    if !primitives::empty(stock_pile) {
        let count = if triple { 3 } else { 1 };
        for _ in 0..count {
            let Some(mut card) = primitives::pop(stock_pile) else {
                break;
            };
            card.visible = true;
            waste.cards_mut().push(card);
        }
    } else if !primitives::empty(waste) {
        primitives::move_all(waste, stock_pile, false);
        if !triple {
            game.add_score(RECYCLE_PENALTY, hooks);
        }
    } else {
        return;
    }

    game.commit(hooks);
}

fn tableau_tap(game: &mut Game, pile: PileId, hooks: &mut dyn Hooks) {
    if flip_top(game, pile, hooks) {
        game.commit(hooks);
    }
}

fn tableau_split(game: &mut Game, pile: PileId, index: usize) -> Option<Candidate> {
    let cards = game.pile(pile).cards();
    let touched = cards.get(index)?;
    if !touched.visible || !alternating_run(&cards[index..]) {
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
    let accepted = match (primitives::top(game.pile(pile)), candidate.lead()) {
        (Some(top), Some(lead)) => lead.is_one_below(top) && lead.alternates(top),
        (None, Some(lead)) => lead.rank == Rank::King,
        (_, None) => false,
    };
    if !accepted {
        return Err(candidate);
    }

    let from = candidate.kind();
    land(game, pile, candidate);
    after_move(game, hooks);
    match from {
        PileKind::Foundation => game.add_score(FROM_FOUNDATION, hooks),
        PileKind::Waste => game.add_score(FROM_WASTE, hooks),
        _ => {}
    }
    game.commit(hooks);
    Ok(())
}

fn foundation_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    let accepted = candidate.len() == 1
        && candidate
            .lead()
            .is_some_and(|lead| builds_on_foundation(primitives::top(game.pile(pile)), lead));
    if !accepted {
        return Err(candidate);
    }

    land(game, pile, candidate);
    after_move(game, hooks);
    game.add_score(TO_FOUNDATION, hooks);
    game.commit(hooks);
    Ok(())
}

fn after_move(game: &mut Game, hooks: &mut dyn Hooks) {
    if game.options.enabled(INSTANT_FLIP) {
        flip_all(game, PileKind::Tableaux, hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Suit};
    use crate::rules::Recorder;

    fn game() -> Game {
        Klondike.init(7)
    }

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank).face_up()
    }

    #[test]
    fn test_deal() {
        let game = game();

        assert_eq!(game.pile(STOCK).len(), 24);
        assert!(game.pile(WASTE).is_empty());
        for (i, id) in game.ids_of(PileKind::Tableaux).into_iter().enumerate() {
            let pile = game.pile(id);
            assert_eq!(pile.len(), i + 1);
            assert!(primitives::top(pile).unwrap().visible);
            assert_eq!(pile.cards().iter().filter(|c| c.visible).count(), 1);
            assert_eq!(pile.back, Some(Rank::King));
        }
        assert_eq!(game.pile(PileId(9)).back, Some(Rank::Ace));
        assert!(game.undo_allowed());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = Klondike.init(99);
        let b = Klondike.init(99);
        assert_eq!(a.pile(STOCK).cards(), b.pile(STOCK).cards());
    }

    #[test]
    fn test_stock_draws_one_face_up() {
        let mut game = game();
        let mut hooks = Recorder::new();

        game.tap(STOCK, &mut hooks);

        assert_eq!(game.pile(STOCK).len(), 23);
        assert_eq!(game.pile(WASTE).len(), 1);
        assert!(game.pile(WASTE).cards()[0].visible);
        assert_eq!(hooks.histories, 1);
        assert_eq!(hooks.saves, 1);
    }

    #[test]
    fn test_triple_draw() {
        let mut game = game();
        game.options.set(TRIPLE_DRAW, true);
        Klondike.update_options(&mut game);

        game.tap(STOCK, &mut Recorder::new());

        assert_eq!(game.pile(WASTE).len(), 3);
        assert_eq!(game.pile(WASTE).layout, Layout::TripleDraw);
    }

    #[test]
    fn test_recycle_costs_in_single_draw() {
        let mut game = game();
        let mut hooks = Recorder::new();
        game.add_score(200, &mut hooks);
        for _ in 0..24 {
            game.tap(STOCK, &mut hooks);
        }
        let drawn_order: Vec<_> = game.pile(WASTE).cards().to_vec();

        game.tap(STOCK, &mut hooks);

        assert!(game.pile(WASTE).is_empty());
        assert_eq!(game.pile(STOCK).len(), 24);
        assert!(game.pile(STOCK).cards().iter().all(|c| !c.visible));
        assert_eq!(game.score(), 100);
        // The first card drawn is on top again.
        assert_eq!(primitives::top(game.pile(STOCK)).unwrap().rank, drawn_order[0].rank);
        assert_eq!(primitives::top(game.pile(STOCK)).unwrap().suit, drawn_order[0].suit);
    }

    #[test]
    fn test_recycle_is_free_in_triple_draw() {
        let mut game = game();
        game.options.set(TRIPLE_DRAW, true);
        let mut hooks = Recorder::new();
        for _ in 0..8 {
            game.tap(STOCK, &mut hooks);
        }
        game.tap(STOCK, &mut hooks);

        assert_eq!(game.pile(STOCK).len(), 24);
        assert!(!hooks.scores.contains(&RECYCLE_PENALTY));
    }

    #[test]
    fn test_tap_with_both_empty_does_nothing() {
        let mut game = game();
        game.pile_mut(STOCK).set_cards(Vec::new());
        let mut hooks = Recorder::new();

        game.tap(STOCK, &mut hooks);

        assert_eq!(hooks, Recorder::new());
    }

    #[test]
    fn test_waste_splits_top_only() {
        let mut game = game();
        game.pile_mut(WASTE)
            .set_cards(vec![up(Suit::Clubs, Rank::Two), up(Suit::Hearts, Rank::Five)]);

        assert!(game.split(WASTE, 0).is_none());
        let candidate = game.split(WASTE, 1).unwrap();
        assert_eq!(candidate.cards()[0].rank, Rank::Five);
        assert_eq!(game.pile(WASTE).len(), 1);
    }

    #[test]
    fn test_tableau_split_needs_visible_card() {
        let mut game = game();
        let t = PileId(8);

        assert!(game.split(t, 0).is_none());
        assert_eq!(game.pile(t).len(), 7);
    }

    #[test]
    fn test_king_onto_empty_only() {
        let mut game = game();
        let t = PileId(2);
        game.pile_mut(t).set_cards(Vec::new());
        let mut hooks = Recorder::new();

        let queen = Candidate::new(WASTE, PileKind::Waste, vec![up(Suit::Hearts, Rank::Queen)]);
        let back = game.merge(t, queen.clone(), &mut hooks).unwrap_err();
        assert_eq!(back, queen);

        let king = Candidate::new(WASTE, PileKind::Waste, vec![up(Suit::Hearts, Rank::King)]);
        assert!(game.merge(t, king, &mut hooks).is_ok());
        assert_eq!(game.pile(t).len(), 1);
        assert!(hooks.scores.contains(&FROM_WASTE));
    }

    #[test]
    fn test_foundation_to_tableau_costs() {
        let mut game = game();
        let t = PileId(2);
        game.pile_mut(t).set_cards(vec![up(Suit::Spades, Rank::Three)]);
        let mut hooks = Recorder::new();

        let two =
            Candidate::new(PileId(9), PileKind::Foundation, vec![up(Suit::Hearts, Rank::Two)]);
        assert!(game.merge(t, two, &mut hooks).is_ok());
        assert!(hooks.scores.contains(&FROM_FOUNDATION));
    }

    #[test]
    fn test_foundation_takes_single_cards() {
        let mut game = game();
        let f = PileId(9);
        let mut hooks = Recorder::new();

        let pair = Candidate::new(
            PileId(2),
            PileKind::Tableaux,
            vec![up(Suit::Hearts, Rank::Ace), up(Suit::Hearts, Rank::Two)],
        );
        assert!(game.merge(f, pair, &mut hooks).is_err());

        let ace = Candidate::new(PileId(2), PileKind::Tableaux, vec![up(Suit::Hearts, Rank::Ace)]);
        assert!(game.merge(f, ace, &mut hooks).is_ok());
        assert_eq!(hooks.scores, vec![TO_FOUNDATION]);
        assert_eq!(hooks.histories, 1);
    }

    #[test]
    fn test_tableau_tap_flips_once() {
        let mut game = game();
        let t = PileId(3);
        primitives::top_mut(game.pile_mut(t)).unwrap().visible = false;
        let mut hooks = Recorder::new();

        game.tap(t, &mut hooks);
        game.tap(t, &mut hooks);

        assert_eq!(hooks.scores, vec![5]);
        assert!(primitives::top(game.pile(t)).unwrap().visible);
    }

    #[test]
    fn test_bonus() {
        assert_eq!(Klondike.bonus(30_000), 0);
        assert_eq!(Klondike.bonus(35_000), 1000);
    }

    #[test]
    fn test_landscape_layout() {
        let mut game = game();
        Klondike.resize(&mut game, 1920, 1080);

        assert_eq!(game.orientation, Orientation::Landscape);
        assert_eq!(game.board, Board::new(12, 4));
        assert_eq!(game.pile(STOCK).slot, Slot::new(11.0, 0.0));
        assert_eq!(game.pile(PileId(12)).slot, Slot::new(0.0, 3.0));
    }
}
