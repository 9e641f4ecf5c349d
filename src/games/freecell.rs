//! Freecell.
//!
//! All 52 cards are dealt face-up into eight tableaux. Four cells each hold
//! one card. Runs may only move when there is room to move them one card at
//! a time through free cells and empty tableaux.

use crate::core::card::Rank;
use crate::core::config::{Board, Options, Orientation, PileId, PileKind, PileSpec, Slot};
use crate::core::deck::Deck;
use crate::core::rng::GameRng;
use crate::games::common::{all_empty, all_full, alternating_run, builds_on_foundation};
use crate::games::GameId;
use crate::piles::primitives::{self, CardStack};
use crate::piles::{Candidate, Layout};
use crate::rules::engine::{no_split, no_tap};
use crate::rules::game::{land, lift};
use crate::rules::{Game, GameInfo, Hooks, PileRules, RuleSet};

/// Move every playable card to the foundations after each move.
pub const AUTO_FOUNDATION: &str = "autoFoundation";

static INFO: GameInfo = GameInfo {
    name: "Freecell",
    description: "Each game is a new puzzle.",
    rules: &[
        "Foundations: The foundations are built up by suit starting with an ace.",
        "Tableaux: The tableaux are built down by alternating colors.",
        "Cells: Each cell may hold any card.",
        "You may only move groups of cards if there is enough room to move each card individually.",
    ],
};

static PILES: [PileSpec; 16] = [
    tableau("tableaux1", 0.0),
    tableau("tableaux2", 1.0),
    tableau("tableaux3", 2.0),
    tableau("tableaux4", 3.0),
    tableau("tableaux5", 4.0),
    tableau("tableaux6", 5.0),
    tableau("tableaux7", 6.0),
    tableau("tableaux8", 7.0),
    PileSpec::oriented(
        "foundation1",
        PileKind::Foundation,
        Slot::new(4.0, 0.0),
        Slot::new(0.0, 0.0),
    )
    .with_back(Rank::Ace),
    PileSpec::oriented(
        "foundation2",
        PileKind::Foundation,
        Slot::new(5.0, 0.0),
        Slot::new(0.0, 1.0),
    )
    .with_back(Rank::Ace),
    PileSpec::oriented(
        "foundation3",
        PileKind::Foundation,
        Slot::new(6.0, 0.0),
        Slot::new(0.0, 2.0),
    )
    .with_back(Rank::Ace),
    PileSpec::oriented(
        "foundation4",
        PileKind::Foundation,
        Slot::new(7.0, 0.0),
        Slot::new(0.0, 3.0),
    )
    .with_back(Rank::Ace),
    PileSpec::oriented("cell1", PileKind::Cell, Slot::new(0.0, 0.0), Slot::new(10.0, 0.0)),
    PileSpec::oriented("cell2", PileKind::Cell, Slot::new(1.0, 0.0), Slot::new(10.0, 1.0)),
    PileSpec::oriented("cell3", PileKind::Cell, Slot::new(2.0, 0.0), Slot::new(10.0, 2.0)),
    PileSpec::oriented("cell4", PileKind::Cell, Slot::new(3.0, 0.0), Slot::new(10.0, 3.0)),
];

const fn tableau(key: &'static str, col: f32) -> PileSpec {
    PileSpec::oriented(
        key,
        PileKind::Tableaux,
        Slot::new(col, 1.5),
        Slot::new(col + 1.5, 0.0),
    )
}

/// Cards dealt to each tableau.
const DEAL: [usize; 8] = [7, 7, 7, 7, 6, 6, 6, 6];

/// Freecell rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Freecell;

impl RuleSet for Freecell {
    fn id(&self) -> GameId {
        GameId::Freecell
    }

    fn info(&self) -> &'static GameInfo {
        &INFO
    }

    fn piles(&self) -> &'static [PileSpec] {
        &PILES
    }

    fn board(&self, orientation: Orientation) -> Board {
        match orientation {
            Orientation::Portrait => Board::new(8, 4),
            Orientation::Landscape => Board::new(11, 4),
        }
    }

    fn options(&self) -> Options {
        Options::new().with(AUTO_FOUNDATION, "Automatically fill the foundation.", true)
    }

    fn deal(&self, game: &mut Game, rng: &mut GameRng) {
        let mut deck = Deck::standard();
        deck.shuffle(rng);

        for (pile, count) in game.ids_of(PileKind::Tableaux).into_iter().zip(DEAL) {
            let cards = deck.draw(count).into_iter().map(|c| c.face_up()).collect();
            game.pile_mut(pile).set_cards(cards);
        }
    }

    fn pile_rules(&self, kind: PileKind) -> Option<PileRules> {
        match kind {
            PileKind::Tableaux => Some(PileRules::new(
                no_tap,
                tableau_split,
                tableau_merge,
                Layout::Fanned,
            )),
            PileKind::Foundation => Some(PileRules::new(
                no_tap,
                no_split,
                foundation_merge,
                Layout::Squared,
            )),
            PileKind::Cell => Some(PileRules::new(no_tap, cell_split, cell_merge, Layout::Squared)),
            _ => None,
        }
    }

    fn update_status(&self, game: &mut Game, hooks: &mut dyn Hooks) {
        if all_empty(game, PileKind::Tableaux)
            && all_empty(game, PileKind::Cell)
            && all_full(game, PileKind::Foundation)
        {
            game.declare_win(hooks);
        }
    }

    fn bonus(&self, _elapsed_ms: u64) -> i32 {
        0
    }
}

/// How many more cards the move needs than the free space allows.
///
/// Empty tableaux and cells other than `target` and `source` count as free.
/// A result above zero means the run is too long.
fn supermove_excess(game: &Game, target: PileId, source: PileId, moving: usize) -> i32 {
    let free = |kind| {
        game.ids_of(kind)
            .into_iter()
            .filter(|&id| id != target && id != source && game.pile(id).is_empty())
            .count() as i32
    };
    let tableaux = free(PileKind::Tableaux);
    let cells = free(PileKind::Cell);

    moving as i32 - tableaux * (cells + 1) - cells - 1
}

fn tableau_split(game: &mut Game, pile: PileId, index: usize) -> Option<Candidate> {
    let cards = game.pile(pile).cards();
    if index >= cards.len() || !alternating_run(&cards[index..]) {
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
        (Some(top), Some(lead)) => lead.is_one_below(top) && lead.alternates(top),
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if !fits || supermove_excess(game, pile, candidate.source(), candidate.len()) > 0 {
        return Err(candidate);
    }

    land(game, pile, candidate);
    finish_move(game, hooks);
    Ok(())
}

fn foundation_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    let fits = candidate.len() == 1
        && candidate
            .lead()
            .is_some_and(|lead| builds_on_foundation(primitives::top(game.pile(pile)), lead));
    if !fits {
        return Err(candidate);
    }

    land(game, pile, candidate);
    finish_move(game, hooks);
    Ok(())
}

fn cell_split(game: &mut Game, pile: PileId, _index: usize) -> Option<Candidate> {
    if game.pile(pile).is_empty() {
        return None;
    }
    Some(lift(game, pile, 0))
}

fn cell_merge(
    game: &mut Game,
    pile: PileId,
    candidate: Candidate,
    hooks: &mut dyn Hooks,
) -> Result<(), Candidate> {
    if !game.pile(pile).is_empty() || candidate.len() != 1 {
        return Err(candidate);
    }

    land(game, pile, candidate);
    finish_move(game, hooks);
    Ok(())
}

fn finish_move(game: &mut Game, hooks: &mut dyn Hooks) {
    if game.options.enabled(AUTO_FOUNDATION) {
        auto_foundation(game);
    }
    game.commit(hooks);
}

/// Play tableau and cell tops to the foundations until nothing fits.
fn auto_foundation(game: &mut Game) {
    let mut sources = game.ids_of(PileKind::Tableaux);
    sources.extend(game.ids_of(PileKind::Cell));
    let foundations = game.ids_of(PileKind::Foundation);

    let mut moved = true;
    while moved {
        moved = false;
        for &from in &sources {
            for &to in &foundations {
                let fits = primitives::top(game.pile(from))
                    .is_some_and(|card| builds_on_foundation(primitives::top(game.pile(to)), card));
                if !fits {
                    continue;
                }
                let (source, foundation) = game.pair_mut(from, to);
                if let Some(card) = primitives::pop(source) {
                    foundation.cards_mut().push(card);
                    moved = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Suit};
    use crate::rules::Recorder;

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank).face_up()
    }

    /// A dealt game with every pile cleared.
    fn bare() -> Game {
        let mut game = Freecell.init(5);
        game.options.set(AUTO_FOUNDATION, false);
        for i in 0..game.piles().len() {
            game.pile_mut(PileId::new(i as u8)).set_cards(Vec::new());
        }
        game
    }

    fn id(game: &Game, key: &str) -> PileId {
        game.pile_id(key).unwrap()
    }

    #[test]
    fn test_deal_is_face_up() {
        let game = Freecell.init(5);
        let sizes: Vec<_> = game
            .ids_of(PileKind::Tableaux)
            .into_iter()
            .map(|t| game.pile(t).len())
            .collect();

        assert_eq!(sizes, DEAL.to_vec());
        assert!(game.piles().iter().flat_map(|p| p.cards()).all(|c| c.visible));
        assert_eq!(game.ids_of(PileKind::Cell).len(), 4);
    }

    #[test]
    fn test_cell_holds_one_card() {
        let mut game = bare();
        let cell = id(&game, "cell1");
        let t = id(&game, "tableaux1");
        let mut hooks = Recorder::new();

        let one = Candidate::new(t, PileKind::Tableaux, vec![up(Suit::Clubs, Rank::Nine)]);
        assert!(game.merge(cell, one, &mut hooks).is_ok());

        let another = Candidate::new(t, PileKind::Tableaux, vec![up(Suit::Clubs, Rank::Eight)]);
        assert!(game.merge(cell, another, &mut hooks).is_err());

        let lifted = game.split(cell, 0).unwrap();
        assert_eq!(lifted.cards()[0].rank, Rank::Nine);
        assert!(game.pile(cell).is_empty());
    }

    #[test]
    fn test_cell_rejects_runs() {
        let mut game = bare();
        let cell = id(&game, "cell1");
        let t = id(&game, "tableaux1");

        let run = Candidate::new(
            t,
            PileKind::Tableaux,
            vec![up(Suit::Clubs, Rank::Nine), up(Suit::Hearts, Rank::Eight)],
        );
        assert!(game.merge(cell, run, &mut Recorder::new()).is_err());
    }

    #[test]
    fn test_foundations_cannot_split() {
        let mut game = bare();
        let f = id(&game, "foundation1");
        game.pile_mut(f).set_cards(vec![up(Suit::Clubs, Rank::Ace)]);

        assert!(game.split(f, 0).is_none());
    }

    #[test]
    fn test_empty_tableau_takes_anything() {
        let mut game = bare();
        let t = id(&game, "tableaux1");
        let src = id(&game, "tableaux2");

        let seven = Candidate::new(src, PileKind::Tableaux, vec![up(Suit::Hearts, Rank::Seven)]);
        assert!(game.merge(t, seven, &mut Recorder::new()).is_ok());
    }

    #[test]
    fn test_supermove_budget() {
        let game = bare();
        let target = id(&game, "tableaux1");
        let source = id(&game, "tableaux2");

        // Everything is empty: 6 free tableaux, 4 free cells.
        assert_eq!(supermove_excess(&game, target, source, 1), -34);
    }

    #[test]
    fn test_auto_foundation_cascades() {
        let mut game = bare();
        game.options.set(AUTO_FOUNDATION, true);
        let t1 = id(&game, "tableaux1");
        let t2 = id(&game, "tableaux2");
        let cell = id(&game, "cell1");
        game.pile_mut(t1).set_cards(vec![up(Suit::Hearts, Rank::Two)]);
        game.pile_mut(t2).set_cards(vec![up(Suit::Spades, Rank::Five)]);

        let ace = Candidate::new(t2, PileKind::Tableaux, vec![up(Suit::Hearts, Rank::Ace)]);
        assert!(game.merge(cell, ace, &mut Recorder::new()).is_ok());

        let f = id(&game, "foundation1");
        assert_eq!(game.pile(f).len(), 2);
        assert!(game.pile(cell).is_empty());
        assert!(game.pile(t1).is_empty());
        assert_eq!(game.pile(t2).len(), 1);
    }

    #[test]
    fn test_win_when_everything_is_home() {
        let mut game = bare();
        let mut hooks = Recorder::new();
        for (f, suit) in game.ids_of(PileKind::Foundation).into_iter().zip(Suit::ALL) {
            let cards = Rank::ALL.iter().map(|&r| up(suit, r)).collect();
            game.pile_mut(f).set_cards(cards);
        }

        game.update_status(&mut hooks);
        game.update_status(&mut hooks);

        assert!(game.is_won());
        assert_eq!(hooks.wins, 1);
        assert_eq!(Freecell.bonus(100_000), 0);
    }
}
