//! Session integration tests.
//!
//! Undo, autosave and resume, options, resize and the finishing bonus.

use rust_patience::games::freecell::AUTO_FOUNDATION;
use rust_patience::games::klondike::TRIPLE_DRAW;
use rust_patience::{
    Card, Document, GameId, Layout, MemoryStore, Orientation, PersistError, PileKind, Rank,
    Recorder, SaveStore, SavedGame, Session, Suit,
};

/// Freecell tableau tops are always liftable and a fresh cell always takes
/// them, which makes for a reliable move.
fn move_to_cell(session: &mut Session<MemoryStore, Recorder>) -> bool {
    let t = session.game().first_of(PileKind::Tableaux).unwrap();
    let cell = session.game().first_of(PileKind::Cell).unwrap();
    let top = session.game().pile(t).len() - 1;
    session.play(t, top, cell)
}

fn freecell() -> Session<MemoryStore, Recorder> {
    let mut session =
        Session::with_hooks(GameId::Freecell, 17, MemoryStore::new(), Recorder::new());
    assert!(session.set_option(AUTO_FOUNDATION, false));
    session
}

/// Klondike with every card home except the King of Spades, which waits on
/// the waste.
fn one_king_short() -> Session<MemoryStore, Recorder> {
    let fresh = Session::new(GameId::Klondike, 3, MemoryStore::new());
    let mut document = Document::capture(fresh.game());
    let home = |suit: Suit, count: usize| -> Vec<Card> {
        Rank::ALL[..count].iter().map(|&r| Card::new(suit, r).face_up()).collect()
    };
    for pile in &mut document.piles {
        pile.cards = match pile.key.as_str() {
            "waste" => vec![Card::new(Suit::Spades, Rank::King).face_up()],
            "foundation1" => home(Suit::Clubs, 13),
            "foundation2" => home(Suit::Hearts, 13),
            "foundation3" => home(Suit::Diamonds, 13),
            "foundation4" => home(Suit::Spades, 12),
            _ => Vec::new(),
        };
    }
    let saved = SavedGame {
        document,
        history: Default::default(),
    };
    let mut store = fresh.into_store();
    store.save("klondike", saved.to_bytes().unwrap());
    Session::resume_with_hooks(GameId::Klondike, store, Recorder::new()).unwrap()
}

/// Play the last King home.
fn win(session: &mut Session<MemoryStore, Recorder>) -> bool {
    let waste = session.game().first_of(PileKind::Waste).unwrap();
    let spades = session.game().pile_id("foundation4").unwrap();
    session.play(waste, 0, spades)
}

// =============================================================================
// Undo
// =============================================================================

/// Undo returns to the position before the last move.
#[test]
fn test_undo_restores_previous_position() {
    let mut session = freecell();
    let start = Document::capture(session.game());

    assert!(move_to_cell(&mut session));
    assert_eq!(session.history_len(), 2);
    assert_ne!(Document::capture(session.game()), start);

    assert!(session.undo());
    assert_eq!(session.history_len(), 1);
    assert_eq!(Document::capture(session.game()), start);

    assert!(!session.undo());
}

/// A won game stays won: undo is refused and `win` fires once.
#[test]
fn test_no_undo_after_win() {
    let mut session = one_king_short();

    assert!(win(&mut session));
    assert!(session.game().is_won());
    assert_eq!(session.hooks().wins, 1);
    assert_eq!(session.history_len(), 2);

    assert!(!session.undo());
    assert!(session.game().is_won());
    assert_eq!(session.history_len(), 2);
    assert_eq!(session.hooks().wins, 1);
}

/// Undo keeps the current orientation.
#[test]
fn test_undo_keeps_orientation() {
    let mut session = freecell();
    assert!(move_to_cell(&mut session));

    session.resize(1920, 1080);
    assert!(session.undo());

    assert_eq!(session.game().orientation, Orientation::Landscape);
    let cell = session.game().first_of(PileKind::Cell).unwrap();
    assert_eq!(session.game().pile(cell).slot.col, 10.0);
}

// =============================================================================
// Drag and drop
// =============================================================================

/// A rejected drop puts the cards back and records nothing.
#[test]
fn test_rejected_drop_restores_source() {
    let mut session = freecell();
    let f = session.game().first_of(PileKind::Foundation).unwrap();
    let t = session.game().first_of(PileKind::Tableaux).unwrap();
    let before = session.game().pile(t).cards().to_vec();

    let candidate = session.drag(t, before.len() - 1).unwrap();
    let accepted = candidate.cards()[0].rank == rust_patience::Rank::Ace;
    assert_eq!(session.drop_on(f, candidate), accepted);

    if !accepted {
        assert_eq!(session.game().pile(t).cards(), &before[..]);
        assert_eq!(session.hooks().histories, 0);
    }
}

/// Hooks given to a session see every move.
#[test]
fn test_host_hooks_are_forwarded() {
    let mut session = freecell();

    assert!(move_to_cell(&mut session));

    assert_eq!(session.hooks().histories, 1);
    assert_eq!(session.hooks().saves, 1);
}

// =============================================================================
// Saving
// =============================================================================

/// Every accepted move is saved and can be resumed with its history.
#[test]
fn test_resume_after_moves() {
    let mut session = freecell();
    assert!(move_to_cell(&mut session));
    let current = Document::capture(session.game());

    let store = session.into_store();
    let blob = store.load("freecell").unwrap();
    let saved = SavedGame::from_bytes(&blob).unwrap();
    assert_eq!(saved.document, current);
    assert_eq!(saved.history.len(), 2);

    let mut resumed = Session::resume(GameId::Freecell, store).unwrap();
    assert_eq!(Document::capture(resumed.game()), current);
    assert_eq!(resumed.history_len(), 2);
    assert!(resumed.undo());
}

/// A blob saved for one game cannot resume another.
#[test]
fn test_resume_wrong_game() {
    let session = Session::new(GameId::Spider, 3, MemoryStore::new());
    let mut store = session.into_store();
    let blob = store.load("spider").unwrap();
    store.save("klondike", blob);

    let err = Session::resume(GameId::Klondike, store).err().unwrap();
    assert!(matches!(err, PersistError::WrongGame { .. }));
}

// =============================================================================
// Options, resize and bonus
// =============================================================================

/// Options update layouts and are saved.
#[test]
fn test_set_option() {
    let mut session = Session::new(GameId::Klondike, 3, MemoryStore::new());
    let waste = session.game().first_of(PileKind::Waste).unwrap();

    assert!(!session.set_option("autoWin", true));
    assert!(session.set_option(TRIPLE_DRAW, true));
    assert_eq!(session.game().pile(waste).layout, Layout::TripleDraw);

    let store = session.into_store();
    let resumed = Session::resume(GameId::Klondike, store).unwrap();
    assert!(resumed.game().options.enabled(TRIPLE_DRAW));
}

/// Resize swaps board and slots by orientation.
#[test]
fn test_resize() {
    let mut session = Session::new(GameId::Klondike, 3, MemoryStore::new());
    let stock = session.game().first_of(PileKind::Stock).unwrap();

    session.resize(2000, 1000);
    assert_eq!(session.game().board.cols, 12);
    assert_eq!(session.game().pile(stock).slot.col, 11.0);

    session.resize(1000, 2000);
    assert_eq!(session.game().board.cols, 7);
    assert_eq!(session.game().pile(stock).slot.col, 0.0);
}

/// The time bonus is only paid out for a won game.
#[test]
fn test_finish_bonus() {
    let mut session = Session::new(GameId::Pyramid, 3, MemoryStore::new());

    assert_eq!(session.finish(60_000), 0);
    assert_eq!(session.score(), 0);
}

/// Finishing twice pays the bonus once.
#[test]
fn test_finish_bonus_paid_once() {
    let mut session = one_king_short();
    assert!(win(&mut session));
    let before = session.score();

    assert_eq!(session.finish(70_000), 500);
    assert_eq!(session.finish(70_000), 0);
    assert_eq!(session.score(), before + 500);
}
