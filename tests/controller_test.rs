//! Tests for event dispatch through the controller.

use strictly_chess::{
    ChessController, Coord, GameEngine, HISTORY_KEY, KeyValueStore, MemoryStore, Notice,
    POSITION_KEY, PieceColor, ShakmatyEngine, TerminalStatus, UiEvent,
};

type Controller = ChessController<ShakmatyEngine, MemoryStore>;

fn sq(name: &str) -> Coord {
    name.parse().expect("valid square")
}

fn new_controller() -> Controller {
    ChessController::new(ShakmatyEngine::new(), MemoryStore::new())
}

fn click(controller: &mut Controller, from: &str, to: &str) {
    controller.handle(UiEvent::SquareClicked(sq(from)));
    controller.handle(UiEvent::SquareClicked(sq(to)));
}

fn play(controller: &mut Controller, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        click(controller, from, to);
    }
}

fn fools_mate(controller: &mut Controller) {
    play(
        controller,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
}

#[test]
fn test_e2_e4_updates_board_and_status() {
    let mut controller = new_controller();

    controller.handle(UiEvent::SquareClicked(sq("e2")));
    let highlighted: Vec<Coord> = controller
        .board()
        .iter()
        .filter(|s| *s.highlighted())
        .map(|s| *s.coord())
        .collect();
    assert_eq!(highlighted.len(), 3);
    assert_eq!(controller.status().turn_label(), "White to move");

    controller.handle(UiEvent::SquareClicked(sq("e4")));

    assert!(controller.selection().is_idle());
    assert!(controller.board().iter().all(|s| !s.highlighted()));
    assert_eq!(controller.status().turn_label(), "Black to move");
    let history: Vec<String> = controller
        .status()
        .history()
        .iter()
        .map(|e| e.to_string())
        .collect();
    assert_eq!(history, vec!["1. e4"]);

    let e4 = controller
        .board()
        .into_iter()
        .find(|s| *s.coord() == sq("e4"))
        .expect("e4 square");
    assert_eq!(e4.occupant().as_ref().map(|p| p.label().as_str()), Some("White Pawn"));
}

#[test]
fn test_rejected_move_keeps_status() {
    let mut controller = new_controller();
    click(&mut controller, "e2", "e5");
    assert!(controller.selection().is_idle());
    assert_eq!(*controller.status().turn(), PieceColor::White);
    assert!(controller.status().history().is_empty());
}

#[test]
fn test_check_shows_notice_without_modal() {
    let mut controller = new_controller();
    play(&mut controller, &[("e2", "e4"), ("f7", "f5"), ("d1", "h5")]);

    assert_eq!(controller.status().check_notice(), Some("Check!"));
    assert!(controller.modal().is_none());
}

#[test]
fn test_checkmate_opens_modal_and_blocks_input() {
    let mut controller = new_controller();
    fools_mate(&mut controller);

    assert_eq!(*controller.status().terminal(), TerminalStatus::Checkmate);
    let modal = controller.modal().expect("modal open");
    assert_eq!(modal.message(), "Checkmate! Game Over.");

    let before = controller.engine().position_encoding();
    controller.handle(UiEvent::SquareClicked(sq("a2")));
    controller.handle(UiEvent::UndoOne);
    controller.handle(UiEvent::Save);
    controller.handle(UiEvent::Load);

    assert_eq!(controller.engine().position_encoding(), before);
    assert!(controller.selection().is_idle());
    assert!(controller.notice().is_none());
    assert!(controller.persistence().store().is_empty());
    assert!(controller.modal().is_some());
}

#[test]
fn test_restart_closes_modal() {
    let mut controller = new_controller();
    fools_mate(&mut controller);

    controller.handle(UiEvent::Restart);

    assert!(controller.modal().is_none());
    assert!(controller.engine().history().is_empty());
    assert_eq!(controller.status().turn_label(), "White to move");
    assert_eq!(*controller.status().terminal(), TerminalStatus::Ongoing);
}

#[test]
fn test_restart_clears_selection() {
    let mut controller = new_controller();
    click(&mut controller, "e2", "e4");
    controller.handle(UiEvent::SquareClicked(sq("e7")));
    assert!(!controller.selection().is_idle());

    controller.handle(UiEvent::Restart);

    assert!(controller.selection().is_idle());
    assert!(controller.status().history().is_empty());
}

#[test]
fn test_undo_one_and_two() {
    let mut controller = new_controller();
    play(
        &mut controller,
        &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")],
    );

    controller.handle(UiEvent::UndoOne);
    assert_eq!(controller.engine().history(), vec!["e4", "e5"]);
    assert_eq!(controller.status().turn_label(), "White to move");

    controller.handle(UiEvent::UndoTwo);
    assert!(controller.engine().history().is_empty());
    assert!(controller.status().history().is_empty());
}

#[test]
fn test_undo_with_short_history() {
    let mut controller = new_controller();
    click(&mut controller, "d2", "d4");

    controller.handle(UiEvent::UndoTwo);
    assert!(controller.engine().history().is_empty());

    controller.handle(UiEvent::UndoOne);
    assert!(controller.engine().history().is_empty());
    assert_eq!(*controller.status().turn(), PieceColor::White);
}

#[test]
fn test_undo_after_checkmate_requires_restart_first() {
    let mut controller = new_controller();
    fools_mate(&mut controller);
    controller.handle(UiEvent::UndoOne);
    assert_eq!(controller.engine().history().len(), 4);
}

#[test]
fn test_undo_clears_selection() {
    let mut controller = new_controller();
    click(&mut controller, "e2", "e4");
    controller.handle(UiEvent::SquareClicked(sq("e7")));

    controller.handle(UiEvent::UndoOne);

    assert!(controller.selection().is_idle());
    assert!(controller.engine().history().is_empty());
}

#[test]
fn test_load_with_no_save_reports_notice() {
    let mut controller = new_controller();
    click(&mut controller, "e2", "e4");
    let before = controller.engine().position_encoding();

    controller.handle(UiEvent::Load);

    assert!(controller.selection().is_idle());
    assert_eq!(controller.engine().position_encoding(), before);

    assert_eq!(controller.notice(), Some(&Notice::NoSavedGame));
    assert_eq!(
        controller.notice().map(|n| n.to_string()),
        Some("No saved game found.".to_string())
    );
    assert_eq!(controller.engine().history(), vec!["e4"]);
}

#[test]
fn test_load_drops_pending_selection() {
    let mut controller = new_controller();
    controller.handle(UiEvent::SquareClicked(sq("e2")));
    assert!(!controller.selection().is_idle());

    controller.handle(UiEvent::Load);

    assert_eq!(controller.notice(), Some(&Notice::NoSavedGame));
    assert!(controller.selection().is_idle());
    assert!(controller.board().iter().all(|s| !s.highlighted()));
}

#[test]
fn test_special_moves_survive_save_restart_load() {
    let mut controller = new_controller();
    play(
        &mut controller,
        &[
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("e5", "d6"),
            ("g8", "f6"),
            ("g1", "f3"),
            ("h7", "h6"),
            ("f1", "c4"),
            ("g7", "g6"),
            ("e1", "g1"),
            ("f8", "g7"),
            ("d6", "c7"),
            ("e8", "g8"),
            ("c7", "d8"),
        ],
    );
    let history = controller.engine().history();
    assert_eq!(history.len(), 15);
    assert_eq!(history[4], "exd6");
    assert_eq!(history[10], "O-O");
    assert!(history[14].starts_with("cxd8=Q"));
    let saved = controller.engine().position_encoding();

    controller.handle(UiEvent::Save);
    controller.handle(UiEvent::Restart);
    assert!(controller.engine().history().is_empty());
    controller.handle(UiEvent::Load);

    assert_eq!(controller.notice(), Some(&Notice::Loaded { moves: 15 }));
    assert_eq!(controller.engine().history(), history);
    assert_eq!(controller.engine().position_encoding(), saved);
}

#[test]
fn test_save_then_load_restores_game() {
    let mut controller = new_controller();
    play(&mut controller, &[("e2", "e4"), ("c7", "c5")]);
    let saved = controller.engine().position_encoding();

    controller.handle(UiEvent::Save);
    assert_eq!(controller.notice(), Some(&Notice::Saved { moves: 2 }));
    assert!(controller.persistence().store().get(POSITION_KEY).unwrap().is_some());

    play(&mut controller, &[("g1", "f3"), ("d7", "d6")]);
    controller.handle(UiEvent::SquareClicked(sq("d2")));

    controller.handle(UiEvent::Load);

    assert_eq!(controller.notice(), Some(&Notice::Loaded { moves: 2 }));
    assert_eq!(controller.engine().position_encoding(), saved);
    assert!(controller.selection().is_idle());
    let history: Vec<String> = controller
        .status()
        .history()
        .iter()
        .map(|e| e.to_string())
        .collect();
    assert_eq!(history, vec!["1. e4", "2. c5"]);
}

#[test]
fn test_load_of_finished_game_opens_modal() {
    let mut controller = new_controller();
    fools_mate(&mut controller);

    let mut store = MemoryStore::new();
    store.insert(POSITION_KEY, controller.engine().position_encoding());
    store.insert(HISTORY_KEY, r#"["f3","e5","g4","Qh4#"]"#);
    let mut fresh = ChessController::new(ShakmatyEngine::new(), store);

    fresh.handle(UiEvent::Load);

    assert!(fresh.modal().is_some());
    assert_eq!(*fresh.status().terminal(), TerminalStatus::Checkmate);
}

#[test]
fn test_corrupted_save_reports_failure_and_keeps_game() {
    let mut store = MemoryStore::new();
    store.insert(HISTORY_KEY, r#"["e4"]"#);
    let mut controller = ChessController::new(ShakmatyEngine::new(), store);
    click(&mut controller, "d2", "d4");

    controller.handle(UiEvent::Load);

    let notice = controller.notice().expect("notice");
    assert!(notice.is_error());
    assert!(notice.to_string().starts_with("Load failed"));
    assert_eq!(controller.engine().history(), vec!["d4"]);
}

#[test]
fn test_unplayable_save_shows_partial_replay() {
    let mut store = MemoryStore::new();
    store.insert(POSITION_KEY, "irrelevant");
    store.insert(HISTORY_KEY, r#"["e4","e5","Ke3"]"#);
    let mut controller = ChessController::new(ShakmatyEngine::new(), store);

    controller.handle(UiEvent::Load);

    assert!(matches!(controller.notice(), Some(Notice::LoadFailed(_))));
    assert_eq!(controller.status().history().len(), 2);
    assert_eq!(controller.status().turn_label(), "White to move");
}

#[test]
fn test_notice_cleared_by_next_event() {
    let mut controller = new_controller();
    controller.handle(UiEvent::Save);
    assert!(controller.notice().is_some());

    controller.handle(UiEvent::SquareClicked(sq("e2")));
    assert!(controller.notice().is_none());
}
