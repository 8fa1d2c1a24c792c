//! Rendering tests against ratatui's test backend.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use strictly_chess::{
    App, ChessController, MemoryStore, SQUARE_HEIGHT, SQUARE_WIDTH, ShakmatyEngine, UiEvent,
    coord_at, draw,
};

type TestApp = App<ShakmatyEngine, MemoryStore>;

fn new_app() -> TestApp {
    App::new(
        ChessController::new(ShakmatyEngine::new(), MemoryStore::new()),
        true,
    )
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn render(app: &TestApp) -> (String, ratatui::layout::Rect) {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
    let mut squares = ratatui::layout::Rect::default();
    terminal
        .draw(|frame| squares = draw(frame, app))
        .expect("draw");
    (buffer_text(terminal.backend().buffer()), squares)
}

#[test]
fn test_initial_frame_shows_board_and_status() {
    let (text, squares) = render(&new_app());

    assert!(text.contains("Strictly Chess"));
    assert!(text.contains("White to move"));
    assert!(text.contains('♔'));
    assert!(text.contains('♚'));
    assert_eq!(squares.width, SQUARE_WIDTH * 8);
    assert_eq!(squares.height, SQUARE_HEIGHT * 8);
}

#[test]
fn test_drawn_squares_map_back_to_coordinates() {
    let (_, squares) = render(&new_app());

    let a8 = coord_at(squares, squares.x, squares.y).expect("a8");
    assert_eq!(a8.to_string(), "a8");
    let h1 = coord_at(squares, squares.right() - 1, squares.bottom() - 1).expect("h1");
    assert_eq!(h1.to_string(), "h1");
    assert!(coord_at(squares, squares.right(), squares.y).is_none());
}

#[test]
fn test_modal_is_drawn_after_checkmate() {
    let mut controller = ChessController::new(ShakmatyEngine::new(), MemoryStore::new());
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        controller.handle(UiEvent::SquareClicked(from.parse().expect("square")));
        controller.handle(UiEvent::SquareClicked(to.parse().expect("square")));
    }
    let app = App::new(controller, false);

    let (text, _) = render(&app);

    assert!(text.contains("Game Over"));
    assert!(text.contains("Checkmate! Game Over."));
    assert!(text.contains("Press R to restart"));
}

#[test]
fn test_notice_line_is_drawn() {
    let mut controller = ChessController::new(ShakmatyEngine::new(), MemoryStore::new());
    controller.handle(UiEvent::Load);
    let app = App::new(controller, true);

    let (text, _) = render(&app);

    assert!(text.contains("No saved game found."));
}

#[test]
fn test_history_is_listed() {
    let mut controller = ChessController::new(ShakmatyEngine::new(), MemoryStore::new());
    controller.handle(UiEvent::SquareClicked("e2".parse().expect("square")));
    controller.handle(UiEvent::SquareClicked("e4".parse().expect("square")));
    let app = App::new(controller, true);

    let (text, _) = render(&app);

    assert!(text.contains("1. e4"));
    assert!(text.contains("Black to move"));
}
