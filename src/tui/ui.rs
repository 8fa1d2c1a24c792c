//! Stateless rendering of the board, status panel and game-over dialog.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_chess_engine::{Coord, GameEngine};

use super::app::App;
use crate::persistence::KeyValueStore;
use crate::view::{GameOverModal, SquareShade, SquareView, StatusPanel};

/// Terminal columns per square.
pub const SQUARE_WIDTH: u16 = 5;
/// Terminal rows per square.
pub const SQUARE_HEIGHT: u16 = 2;

const LIGHT: Color = Color::Rgb(0xCC, 0xBB, 0xAA);
const DARK: Color = Color::Rgb(0x77, 0x66, 0x55);
const HIGHLIGHT: Color = Color::Rgb(0xDD, 0x88, 0x88);
const SELECTED: Color = Color::Rgb(0xCC, 0x99, 0x44);

const HELP: &str =
    "arrows/mouse: move  enter: click  u: undo  U: undo two  r: restart  s: save  l: load  q: quit";

/// Draws one frame and returns the area covered by the 64 squares.
pub fn draw<E: GameEngine, S: KeyValueStore>(frame: &mut Frame, app: &App<E, S>) -> Rect {
    let controller = app.controller();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title
            Constraint::Min(SQUARE_HEIGHT * 8 + 3), // Board and status
            Constraint::Length(1),                  // Notice
            Constraint::Length(1),                  // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Strictly Chess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SQUARE_WIDTH * 8 + 6), Constraint::Min(20)])
        .split(chunks[1]);

    let squares = draw_board(
        frame,
        main[0],
        &controller.board(),
        app.cursor(),
        app.show_coordinates(),
    );
    draw_status(frame, main[1], controller.status());

    if let Some(notice) = controller.notice() {
        let color = if notice.is_error() { Color::Red } else { Color::Green };
        let line = Paragraph::new(notice.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(line, chunks[2]);
    }

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    if let Some(modal) = controller.modal() {
        draw_modal(frame, modal);
    }

    squares
}

/// Maps a terminal cell to the square drawn there.
pub fn coord_at(squares: Rect, column: u16, row: u16) -> Option<Coord> {
    if column < squares.x || row < squares.y {
        return None;
    }
    let col = (column - squares.x) / SQUARE_WIDTH;
    let row = (row - squares.y) / SQUARE_HEIGHT;
    if col >= 8 || row >= 8 {
        return None;
    }
    Coord::from_row_col(row as usize, col as usize)
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &[SquareView],
    cursor: Coord,
    show_coordinates: bool,
) -> Rect {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_width = if show_coordinates { 2 } else { 0 };
    let squares = Rect::new(
        inner.x + label_width,
        inner.y,
        SQUARE_WIDTH * 8,
        SQUARE_HEIGHT * 8,
    )
    .intersection(frame.area());

    for square in board {
        let coord = *square.coord();
        let cell = Rect::new(
            squares.x + coord.col() as u16 * SQUARE_WIDTH,
            squares.y + coord.row() as u16 * SQUARE_HEIGHT,
            SQUARE_WIDTH,
            SQUARE_HEIGHT,
        )
        .intersection(squares);
        if cell.is_empty() {
            continue;
        }
        frame.render_widget(square_widget(square, coord == cursor), cell);
    }

    if show_coordinates {
        let labels = Style::default().fg(Color::DarkGray);
        for row in 0..8u16 {
            let rank =
                Rect::new(inner.x, squares.y + row * SQUARE_HEIGHT, 1, 1).intersection(inner);
            if !rank.is_empty() {
                let digit = char::from(b'8' - row as u8).to_string();
                frame.render_widget(Paragraph::new(digit).style(labels), rank);
            }
        }
        let files: String = ('a'..='h')
            .map(|file| format!("{:^width$}", file, width = SQUARE_WIDTH as usize))
            .collect();
        let bottom = Rect::new(squares.x, squares.y + SQUARE_HEIGHT * 8, SQUARE_WIDTH * 8, 1)
            .intersection(inner);
        if !bottom.is_empty() {
            frame.render_widget(Paragraph::new(files).style(labels), bottom);
        }
    }

    squares
}

fn square_widget(square: &SquareView, under_cursor: bool) -> Paragraph<'static> {
    let background = if *square.selected() {
        SELECTED
    } else if *square.highlighted() {
        HIGHLIGHT
    } else {
        match square.shade() {
            SquareShade::Light => LIGHT,
            SquareShade::Dark => DARK,
        }
    };

    let symbol = match square.occupant() {
        Some(piece) => piece.glyph().to_string(),
        None if *square.highlighted() => "·".to_string(),
        None => " ".to_string(),
    };
    let text = if under_cursor {
        format!("[{}]", symbol)
    } else {
        format!(" {} ", symbol)
    };

    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(background))
    .alignment(Alignment::Center)
}

fn draw_status(frame: &mut Frame, area: Rect, status: &StatusPanel) {
    let block = Block::default().title("Status").borders(Borders::ALL);
    let inner = block.inner(area);

    let mut lines = vec![Line::from(Span::styled(
        status.turn_label(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    match status.check_notice() {
        Some(check) => lines.push(Line::from(Span::styled(
            check,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        "Moves",
        Style::default().add_modifier(Modifier::UNDERLINED),
    )));

    // Newest moves stay visible.
    let room = (inner.height as usize).saturating_sub(lines.len());
    let history = status.history();
    let skip = history.len().saturating_sub(room);
    lines.extend(history.iter().skip(skip).map(|entry| Line::from(entry.to_string())));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_modal(frame: &mut Frame, modal: &GameOverModal) {
    let area = center_rect(frame.area(), 32, 6);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            modal.message(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Press R to {}", GameOverModal::RESTART_LABEL.to_lowercase())),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Game Over")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(popup, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_at_maps_cells_to_squares() {
        let squares = Rect::new(3, 2, SQUARE_WIDTH * 8, SQUARE_HEIGHT * 8);
        assert_eq!(coord_at(squares, 3, 2).map(|c| c.to_string()), Some("a8".into()));
        assert_eq!(
            coord_at(squares, 3 + SQUARE_WIDTH * 8 - 1, 2 + SQUARE_HEIGHT * 8 - 1)
                .map(|c| c.to_string()),
            Some("h1".into())
        );
        assert_eq!(
            coord_at(squares, 3 + 4 * SQUARE_WIDTH + 2, 2 + 4 * SQUARE_HEIGHT + 1)
                .map(|c| c.to_string()),
            Some("e4".into())
        );
    }

    #[test]
    fn coord_at_rejects_cells_off_the_board() {
        let squares = Rect::new(3, 2, SQUARE_WIDTH * 8, SQUARE_HEIGHT * 8);
        assert_eq!(coord_at(squares, 2, 2), None);
        assert_eq!(coord_at(squares, 3, 1), None);
        assert_eq!(coord_at(squares, 3 + SQUARE_WIDTH * 8, 2), None);
        assert_eq!(coord_at(squares, 3, 2 + SQUARE_HEIGHT * 8), None);
    }

    #[test]
    fn center_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(center_rect(area, 32, 6), area);
    }
}
