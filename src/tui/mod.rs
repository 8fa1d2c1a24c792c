//! Terminal UI for Strictly Chess

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{KeyAction, key_action, move_cursor};
pub use ui::{SQUARE_HEIGHT, SQUARE_WIDTH, coord_at, draw};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use strictly_chess_engine::GameEngine;
use tracing::{error, info, instrument};

use crate::persistence::KeyValueStore;

/// Runs the board in the terminal until the user quits.
pub fn run_tui<E: GameEngine, S: KeyValueStore>(mut app: App<E, S>) -> Result<()> {
    info!("Starting Strictly Chess TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}

/// Draws, waits for input and dispatches it, until the app asks to quit.
#[instrument(skip_all)]
pub fn event_loop<B, E, S>(terminal: &mut Terminal<B>, app: &mut App<E, S>) -> Result<()>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
    E: GameEngine,
    S: KeyValueStore,
{
    while !app.should_quit() {
        let mut squares = Rect::default();
        terminal.draw(|frame| squares = ui::draw(frame, app))?;
        app.set_squares(squares);

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
    info!("Event loop finished");
    Ok(())
}
