//! chronica - a scrolling chronicle for the terminal
//!
//! Renders an ordered chronicle of events as a vertically scrollable
//! document with a rail indicator and per-event slide carousels, all
//! kept in sync with the scroll position.

mod app;
mod catalog;
mod layout;
mod nav;
mod scroll;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::App;
use catalog::Catalog;

/// Frame rate for scroll easing (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Main entry point
fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    // Optional chronicle file as the first command line argument
    let args: Vec<String> = std::env::args().collect();
    let catalog = match args.get(1) {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default_catalog()?,
    };

    run_tui(catalog)
}

/// Run the TUI application
fn run_tui(catalog: Catalog) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(catalog);
    let result = run_event_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Run the main event loop
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Advance scroll easing and re-resolve against the current size
        let size = terminal.size()?;
        app.tick(Rect::new(0, 0, size.width, size.height));

        // Render the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input events with timeout for animation
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // Size changes are picked up by the next tick's re-measure
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
