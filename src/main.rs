//! TETRS RESERVE - a piece queue and a reserve stack
//!
//! Five moves over two bounded buffers, one keypress per turn.

mod app;
mod error;
mod game;
mod generator;
mod input;
mod piece;
mod queue;
mod settings;
mod stack;
mod stats;
mod ui;

use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::io::{self, stdout};
use tracing_subscriber::EnvFilter;

/// Get the temp directory for logs, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("tetrs-reserve");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file; stdout belongs to the alternate screen
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tetrs_reserve=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS RESERVE starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let mut app = App::new(&settings);
    tracing::info!("Generator seed {:016x}", app.game.generator().seed());

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("Terminal error: {}", e);
        return result;
    }

    let stats = &app.game.stats;
    println!("Leaving the game. See you!");
    println!(
        "Dealt: {} | Consumed: {} (played {}, used {}) | Reserved: {} | Swaps: {}",
        app.game.generator().generated(),
        stats.consumed(),
        stats.played,
        stats.used,
        stats.reserved,
        stats.swaps
    );
    tracing::info!("Session over after {} actions", stats.actions());

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Turn-based: block until the next key, resize just redraws
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
