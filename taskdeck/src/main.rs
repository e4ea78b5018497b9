//! Taskdeck -- terminal client for the to-do list API.
//!
//! Launches the TUI and talks to a taskdeck API server. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Connect to the default local server
//! cargo run --bin taskdeck
//!
//! # Connect to a custom server
//! cargo run --bin taskdeck -- --server-url http://tasks.example.net:9100
//!
//! # Or via environment variable
//! TASKDECK_SERVER=http://tasks.example.net:9100 cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::ApiClient;
use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{ApiBridge, NetCommand};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&config.log_level, cli.log_file.as_deref());

    tracing::info!(server = %config.server_url, "taskdeck starting");

    let client = match ApiClient::new(&config.server_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, client).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown to
/// ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop: draw, drain request outcomes, handle one key.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
) -> io::Result<()> {
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel();
    let bridge = ApiBridge::new(client, evt_tx);

    let mut app = App::new();

    // Populate the mirror on startup.
    bridge.dispatch(NetCommand::Refresh);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Apply every request outcome that arrived since the last tick.
        while let Ok(action) = evt_rx.try_recv() {
            app.apply_action(action);
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(command) = app.handle_key_event(key)
        {
            bridge.dispatch(command);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
