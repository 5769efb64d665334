mod app;
mod dates;
mod domain;
mod input;
mod persistence;
mod planner;
mod resolver;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_planner_dir, init_local_planner, FileStorage};
use planner::PlannerState;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "A keyboard-driven weekly planner with drag-to-place scheduling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .weekplan directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let planner_dir = init_local_planner()?;
            println!("Initialized planner directory: {}", planner_dir.display());
            println!();
            println!("Weekplan will now use this local directory for storage.");
            println!("Run 'weekplan' to start planning.");
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let planner_dir = ensure_planner_dir()?;

    // Logging goes to a file; the terminal belongs to the UI
    let file_appender =
        tracing_appender::rolling::never(&planner_dir, persistence::log_file_name());
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WEEKPLAN_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(dir = %planner_dir.display(), "starting weekplan");

    // Load collections through the injected file-backed storage
    let storage = Arc::new(FileStorage::new(planner_dir));
    let planner = PlannerState::new(storage);
    let mut app = AppState::new(planner);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        // Check for midnight crossing - the date strip is anchored at
        // startup, so force a restart
        if app.has_day_changed() {
            app.ui_mode = domain::UiMode::DayChanged;
        }

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with a timeout so the clock-dependent bits stay
        // fresh
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process key press events (ignore key release)
                    if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse)?;
                }
                _ => {}
            }
        }
    }
}
