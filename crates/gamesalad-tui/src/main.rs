mod animations;
mod app;
mod render;
mod storage;
mod theme;

use anyhow::{Context, Result};
use app::{App, Settings};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamesalad_core::ThemeKind;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Find the hidden words on a 4x4 letter grid
#[derive(Debug, Parser)]
#[command(name = "gamesalad", version, about)]
struct Args {
    /// Level id to open instead of the saved one
    #[arg(short, long)]
    level: Option<String>,

    /// Color theme: dark, light or high-contrast
    #[arg(short, long)]
    theme: Option<ThemeKind>,

    /// Never ring the terminal bell
    #[arg(long)]
    no_haptics: bool,

    /// Where preferences and logs are kept
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Log to a file so output does not tear the screen. Filter with `GAMESALAD_LOG`.
fn init_logging(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("cannot create {}", data_dir.display()))?;
    let log_file = std::fs::File::create(data_dir.join(storage::LOG_FILE))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GAMESALAD_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(storage::default_data_dir);
    init_logging(&data_dir)?;

    let app = App::new(Settings {
        level: args.level,
        theme: args.theme,
        no_haptics: args.no_haptics,
        data_dir: Some(data_dir),
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(ref e) = result {
        error!(error = %e, "terminal loop failed");
    }
    info!("bye");
    result.map_err(Into::into)
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    app.resize(width, height);
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Poll often so drags feel responsive between ticks
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(16)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        break;
                    }
                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
