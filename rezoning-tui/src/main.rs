//! Rezoning Guide TUI — terminal host for the interactive rezoning guide.
//!
//! Screen:
//! 1. Header — title, search field, glossary and decision tree buttons
//! 2. Audience tabs and the active tab's summary
//! 3. Timeline — stages with expandable detail panels
//! 4. Status bar — notifications and announcements
//!
//! Interaction state is saved to the config directory on exit and restored on
//! the next start.

mod app;
mod input;
mod theme;
mod ui;
mod view;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rezoning_core::{FileStore, Guide, GuideConfig, GuideContent, LogSink};

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "rezoning-tui", version, about = "Interactive rezoning guide in the terminal")]
struct Args {
    /// Guide content file (TOML). Defaults to the bundled sample guide.
    content: Option<PathBuf>,

    /// Config file (TOML). Defaults to config.toml in the config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let base_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rezoning-guide");
    init_logging(&base_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| base_dir.join("config.toml"));
    let config = GuideConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let content = match &args.content {
        Some(path) => GuideContent::from_file(path)?,
        None => GuideContent::sample()?,
    };
    info!(title = %content.title, stages = content.stages.len(), "guide loaded");

    let store = FileStore::new(base_dir.join("state"));
    let mut guide = Guide::from_content(&content, config, Box::new(store), Box::new(LogSink))?;
    guide.load_state();
    let mut app = AppState::new(guide);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    app.guide.save_state();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Logs go to a file so the alternate screen stays clean.
fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let log_path = dir.join("rezoning-tui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Run deferred actions that fell due
        app.tick();

        // 2. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
