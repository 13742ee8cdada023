use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use notewall::app::{App, Flow};
use notewall::config::Config;
use notewall::credentials::{CredentialStore, FileCredentials, SERVICE};
use notewall::logging;
use notewall::session::TerminalSession;
use notewall::store::{JsonNoteStore, NoteService};

#[derive(Parser, Debug)]
#[command(name = "notewall")]
#[command(about = "Multi-column terminal wall of labelled notes")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/notewall/config.toml")]
    config: String,

    /// Note snapshot to read (overrides `store.path`)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Number of columns (overrides `layout.columns`)
    #[arg(long)]
    columns: Option<u16>,

    /// Log file (default: notewall/notewall.log under the state directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::log_path(cli.log_file).as_deref())?;

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(path) = cli.store {
        config.store.path = path;
    }
    if let Some(columns) = cli.columns {
        config.layout.columns = columns;
    }
    config.validate().context("Invalid configuration")?;

    // Log in before touching the terminal so failures print normally
    let secret = FileCredentials::from_env(&config.store.credentials)
        .secret(SERVICE, &config.username)
        .context("Failed to resolve credentials")?;
    let mut store = JsonNoteStore::new(&config.store.path);
    store
        .login(&config.username, &secret)
        .with_context(|| format!("Failed to open note store {}", store.path().display()))?;

    let session = TerminalSession::enter().context("Failed to set up terminal")?;
    let result = run(store, &config);
    session.finish().context("Failed to restore terminal")?;
    result
}

/// Everything that runs while the terminal is in raw mode
fn run(store: JsonNoteStore, config: &Config) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let size = terminal.size()?;
    let mut app = App::new(store, config, (size.width, size.height));
    run_app(&mut terminal, &mut app)
}

fn run_app<B: ratatui::backend::Backend, S: NoteService>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        // Blocks until the next key, resize or mouse event
        let event = event::read()?;
        if app.handle_event(&event) == Flow::Quit {
            tracing::info!("Quit requested");
            return Ok(());
        }
    }
}
