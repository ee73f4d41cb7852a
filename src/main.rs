//! Smoelenboek - Terminal Profile Directory
//!
//! Browses a static JSON collection of student profiles as searchable,
//! filterable cards with a tabbed detail view. The collection is re-fetched
//! periodically while the terminal has focus.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use smoelenboek::application::{
    App, AppEvent, AppMode, PreferenceStore, RefreshScheduler, RefreshWorker,
};
use smoelenboek::infrastructure::{
    discover_config_file, source_for, AppConfig, HistoryNavigator, JsonPreferenceStore,
    MemoryPreferenceStore, SystemClipboard,
};
use smoelenboek::presentation::{render_ui, InputHandler};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upper bound on how long the loop waits for input before checking the
/// refresh worker.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "smoelenboek")]
#[command(version, about = "Terminal directory of student profiles", long_about = None)]
struct Cli {
    /// Path or http(s) URL of the profile JSON
    #[arg(short, long, env = "SMOELENBOEK_SOURCE")]
    source: Option<String>,

    /// Fragment to start at, e.g. `profile/ann`
    #[arg(short, long)]
    route: Option<String>,

    /// Seconds between background re-fetches
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// YAML config file (default: discovered)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preference file location
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Keep the dark-mode preference for this session only
    #[arg(long)]
    no_persist: bool,

    /// Log file location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&config, cli.verbose);

    let source = source_for(&config.source)
        .with_context(|| format!("cannot use profile source {}", config.source))?;
    let preferences: Box<dyn PreferenceStore> = if config.persist_preferences {
        Box::new(JsonPreferenceStore::open(config.preferences_path()))
    } else {
        Box::new(MemoryPreferenceStore::default())
    };
    let navigator = HistoryNavigator::new(config.initial_route.as_deref().unwrap_or_default());

    let mut app = App::new(source, preferences, Box::new(navigator))
        .with_clipboard(Box::new(SystemClipboard::new()));
    app.initialize();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.refresh_interval());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
    }

    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match discover_config_file(cli.config.as_deref()) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match &cli.config {
            Some(path) => anyhow::bail!("config file not found: {}", path.display()),
            None => AppConfig::default(),
        },
    };

    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(route) = &cli.route {
        config.initial_route = Some(route.clone());
    }
    if let Some(secs) = cli.refresh_secs {
        config.refresh_interval_secs = secs;
    }
    if let Some(prefs) = &cli.prefs {
        config.preferences_path = Some(prefs.clone());
    }
    if cli.no_persist {
        config.persist_preferences = false;
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Logs go to a file; writing to stderr would tear the TUI.
fn init_logging(config: &AppConfig, verbose: bool) {
    let Some(path) = config.log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

/// Main event loop.
///
/// Renders, handles one input event if any arrives within the poll window,
/// starts a background refresh when one is due, and applies a finished one.
/// Continues until the user presses 'q' while browsing.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    refresh_interval: Duration,
) -> io::Result<()> {
    let mut scheduler = RefreshScheduler::new(refresh_interval, Instant::now());
    let worker = RefreshWorker::new(app.source());

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = scheduler
            .time_until_next_tick(Instant::now())
            .min(POLL_INTERVAL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Browse) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                },
                Event::FocusGained => scheduler.set_visible(true),
                Event::FocusLost => scheduler.set_visible(false),
                _ => {}
            }
        }

        if scheduler.poll(Instant::now()) {
            if let Err(e) = worker.start_fetch() {
                tracing::error!(error = %e, "could not start refresh");
                scheduler.mark_finished();
            }
        }

        if let Some(result) = worker.try_recv() {
            scheduler.mark_finished();
            app.dispatch(AppEvent::Refreshed(result));
        }
    }
}
