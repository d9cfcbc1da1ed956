// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::{App, ListLayout, View};
use config::Settings;
use data::{DashboardData, FilterState};
use source::{fetch_snapshot, DataSource, FileSource, HttpSource};

#[derive(Parser, Debug)]
#[command(name = "statuswatch")]
#[command(about = "Terminal dashboard for Statuspage-style service status pages")]
struct Args {
    /// Status page base URL (default: https://www.cloudflarestatus.com)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read a snapshot bundle from a JSON file instead of polling over HTTP
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Initial search term
    #[arg(short, long)]
    search: Option<String>,

    /// Start with only components that report issues
    #[arg(long)]
    only_issues: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, export the filtered dashboard to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over every other settings layer.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref url) = self.url {
            settings.base_url = url.clone();
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_secs = refresh;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(ref search) = self.search {
            settings.search = search.clone();
        }
        if self.only_issues {
            settings.only_issues = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Held until exit so buffered log lines get flushed
    let _guard = args.log_file.as_deref().map(setup_tracing);

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    info!(?settings, "starting statuswatch");

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(args.file.as_deref(), &settings, export_path);
    }

    match args.file {
        Some(ref path) => run_with_file(path, &settings),
        None => run_with_http(&settings),
    }
}

/// Send tracing output to a file. Stdout and stderr belong to the TUI.
fn setup_tracing(path: &Path) -> WorkerGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statuswatch=info"));

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path.file_name().unwrap_or(std::ffi::OsStr::new("statuswatch.log"));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false).with_target(true))
        .init();

    guard
}

/// Run with a file-based data source
fn run_with_file(path: &Path, settings: &Settings) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, settings.initial_filter(), settings.refresh_interval())
}

/// Run against a live status page
fn run_with_http(settings: &Settings) -> Result<()> {
    // The refresh task lives on this runtime while the TUI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let source = {
        let _enter = rt.enter();
        HttpSource::spawn(settings.http_config())?
    };

    // The source already refreshes on its own schedule; poll its channel often
    run_tui(Box::new(source), settings.initial_filter(), Duration::from_millis(100))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    filter: FilterState,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, filter);
    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let top = (area.height / 2).saturating_sub(2);
                let centered = ratatui::layout::Rect::new(0, top, area.width, 5).intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Length(1), // Search bar
                Constraint::Min(6),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with overall status
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render search line
            ui::common::render_search_bar(frame, app, chunks[2]);

            // Render current view, or the loading/error panel before the first snapshot
            let layout = if ui::common::render_first_load(frame, app, chunks[3]) {
                ListLayout::default()
            } else {
                match app.current_view {
                    View::Incidents => ui::incidents::render(frame, app, chunks[3]),
                    View::Maintenance => ui::maintenance::render(frame, app, chunks[3]),
                    View::Components => ui::components::render(frame, app, chunks[3]),
                }
            };
            app.list_layout = layout;

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[4]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content block starts after header (1) + tabs (1) + search (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Pick up new data periodically
        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Fetch one snapshot, export the filtered dashboard as JSON
fn export_to_file(file: Option<&Path>, settings: &Settings, export_path: &Path) -> Result<()> {
    let data = match file {
        Some(path) => DashboardData::load(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?,
        None => {
            let http = settings.http_config();
            let client = http.build_client()?;
            let rt = tokio::runtime::Runtime::new()?;
            let snapshot = rt
                .block_on(fetch_snapshot(&client, &http.base_url))
                .with_context(|| format!("Failed to fetch {}", http.base_url))?;
            DashboardData::from_snapshot(snapshot)
        }
    };

    let export = data.export(&settings.initial_filter());
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    println!("Exported status to: {}", export_path.display());
    Ok(())
}
