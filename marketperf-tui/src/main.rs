//! marketperf TUI: compare market performance across historical periods.
//!
//! Layout:
//! 1. Periods: presidencies and market events (multi-select)
//! 2. Instruments: indices and the CPI (multi-select)
//! 3. Mode: nominal or inflation adjusted
//! 4. Chart: % change by trading day, with a day cursor and readout

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
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

use marketperf_core::catalog::Catalog;
use marketperf_core::config::AppConfig;
use marketperf_core::data::{FredProvider, YahooProvider};
use marketperf_tui::app::AppState;
use marketperf_tui::{input, ui};

const LOG_FILE: &str = "marketperf-tui.log";

#[derive(Parser)]
#[command(name = "marketperf-tui", about = "Compare market performance across historical periods")]
struct Args {
    /// Config file (default: ./marketperf.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the CPI cache path
    #[arg(long)]
    cache: Option<PathBuf>,
}

fn init_tracing() -> Result<()> {
    // The alternate screen owns stdout/stderr, so logs go to a file.
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let (mut config, source) =
        AppConfig::discover(args.config.as_deref(), dirs::config_dir().as_deref())?;
    if let Some(cache) = args.cache {
        config.cache_path = cache;
    }
    info!(config = ?source, cache = %config.cache_path.display(), "starting");

    // Load the CPI table before taking over the terminal so errors print normally.
    let today = chrono::Local::now().date_naive();
    eprintln!("Loading CPI data from {} ...", config.cache_path.display());
    let fred = FredProvider::new(config.request_timeout())?;
    let table = config
        .inflation_cache()
        .load_or_refresh(&fred, today)
        .context("loading CPI table")?;

    let prices = YahooProvider::new(config.request_timeout())?;
    let mut app = AppState::new(
        Catalog::standard(today),
        table,
        Box::new(prices),
        config.reference_ticker.clone(),
    );

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

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
