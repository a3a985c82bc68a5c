//! marketperf CLI: CPI cache management and headless comparisons.
//!
//! Commands:
//! - `cpi status`: report the CPI cache without touching the network
//! - `cpi refresh`: refresh the cache if stale, or rebuild with `--force`
//! - `periods`: list the period catalog
//! - `instruments`: list the instrument catalog
//! - `compare`: run one comparison pass and summarize, export or dump it

mod export;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use marketperf_core::catalog::{Catalog, Instrument, PeriodKind};
use marketperf_core::compare::{ComparisonPass, ComparisonRequest};
use marketperf_core::config::AppConfig;
use marketperf_core::data::{FredProvider, YahooProvider};

#[derive(Parser)]
#[command(
    name = "marketperf",
    about = "marketperf CLI: market performance across historical periods"
)]
struct Cli {
    /// Config file (default: ./marketperf.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the CPI cache path.
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CPI cache management.
    Cpi {
        #[command(subcommand)]
        action: CpiAction,
    },
    /// List period labels, start dates and window lengths.
    Periods,
    /// List instruments and descriptions.
    Instruments,
    /// Compare instruments across periods.
    Compare {
        /// Period label (repeatable), e.g. "Pandemic (2/19/2020)".
        #[arg(long = "period", required = true)]
        periods: Vec<String>,

        /// Instrument label (repeatable), e.g. ^GSPC or "CPI (Inflation)".
        #[arg(long = "instrument", required = true)]
        instruments: Vec<String>,

        /// Chart inflation-adjusted values instead of nominal ones.
        #[arg(long, default_value_t = false)]
        real: bool,

        /// Write every row as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the comparison as JSON instead of the summary table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CpiAction {
    /// Report cache path, rows, months covered and freshness.
    Status,
    /// Refresh the cache if it is stale.
    Refresh {
        /// Rebuild even if the cache is fresh.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (mut config, source) =
        AppConfig::discover(cli.config.as_deref(), dirs::config_dir().as_deref())?;
    if let Some(cache) = cli.cache {
        config.cache_path = cache;
    }
    tracing::debug!(config = ?source, "configuration resolved");

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Cpi { action } => match action {
            CpiAction::Status => run_cpi_status(&config, today),
            CpiAction::Refresh { force } => run_cpi_refresh(&config, today, force),
        },
        Commands::Periods => {
            print_periods(&Catalog::standard(today));
            Ok(())
        }
        Commands::Instruments => {
            print_instruments(&Catalog::standard(today));
            Ok(())
        }
        Commands::Compare {
            periods,
            instruments,
            real,
            csv,
            json,
        } => run_compare(&config, today, periods, instruments, real, csv, json),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_cpi_status(config: &AppConfig, today: NaiveDate) -> Result<()> {
    let status = config.inflation_cache().status(today)?;

    println!("Cache:          {}", status.path.display());
    if !status.present {
        println!("Present:        no");
        println!("Expected month: {}", status.expected_month);
        println!();
        println!("Run `marketperf cpi refresh` to download it.");
        return Ok(());
    }
    println!("Present:        yes");
    println!("Rows:           {}", status.rows);
    if let (Some(first), Some(last)) = (status.first_month, status.last_month) {
        println!("Range:          {first} to {last}");
    }
    println!("Expected month: {}", status.expected_month);
    println!(
        "Fresh:          {}",
        if status.fresh { "yes" } else { "no (stale)" }
    );
    Ok(())
}

fn run_cpi_refresh(config: &AppConfig, today: NaiveDate, force: bool) -> Result<()> {
    let cache = config.inflation_cache();
    let fred = FredProvider::new(config.request_timeout())?;
    let table = if force {
        cache.refresh(&fred)?
    } else {
        cache.load_or_refresh(&fred, today)?
    };
    println!(
        "CPI cache {}: {} rows, {} to {}",
        cache.path().display(),
        table.len(),
        table
            .first_date()
            .map_or_else(|| "-".to_string(), |d| d.to_string()),
        table
            .last_date()
            .map_or_else(|| "-".to_string(), |d| d.to_string()),
    );
    Ok(())
}

fn print_periods(catalog: &Catalog) {
    println!("{:<40} {:<12} {:>6}  Kind", "Period", "Start", "Days");
    println!("{}", "-".repeat(70));
    for period in catalog.periods() {
        let kind = match period.kind {
            PeriodKind::Presidency => "presidency",
            PeriodKind::Event => "event",
        };
        println!(
            "{:<40} {:<12} {:>6}  {kind}",
            period.label,
            period.start.to_string(),
            period.duration_days
        );
    }
}

fn print_instruments(catalog: &Catalog) {
    println!("{:<16} Description", "Instrument");
    println!("{}", "-".repeat(50));
    for entry in catalog.instruments() {
        println!("{:<16} {}", entry.instrument.label(), entry.description);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    config: &AppConfig,
    today: NaiveDate,
    periods: Vec<String>,
    instruments: Vec<String>,
    real: bool,
    csv_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::standard(today);
    let instruments = instruments
        .iter()
        .map(|label| catalog.instrument(label).map(|e| e.instrument.clone()))
        .collect::<Result<Vec<Instrument>, _>>()?;

    let fred = FredProvider::new(config.request_timeout())?;
    let table = config
        .inflation_cache()
        .load_or_refresh(&fred, today)
        .context("loading CPI table")?;
    let prices = YahooProvider::new(config.request_timeout())?;

    let pass = ComparisonPass::new(&catalog, &table, &prices, &config.reference_ticker);
    let comparison = pass.run(&ComparisonRequest::new(periods, instruments, real))?;

    if let Some(path) = csv_path {
        let csv = export::export_views_csv(&comparison)?;
        std::fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    if json {
        println!("{}", export::export_json(&comparison)?);
        return Ok(());
    }

    println!();
    println!(
        "=== {} ===",
        marketperf_core::chart::chart_title(comparison.inflation_adjusted)
    );
    if let Some(base) = comparison.base_date {
        println!("Inflation base: {base}");
    }
    println!();
    println!(
        "{:<52} {:>6} {:>10} {:>9} {:>9}",
        "Series", "Days", "Final %", "Min %", "Max %"
    );
    println!("{}", "-".repeat(90));
    for s in export::summarize(&comparison) {
        println!(
            "{:<52} {:>6} {:>10.2} {:>9.2} {:>9.2}",
            s.name, s.rows, s.final_pct, s.min_pct, s.max_pct
        );
    }
    for warning in comparison.warnings() {
        println!("WARNING: {warning}");
    }
    println!();
    Ok(())
}
