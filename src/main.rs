use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use holdings_report::clock::{Clock, FixedClock, SystemClock};
use holdings_report::config::{default_config_path, Config};
use holdings_report::ledger::read_holdings;
use holdings_report::portfolio::PortfolioReporter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "holdings-report")]
#[command(about = "Summarize ledger holdings of selected accounts as JSON")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Semicolon-delimited holdings ledger
    file: PathBuf,

    /// Account numbers to include
    accounts: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    let format = config.ledger.to_format()?;

    let holdings = read_holdings(&cli.file, &format)
        .with_context(|| format!("Failed to read holdings from {}", cli.file.display()))?;

    let clock: Arc<dyn Clock> = match config.as_of {
        Some(as_of) => Arc::new(FixedClock::new(as_of)),
        None => Arc::new(SystemClock),
    };
    let reporter = PortfolioReporter::new(clock, config.report_options());
    let portfolio = reporter
        .report(&holdings, &cli.accounts)
        .context("Failed to summarize holdings")?;

    let json = if config.display.pretty {
        serde_json::to_string_pretty(&portfolio)?
    } else {
        serde_json::to_string(&portfolio)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(())
}
