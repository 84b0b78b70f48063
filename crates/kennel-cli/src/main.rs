use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kennel_cli::commands::{actions, day, predict, range, upcoming, util};
use kennel_cli::snapshot::load_snapshot;
use kennel_cli::{Cli, Commands, Config};
use kennel_core::KennelSnapshot;

/// Load config and the records snapshot it points at.
fn open_snapshot(
    config_path: Option<&Path>,
    snapshot_override: Option<&Path>,
) -> Result<(KennelSnapshot, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = snapshot_override.unwrap_or(config.snapshot_path.as_path());
    let snapshot = load_snapshot(path)?;
    Ok((snapshot, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let real_today = Local::now().date_naive();
    let today: NaiveDate = match cli.today.as_deref() {
        Some(s) => util::parse_date(s, real_today)?,
        None => real_today,
    };
    let parse = |s: &str| util::parse_date(s, today);

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (snapshot, config) = open_snapshot(cli.config.as_deref(), cli.snapshot.as_deref())?;

    match command {
        Commands::Upcoming { days, json } => {
            upcoming::run(&snapshot, &config, today, &cli.kinds, *days, *json)?;
        }
        Commands::Range { start, end, json } => {
            let (start, end) = (parse(start)?, parse(end)?);
            range::run(&snapshot, &config, today, &cli.kinds, start, end, *json)?;
        }
        Commands::Day { date, limit, json } => {
            let day = parse(date)?;
            day::run(&snapshot, &config, today, &cli.kinds, day, *limit, *json)?;
        }
        Commands::Predict { json } => {
            predict::run(&snapshot, &config, today, *json)?;
        }
        Commands::Actions { date, index, json } => {
            let day = parse(date)?;
            actions::run(&snapshot, &config, today, &cli.kinds, day, *index, *json)?;
        }
    }

    Ok(())
}
