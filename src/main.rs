mod commands;
mod loader;
mod render;
mod zone;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rotaview_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::loader::Sources;
use crate::zone::Zone;

#[derive(Parser)]
#[command(name = "rotaview")]
#[command(about = "Show today's map rotation as a timeline")]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the documents come from and which day to evaluate.
#[derive(Args, Clone)]
struct SourceArgs {
    /// Schedule document (defaults to schedule_path from config)
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Overrides document (defaults to overrides_path from config)
    #[arg(long, conflicts_with = "no_overrides")]
    overrides: Option<PathBuf>,

    /// Use the base schedule only
    #[arg(long)]
    no_overrides: bool,

    /// IANA timezone to evaluate the day in, e.g. "Europe/Berlin" (defaults to local time)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render today's timeline once
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Render as of this instant (e.g. "2025-03-19T14:30:00+01:00")
        #[arg(long)]
        now: Option<String>,

        /// Print the render model as JSON instead of drawing it
        #[arg(long)]
        json: bool,
    },
    /// Render the timeline and refresh it periodically
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Refresh interval (e.g. "1m", "30s"; defaults to refresh_interval from config)
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// List today's windows after overrides and merging
    Windows {
        #[command(flatten)]
        source: SourceArgs,

        /// List as of this instant (e.g. "2025-03-19T14:30:00+01:00")
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load().context("Failed to load config")?;

    match cli.command {
        Commands::Render { source, now, json } => {
            let (sources, zone) = resolve_source(&source, &config)?;
            commands::render::run(&sources, &zone, now.as_deref(), json, &config.layout).await
        }
        Commands::Watch { source, interval } => {
            let (sources, zone) = resolve_source(&source, &config)?;
            let interval = match interval {
                Some(s) => humantime::parse_duration(&s)
                    .with_context(|| format!("Invalid interval '{}'", s))?,
                None => config.refresh_interval()?,
            };
            commands::watch::run(&sources, &zone, interval, &config.layout).await
        }
        Commands::Windows { source, now } => {
            let (sources, zone) = resolve_source(&source, &config)?;
            commands::windows::run(&sources, &zone, now.as_deref()).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Logs go to stderr so `--json` output stays clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_source(args: &SourceArgs, config: &AppConfig) -> Result<(Sources, Zone)> {
    let schedule = args
        .schedule
        .clone()
        .unwrap_or_else(|| config.schedule_path());

    let overrides = if args.no_overrides {
        None
    } else {
        args.overrides.clone().or_else(|| config.overrides_path())
    };

    let zone = Zone::resolve(args.tz.as_deref())?;

    Ok((Sources { schedule, overrides }, zone))
}
