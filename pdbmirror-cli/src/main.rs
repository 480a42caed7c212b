//! pdbmirror: keeps a local SQLite copy of PeeringDB.
//!
//! Usage:
//!   pdbmirror sync            # incremental since the last recorded run
//!   pdbmirror sync --full     # fetch everything
//!   pdbmirror report --asn 64500

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdbmirror_cli::{render_report, render_run, since_from_secs, MirrorConfig};
use pdbmirror_sync::{exchange_report, HttpFetcher, MirrorStore, SyncDriver};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pdbmirror")]
#[command(about = "Mirror PeeringDB into a local SQLite database")]
#[command(version)]
struct Args {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// PeeringDB API root (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one synchronization pass
    Sync {
        /// Only fetch objects changed after this unix time
        #[arg(long, conflicts_with = "full")]
        since: Option<i64>,

        /// Ignore previous runs and fetch everything
        #[arg(long)]
        full: bool,
    },

    /// Print the public peering ports of a network
    Report {
        /// Autonomous system number
        #[arg(long)]
        asn: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = MirrorConfig::load_or_default(args.config.as_deref())?
        .with_overrides(args.database, args.base_url);
    debug!("Using config {:?}", config);

    match args.command {
        Command::Sync { since, full } => run_sync(&config, since, full),
        Command::Report { asn, json } => run_report(&config, asn, json),
    }
}

fn run_sync(config: &MirrorConfig, since: Option<i64>, full: bool) -> Result<()> {
    let mut store = MirrorStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;

    let since = if full {
        None
    } else if let Some(secs) = since {
        Some(since_from_secs(secs)?)
    } else {
        store.last_sync().context("Failed to read sync bookkeeping")?
    };
    match since {
        Some(since) => info!("Incremental sync since {since}"),
        None => info!("Full sync"),
    }

    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to create fetcher")?;
    let driver = SyncDriver::new(fetcher, config.sync.clone());
    let report = driver
        .run(store.connection_mut(), since)
        .context("Synchronization failed")?;
    store
        .record_run(&report)
        .context("Failed to record sync run")?;

    print!("{}", render_run(&report));
    Ok(())
}

fn run_report(config: &MirrorConfig, asn: i64, json: bool) -> Result<()> {
    let store = MirrorStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;
    let report = exchange_report(store.connection(), asn)
        .with_context(|| format!("Failed to build report for AS{asn}"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}
