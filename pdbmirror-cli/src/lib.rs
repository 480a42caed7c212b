//! Configuration and output formatting for the `pdbmirror` binary.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use pdbmirror_sync::{ExchangeReport, FetchConfig, RunReport, SyncConfig};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the mirror database.
pub const DEFAULT_DATABASE: &str = "pdb.db";

/// Everything a mirror run needs, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// SQLite database file.
    pub database: PathBuf,
    pub fetch: FetchConfig,
    pub sync: SyncConfig,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            fetch: FetchConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl MirrorConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads `path` if given, otherwise starts from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command line overrides on top of the file values.
    pub fn with_overrides(mut self, database: Option<PathBuf>, base_url: Option<String>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(base_url) = base_url {
            self.fetch.base_url = base_url;
        }
        self
    }
}

/// Converts a `--since` value in unix seconds.
pub fn since_from_secs(secs: i64) -> Result<DateTime<Utc>> {
    if secs < 0 {
        bail!("--since must not be negative, got {secs}");
    }
    DateTime::from_timestamp(secs, 0).with_context(|| format!("--since {secs} is out of range"))
}

/// One-screen summary of a committed run.
pub fn render_run(report: &RunReport) -> String {
    let mut out = String::new();
    let since = report
        .since
        .map(|s| s.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "full".to_string());
    let _ = writeln!(out, "Sync complete (since: {since})");
    for c in &report.collections {
        let _ = writeln!(
            out,
            "  {:<10} {:>8} written {:>6} deleted",
            c.kind.collection(),
            c.stats.inserted,
            c.stats.deleted
        );
    }
    let totals = report.totals();
    let _ = writeln!(
        out,
        "  {:<10} {:>8} written {:>6} deleted",
        "total", totals.inserted, totals.deleted
    );
    if let Some(generated) = report.generated() {
        let _ = writeln!(
            out,
            "Remote snapshot: {}",
            generated.as_datetime().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    out
}

/// Text rendition of an exchange report.
pub fn render_report(report: &ExchangeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AS{}", report.asn);
    if report.exchanges.is_empty() {
        let _ = writeln!(out, "  no public peering ports");
    }
    for (name, ports) in &report.exchanges {
        let _ = writeln!(out, "  {name}");
        for port in ports {
            let _ = writeln!(
                out,
                "    {:>7} Mbit/s  {:<15}  {}",
                port.speed, port.ipv4_addr, port.ipv6_addr
            );
        }
    }
    let s = &report.summary;
    let _ = writeln!(
        out,
        "Total: {} Mbit/s over {} ports at {} exchanges",
        s.total_speed, s.ports, s.exchanges
    );
    out
}
