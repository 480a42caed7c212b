//! Sync driver: one fetch/apply pass over the configured record types.
//!
//! A run opens a single transaction, then for each configured type fetches
//! its collection and applies the batch. The transaction is committed once,
//! after the last type; any failure rolls the whole run back.

use crate::applicator::{ApplyMode, ApplyStats, RecordApplicator};
use crate::error::{SyncError, SyncResult};
use crate::fetcher::CollectionSource;
use crate::state::SyncPhase;
use chrono::{DateTime, Utc};
use pdbmirror_model::{RecordKind, UnixTime};
use rusqlite::{Connection, Transaction};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use tracing::{debug, info, warn};

/// Which record types to sync and how to write them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Record types, in the order they are fetched and applied.
    pub collections: Vec<RecordKind>,
    /// Write mode for live records.
    pub apply_mode: ApplyMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            collections: RecordKind::ALL.to_vec(),
            apply_mode: ApplyMode::default(),
        }
    }
}

/// Outcome for one record type within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub kind: RecordKind,
    /// `meta.generated` of the fetched envelope.
    pub generated: Option<UnixTime>,
    pub stats: ApplyStats,
}

/// Outcome of a committed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub since: Option<DateTime<Utc>>,
    pub collections: Vec<CollectionReport>,
}

impl RunReport {
    /// Earliest `meta.generated` across the fetched collections.
    pub fn generated(&self) -> Option<UnixTime> {
        self.collections.iter().filter_map(|c| c.generated).min()
    }

    /// Stats summed over every collection.
    pub fn totals(&self) -> ApplyStats {
        self.collections.iter().fold(ApplyStats::default(), |acc, c| ApplyStats {
            inserted: acc.inserted + c.stats.inserted,
            deleted: acc.deleted + c.stats.deleted,
            missing_deletes: acc.missing_deletes + c.stats.missing_deletes,
        })
    }
}

/// Drives synchronization runs against a [`CollectionSource`].
pub struct SyncDriver<S> {
    source: S,
    config: SyncConfig,
    applicator: RecordApplicator,
    phase: Cell<SyncPhase>,
}

impl<S: CollectionSource> SyncDriver<S> {
    /// Creates a driver fetching from `source`.
    pub fn new(source: S, config: SyncConfig) -> Self {
        let applicator = RecordApplicator::new(config.apply_mode);
        Self {
            source,
            config,
            applicator,
            phase: Cell::new(SyncPhase::Idle),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Phase reached by the most recent run (`Idle` before the first one).
    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    /// Runs one synchronization pass.
    ///
    /// `since` restricts every fetch to objects changed after it; `None`
    /// fetches everything. Either all configured types are committed or
    /// nothing is.
    pub fn run(&self, conn: &mut Connection, since: Option<DateTime<Utc>>) -> SyncResult<RunReport> {
        if self.config.collections.is_empty() {
            return Err(SyncError::Config("no record types configured".to_string()));
        }

        let started = Utc::now();
        self.enter(SyncPhase::Idle);
        let tx = conn.transaction()?;
        let mut collections = Vec::with_capacity(self.config.collections.len());

        for &kind in &self.config.collections {
            match self.sync_kind(&tx, kind, since) {
                Ok(report) => collections.push(report),
                Err(source) => {
                    let failed_in = self.phase.get();
                    let failed_kind = failed_in.kind().unwrap_or(kind);
                    self.enter(SyncPhase::Aborted);
                    warn!("Sync {failed_in} '{failed_kind}' failed, rolling back run: {source}");
                    if let Err(e) = tx.rollback() {
                        warn!("Rollback failed: {e}");
                    }
                    return Err(SyncError::Aborted {
                        phase: failed_in,
                        collection: failed_kind.collection().to_string(),
                        source: Box::new(source),
                    });
                }
            }
        }

        self.enter(SyncPhase::Committing);
        if let Err(e) = tx.commit() {
            self.enter(SyncPhase::Aborted);
            return Err(e.into());
        }
        self.enter(SyncPhase::Done);

        let report = RunReport {
            started,
            finished: Utc::now(),
            since,
            collections,
        };
        let totals = report.totals();
        info!(
            "Sync committed: {} types, {} written, {} deleted",
            report.collections.len(),
            totals.inserted,
            totals.deleted
        );
        Ok(report)
    }

    fn sync_kind(
        &self,
        tx: &Transaction<'_>,
        kind: RecordKind,
        since: Option<DateTime<Utc>>,
    ) -> SyncResult<CollectionReport> {
        self.enter(SyncPhase::Fetching(kind));
        let envelope = self.source.fetch(kind.collection(), since)?;

        self.enter(SyncPhase::Applying(kind));
        info!("Updating database table '{}'", kind.table());
        let stats = self.applicator.apply_kind(kind, tx, envelope.payload())?;

        Ok(CollectionReport {
            kind,
            generated: envelope.meta.generated,
            stats,
        })
    }

    fn enter(&self, next: SyncPhase) {
        let prev = self.phase.replace(next);
        if prev != next {
            debug!("Sync phase {prev:?} -> {next:?}");
        }
    }
}
