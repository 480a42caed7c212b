//! PeeringDB synchronization engine for pdbmirror.
//!
//! Mirrors remote PeeringDB collections into a local SQLite database,
//! incrementally and with soft-delete handling.
//!
//! # Architecture
//!
//! ## Components
//!
//! - **Fetcher**: retrieves one collection's envelope, optionally only the
//!   objects changed since a given time
//! - **Envelope**: decodes the `{meta, data}` wrapper, leaving `data` raw
//! - **Applicator**: decodes `data` into concrete records and inserts or
//!   deletes each one through the caller's transaction
//! - **Engine**: runs fetch → apply for every configured record type inside
//!   a single transaction, committing only when all of them succeeded
//! - **Store**: creates the record tables and keeps run bookkeeping
//!
//! ## Sync Process
//!
//! 1. **Begin**: open one transaction for the whole run
//! 2. **Fetch**: `GET <base>/<collection>?since=<secs>` per record type
//! 3. **Apply**: delete soft-deleted ids, write everything else
//! 4. **Commit**: once, after the last type; any error rolls back instead
//!
//! # Example
//!
//! ```no_run
//! use pdbmirror_sync::{FetchConfig, HttpFetcher, MirrorStore, SyncConfig, SyncDriver};
//!
//! let mut store = MirrorStore::open("pdb.db")?;
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let driver = SyncDriver::new(fetcher, SyncConfig::default());
//!
//! let since = store.last_sync()?;
//! let report = driver.run(store.connection_mut(), since)?;
//! store.record_run(&report)?;
//! # Ok::<(), pdbmirror_sync::SyncError>(())
//! ```

pub mod applicator;
mod engine;
pub mod envelope;
mod error;
pub mod fetcher;
pub mod report;
pub mod state;
pub mod store;

pub use applicator::{ApplyMode, ApplyStats, RecordApplicator};
pub use engine::{CollectionReport, RunReport, SyncConfig, SyncDriver};
pub use envelope::{decode_envelope, Envelope, Meta};
pub use error::{SyncError, SyncResult};
pub use fetcher::{CollectionSource, FetchConfig, HttpFetcher, DEFAULT_BASE_URL};
pub use report::{exchange_report, ExchangeReport, PortSummary, ReportSummary};
pub use state::SyncPhase;
pub use store::{MirrorStore, SyncRunRecord};
