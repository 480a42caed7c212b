//! Error types for the sync layer.

use crate::state::SyncPhase;
use pdbmirror_model::TimestampError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while mirroring PeeringDB.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network-level failure, including client timeouts.
    #[error("request for '{collection}' to {url} failed: {source}")]
    Transport {
        collection: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with something other than 200.
    #[error("failed request for '{collection}' to {url}: got status {status}")]
    UnexpectedStatus {
        collection: String,
        url: String,
        status: u16,
    },

    /// The response body is not a valid envelope.
    #[error("malformed envelope for '{collection}': {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// `meta.generated` is not `<secs>.<nanos>`.
    #[error("malformed envelope timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),

    /// The envelope carried a non-empty `meta.error`.
    #[error("remote error for '{collection}': {message}")]
    Remote { collection: String, message: String },

    /// The `data` payload does not decode into the table's record type.
    #[error("malformed payload for table '{table}': {source}")]
    PayloadDecode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// Insert hit an existing row with the same id.
    #[error("row with id {id} already exists in table '{table}'")]
    InsertConflict { table: String, id: i64 },

    /// The record type declares no persistable columns.
    #[error("record type for table '{table}' has no persistable columns")]
    Schema { table: String },

    /// Any other SQLite failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Invalid configuration or input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A synchronization run stopped; nothing from it was committed.
    #[error("sync aborted while {phase} '{collection}': {source}")]
    Aborted {
        phase: SyncPhase,
        collection: String,
        #[source]
        source: Box<SyncError>,
    },
}

impl SyncError {
    /// The innermost error, looking through [`SyncError::Aborted`].
    pub fn cause(&self) -> &SyncError {
        match self {
            SyncError::Aborted { source, .. } => source.cause(),
            other => other,
        }
    }
}
