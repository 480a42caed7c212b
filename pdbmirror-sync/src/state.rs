//! Run state tracking.
//!
//! A run moves `Idle → Fetching(kind) → Applying(kind) → … → Committing →
//! Done`. Any failure moves it to `Aborted`; the phase the failure happened
//! in is carried by [`crate::SyncError::Aborted`].

use pdbmirror_model::RecordKind;
use std::fmt;

/// Where a synchronization run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Fetching(RecordKind),
    Applying(RecordKind),
    Committing,
    Done,
    Aborted,
}

impl SyncPhase {
    /// The record type being processed, if any.
    pub fn kind(self) -> Option<RecordKind> {
        match self {
            SyncPhase::Fetching(k) | SyncPhase::Applying(k) => Some(k),
            _ => None,
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Idle => f.write_str("idle"),
            SyncPhase::Fetching(_) => f.write_str("fetching"),
            SyncPhase::Applying(_) => f.write_str("applying"),
            SyncPhase::Committing => f.write_str("committing"),
            SyncPhase::Done => f.write_str("done"),
            SyncPhase::Aborted => f.write_str("aborted"),
        }
    }
}
