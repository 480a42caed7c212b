//! Shared test helpers for sync tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use pdbmirror_sync::{decode_envelope, CollectionSource, Envelope, SyncError, SyncResult};
use serde_json::value::RawValue;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Wraps a `data` array in a successful envelope body.
pub fn envelope_body(data: Value) -> String {
    json!({"meta": {"error": "", "generated": "1609459200.500000000"}, "data": data}).to_string()
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pdbmirror_sync=debug")
        .with_test_writer()
        .try_init();
}

/// Boxes a JSON value as a raw payload.
pub fn raw(data: Value) -> Box<RawValue> {
    RawValue::from_string(data.to_string()).unwrap()
}

enum Canned {
    Body(String),
    Status(u16),
}

/// In-memory [`CollectionSource`] with canned responses per collection.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Canned>,
    calls: RefCell<Vec<(String, Option<DateTime<Utc>>)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` verbatim for `collection`.
    pub fn with_body(mut self, collection: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(collection.to_string(), Canned::Body(body.into()));
        self
    }

    /// Serves an envelope wrapping `data` for `collection`.
    pub fn with_data(self, collection: &str, data: Value) -> Self {
        self.with_body(collection, envelope_body(data))
    }

    /// Fails `collection` with an HTTP status.
    pub fn with_status(mut self, collection: &str, status: u16) -> Self {
        self.responses
            .insert(collection.to_string(), Canned::Status(status));
        self
    }

    /// Collections fetched so far, with the `since` each was asked for.
    pub fn calls(&self) -> Vec<(String, Option<DateTime<Utc>>)> {
        self.calls.borrow().clone()
    }
}

impl CollectionSource for FakeSource {
    fn fetch(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Envelope> {
        self.calls.borrow_mut().push((collection.to_string(), since));
        let url = format!("fake://{collection}");
        match self.responses.get(collection) {
            Some(Canned::Body(body)) => decode_envelope(collection, body.as_bytes()),
            Some(Canned::Status(status)) => Err(SyncError::UnexpectedStatus {
                collection: collection.to_string(),
                url,
                status: *status,
            }),
            None => Err(SyncError::UnexpectedStatus {
                collection: collection.to_string(),
                url,
                status: 404,
            }),
        }
    }
}
