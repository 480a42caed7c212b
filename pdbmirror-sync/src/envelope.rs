//! The `{meta, data}` envelope every PeeringDB collection response uses.
//!
//! `data` is kept as raw JSON: its element type is only known once the caller
//! picks the record variant to decode it into (see [`crate::applicator`]).

use crate::error::{SyncError, SyncResult};
use pdbmirror_model::UnixTime;
use serde::Deserialize;
use serde_json::value::RawValue;

/// Response metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    /// Error reported by the remote, empty on success.
    pub error: String,
    /// When the remote generated the response, if it said.
    pub generated: Option<UnixTime>,
}

/// A decoded response envelope with its payload still opaque.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub meta: Meta,
    pub data: Box<RawValue>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    meta: RawMeta,
    data: Box<RawValue>,
}

#[derive(Deserialize, Default)]
struct RawMeta {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    generated: Option<Box<RawValue>>,
}

impl Envelope {
    /// The raw `data` payload.
    pub fn payload(&self) -> &RawValue {
        &self.data
    }
}

/// Decodes an envelope from a response body.
///
/// `collection` only labels errors.
pub fn decode_envelope(collection: &str, bytes: &[u8]) -> SyncResult<Envelope> {
    let raw: RawEnvelope = serde_json::from_slice(bytes).map_err(|source| SyncError::Decode {
        collection: collection.to_string(),
        source,
    })?;

    let generated = match raw.meta.generated {
        None => None,
        Some(raw) => Some(UnixTime::from_json(&raw)?),
    };

    Ok(Envelope {
        meta: Meta {
            error: raw.meta.error.unwrap_or_default(),
            generated,
        },
        data: raw.data,
    })
}
