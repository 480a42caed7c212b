//! Remote collection fetching.
//!
//! [`CollectionSource`] is the seam between the driver and wherever envelopes
//! come from. [`HttpFetcher`] is the production implementation: one blocking
//! `GET <base>/<collection>[?since=<unix secs>]` per call.

use crate::envelope::{decode_envelope, Envelope};
use crate::error::{SyncError, SyncResult};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default PeeringDB API root.
pub const DEFAULT_BASE_URL: &str = "https://www.peeringdb.com/api";

/// HTTP settings for [`HttpFetcher`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// API root; collections are appended as a path segment.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Skip TLS certificate verification. Only for test mirrors.
    pub accept_invalid_certs: bool,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            accept_invalid_certs: false,
            user_agent: concat!("pdbmirror/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Something that can produce the envelope for a collection.
pub trait CollectionSource {
    /// Fetches `collection`, restricted to objects changed after `since` when
    /// one is given.
    fn fetch(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Envelope>;
}

impl<S: CollectionSource + ?Sized> CollectionSource for &S {
    fn fetch(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Envelope> {
        (**self).fetch(collection, since)
    }
}

impl<S: CollectionSource + ?Sized> CollectionSource for Box<S> {
    fn fetch(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Envelope> {
        (**self).fetch(collection, since)
    }
}

/// Fetches collections from a PeeringDB-compatible HTTP API.
pub struct HttpFetcher {
    base_url: Url,
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own HTTP client.
    pub fn new(config: &FetchConfig) -> SyncResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SyncError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::Config(format!(
                "base URL '{}' cannot take path segments",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { base_url, client })
    }

    /// The configured API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL for `collection`.
    pub fn collection_url(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Url> {
        if collection.is_empty() {
            return Err(SyncError::Config("collection name must not be empty".to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SyncError::Config(format!("base URL '{}' cannot take path segments", self.base_url)))?
            .pop_if_empty()
            .push(collection);

        if let Some(since) = since.filter(|t| t.timestamp() > 0) {
            url.query_pairs_mut()
                .append_pair("since", &since.timestamp().to_string());
        }
        Ok(url)
    }
}

impl CollectionSource for HttpFetcher {
    fn fetch(&self, collection: &str, since: Option<DateTime<Utc>>) -> SyncResult<Envelope> {
        let url = self.collection_url(collection, since)?;
        info!("Fetching {url}");

        let transport = |source| SyncError::Transport {
            collection: collection.to_string(),
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SyncError::UnexpectedStatus {
                collection: collection.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(transport)?;
        debug!("Received {} bytes for '{collection}'", body.len());

        let envelope = decode_envelope(collection, &body)?;
        if !envelope.meta.error.is_empty() {
            return Err(SyncError::Remote {
                collection: collection.to_string(),
                message: envelope.meta.error,
            });
        }
        Ok(envelope)
    }
}
