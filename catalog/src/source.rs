//! Data sources that supply the initial [`Snapshot`].
//!
//! A source is fetched once per catalog at startup. Both catalogs share one
//! `Arc<dyn DataSource>`, so implementations must be cheap to call twice and
//! must not depend on call order.
//!
//! # Dyn Compatibility
//!
//! [`DataSource`] returns `Pin<Box<dyn Future>>` instead of using `async fn`
//! so it can live behind `Arc<dyn DataSource>` and be captured by the load
//! effect of either catalog.

use crate::model::{Snapshot, SnapshotError};
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::effect::Effect;
use thiserror::Error;

/// Errors produced while fetching or decoding a snapshot
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a local file failed
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request itself failed
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server responded with status {0}")]
    Status(u16),

    /// The payload is not a snapshot document
    #[error("invalid snapshot document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but violates snapshot integrity
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] SnapshotError),

    /// The fetch did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The source is known to be unreachable
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Future returned by [`DataSource::fetch_snapshot`]
pub type SnapshotFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Snapshot, SourceError>> + Send + 'a>>;

/// A provider of the initial catalog contents
pub trait DataSource: Send + Sync {
    /// Fetch the full snapshot
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source cannot be read or its
    /// payload is not a valid snapshot.
    fn fetch_snapshot(&self) -> SnapshotFuture<'_>;

    /// Human readable location, used in logs
    fn describe(&self) -> String;
}

/// Decode and validate a JSON snapshot document
///
/// # Errors
///
/// Returns [`SourceError::Decode`] for invalid JSON or shape, and
/// [`SourceError::Malformed`] for duplicate order, item or line ids.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, SourceError> {
    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Fetch a snapshot, giving up after `timeout`
///
/// # Errors
///
/// Returns the source's error, or [`SourceError::Timeout`] if the fetch
/// did not complete in time.
pub async fn fetch_with_timeout(
    source: &dyn DataSource,
    timeout: Duration,
) -> Result<Snapshot, SourceError> {
    tokio::time::timeout(timeout, source.fetch_snapshot())
        .await
        .map_err(|_| SourceError::Timeout(timeout))?
}

/// Effect that fetches a snapshot and feeds the outcome back as an action
///
/// `loaded` maps a snapshot to the catalog's success event, `failed` maps
/// the error message to its failure event. Exactly one of them runs.
pub fn load_effect<A, F, G>(
    source: Arc<dyn DataSource>,
    timeout: Duration,
    loaded: F,
    failed: G,
) -> Effect<A>
where
    A: Send + 'static,
    F: FnOnce(Snapshot) -> A + Send + 'static,
    G: FnOnce(String) -> A + Send + 'static,
{
    stockroom_core::async_effect! {
        match fetch_with_timeout(source.as_ref(), timeout).await {
            Ok(snapshot) => {
                tracing::info!(
                    source = %source.describe(),
                    orders = snapshot.orders.len(),
                    items = snapshot.items.len(),
                    "Snapshot fetched"
                );
                Some(loaded(snapshot))
            }
            Err(error) => {
                tracing::error!(
                    source = %source.describe(),
                    error = %error,
                    "Snapshot fetch failed"
                );
                Some(failed(error.to_string()))
            }
        }
    }
}

/// Picks a source for a location string
///
/// `http://` and `https://` locations are fetched with [`HttpSource`];
/// anything else is treated as a file path.
#[must_use]
pub fn source_for(location: &str) -> Arc<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location))
    } else {
        Arc::new(JsonFileSource::new(location))
    }
}

/// Reads a snapshot document from the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for the given file
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for JsonFileSource {
    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|source| SourceError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            decode_snapshot(&bytes)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches a snapshot document with an HTTP GET
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source for the given URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl DataSource for HttpSource {
    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        Box::pin(async move {
            let response = self.client.get(&self.url).send().await?;

            if !response.status().is_success() {
                return Err(SourceError::Status(response.status().as_u16()));
            }

            let bytes = response.bytes().await?;
            decode_snapshot(&bytes)
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a fixed in-memory snapshot
///
/// The snapshot is validated on every fetch, like a decoded document.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Snapshot,
}

impl StaticSource {
    /// Create a source that always returns `snapshot`
    #[must_use]
    pub const fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl DataSource for StaticSource {
    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        let snapshot = self.snapshot.clone();
        Box::pin(async move {
            snapshot.validate()?;
            Ok(snapshot)
        })
    }

    fn describe(&self) -> String {
        "static snapshot".to_string()
    }
}

/// A source that always fails
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    /// Create a source that fails with `reason`
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DataSource for UnavailableSource {
    fn fetch_snapshot(&self) -> SnapshotFuture<'_> {
        let reason = self.reason.clone();
        Box::pin(async move { Err(SourceError::Unavailable(reason)) })
    }

    fn describe(&self) -> String {
        format!("unavailable ({})", self.reason)
    }
}
