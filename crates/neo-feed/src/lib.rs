//! Blocking client for the asteroid feed endpoint.
//!
//! The endpoint returns a JSON array of raw records for a date range.
//! Decoding is lenient: one element that fails to decode drops only
//! itself, never the batch. Long-running consumers use
//! [`spawn_feed_worker`] to run fetches off the render thread.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use neo_core::RawRecord;

mod worker;

pub use worker::{spawn_feed_worker, FeedWorker, FetchRequest, FetchResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the feed service. Values can be overridden
/// through environment variables.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("NEO_FEED_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("NEO_FEED_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl FeedConfig {
    /// Full URL of the asteroids endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/asteroids", self.base_url.trim_end_matches('/'))
    }
}

/// Date range passed through verbatim from the user's input controls.
/// No date validation happens client-side; the service owns the
/// format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("feed response was not a JSON array: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Build the blocking HTTP client used for feed requests.
pub fn build_client(config: &FeedConfig) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(config.timeout).build()
}

/// Fetch the raw records for a date range.
pub fn fetch_records(
    client: &Client,
    config: &FeedConfig,
    range: &DateRange,
) -> Result<Vec<RawRecord>, FeedError> {
    let url = config.endpoint();
    let body = client
        .get(&url)
        .query(&[
            ("start_date", range.start.as_str()),
            ("end_date", range.end.as_str()),
        ])
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|source| FeedError::Request {
            url: url.clone(),
            source,
        })?;
    parse_records(&body)
}

/// Decode a feed response body. The outer value must be an array;
/// each element decodes independently so a malformed record is
/// dropped and counted instead of poisoning the batch.
pub fn parse_records(body: &str) -> Result<Vec<RawRecord>, FeedError> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(values.len());
    let mut dropped = 0usize;
    for value in values {
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => records.push(record),
            Err(err) => {
                dropped += 1;
                debug!("dropping undecodable feed record: {err}");
            }
        }
    }
    if dropped > 0 {
        warn!(dropped, kept = records.len(), "feed response contained undecodable records");
    }
    Ok(records)
}
