//! Page fan-out and merge
//!
//! Given the decoded first page of a listing, fetches the remaining pages
//! concurrently and concatenates their `data` arrays in page order.

use super::types::{page_items, PageCountPolicy, PageEnvelope};
use crate::config::{VimeoConfig, DEFAULT_PER_PAGE};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches one page of an endpoint
///
/// Implemented by the request executor; tests substitute fakes.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `page` of `endpoint` and return the decoded body
    async fn fetch_page(&self, endpoint: &Endpoint, page: u64) -> Result<Value>;
}

/// Pagination aggregator
#[derive(Debug, Clone)]
pub struct Aggregator {
    default_per_page: u64,
    policy: PageCountPolicy,
    max_concurrency: usize,
    page_timeout: Option<Duration>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            policy: PageCountPolicy::default(),
            max_concurrency: 8,
            page_timeout: None,
        }
    }
}

impl Aggregator {
    /// Create an aggregator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator settings from client configuration
    pub fn from_config(config: &VimeoConfig) -> Self {
        Self {
            default_per_page: config.per_page,
            policy: config.page_count_policy,
            max_concurrency: config.http.max_concurrency,
            page_timeout: config.http.page_timeout(),
        }
    }

    /// Page size assumed when the envelope has none
    #[must_use]
    pub fn with_default_per_page(mut self, per_page: u64) -> Self {
        self.default_per_page = per_page;
        self
    }

    /// Page count policy
    #[must_use]
    pub fn with_policy(mut self, policy: PageCountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum page fetches in flight
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Timeout for each individual page fetch
    #[must_use]
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }

    /// Merge all pages of a listing
    ///
    /// Values that are not paged envelopes are returned unchanged. For an
    /// envelope, the result is a JSON array of page 1 items followed by
    /// the items of every extra page in ascending page order. All fetches
    /// are awaited before returning; if any failed, the failure with the
    /// lowest page number is reported as [`Error::Aggregation`].
    pub async fn aggregate<F>(&self, first: Value, endpoint: &Endpoint, fetcher: &F) -> Result<Value>
    where
        F: PageFetcher + ?Sized,
    {
        let envelope = match PageEnvelope::from_value(first) {
            Ok(envelope) => envelope,
            Err(value) => return Ok(value),
        };

        let per_page = envelope.per_page.unwrap_or(self.default_per_page);
        let pages = self.policy.extra_pages(envelope.total, per_page);
        let mut items = envelope.data;

        if pages.is_empty() {
            debug!(total = envelope.total, per_page, "Single page listing");
            return Ok(Value::Array(items));
        }

        debug!(
            path = endpoint.path(),
            first = pages.start(),
            last = pages.end(),
            "Fanning out page fetches"
        );

        // One slot per page index, each written once
        let slots: BTreeMap<u64, Result<Vec<Value>>> = stream::iter(pages)
            .map(|page| async move { (page, self.fetch(endpoint, fetcher, page).await) })
            .buffer_unordered(self.max_concurrency.max(1))
            .collect()
            .await;

        let page_count = slots.len();
        for (page, slot) in slots {
            match slot {
                Ok(page_data) => items.extend(page_data),
                Err(e) => return Err(Error::aggregation(page, e)),
            }
        }

        info!(
            path = endpoint.path(),
            pages = page_count + 1,
            items = items.len(),
            total = envelope.total,
            "Aggregated paged listing"
        );
        Ok(Value::Array(items))
    }

    async fn fetch<F>(&self, endpoint: &Endpoint, fetcher: &F, page: u64) -> Result<Vec<Value>>
    where
        F: PageFetcher + ?Sized,
    {
        debug!(page, "Fetching page");
        let body = match self.page_timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetcher.fetch_page(endpoint, page))
                .await
                .map_err(|_| Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })??,
            None => fetcher.fetch_page(endpoint, page).await?,
        };
        Ok(page_items(body))
    }
}
