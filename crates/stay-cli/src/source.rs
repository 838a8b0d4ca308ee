//! Calendar feed sources.
//!
//! A source yields the listing's blocked intervals, freshly parsed on every
//! call. Failures here are fatal to the request: without the calendar there
//! is nothing to check against.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use stay_engine::BlockedInterval;

#[async_trait]
pub trait IntervalSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<BlockedInterval>>;
}

/// An `.ics` export saved on disk.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl IntervalSource for FileFeed {
    async fn fetch(&self) -> Result<Vec<BlockedInterval>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read calendar file: {}", self.path.display()))?;
        let blocked = stay_engine::parse_calendar(&text);
        tracing::debug!(
            path = %self.path.display(),
            count = blocked.len(),
            "loaded calendar file"
        );
        Ok(blocked)
    }
}

/// A calendar export URL, fetched over HTTP on every request.
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl IntervalSource for HttpFeed {
    async fn fetch(&self) -> Result<Vec<BlockedInterval>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch calendar feed: {}", self.url))?
            .error_for_status()
            .context("Calendar feed returned an error status")?;
        let text = response
            .text()
            .await
            .context("Failed to read calendar feed body")?;
        let blocked = stay_engine::parse_calendar(&text);
        tracing::debug!(count = blocked.len(), "fetched calendar feed");
        Ok(blocked)
    }
}
