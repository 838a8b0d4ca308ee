//! Pricing oracles.
//!
//! Every oracle degrades to "no pricing" instead of failing: a stay can be
//! checked without knowing what it costs.

use std::path::PathBuf;

use async_trait::async_trait;
use stay_engine::pricing::ListingPricesRequest;
use stay_engine::{CandidateInterval, PricingQuote};

#[async_trait]
pub trait PricingOracle: Send + Sync {
    async fn quote(&self, range: &CandidateInterval) -> Option<PricingQuote>;
}

/// Pricing disabled.
pub struct NoPricing;

#[async_trait]
impl PricingOracle for NoPricing {
    async fn quote(&self, _range: &CandidateInterval) -> Option<PricingQuote> {
        None
    }
}

/// A saved `listing_prices` response body. The range is not re-checked
/// against the file's contents.
pub struct FilePricing {
    path: PathBuf,
}

impl FilePricing {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PricingOracle for FilePricing {
    async fn quote(&self, _range: &CandidateInterval) -> Option<PricingQuote> {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read pricing file"
                );
                return None;
            }
        };
        parse_or_warn(&body)
    }
}

/// The PriceLabs `listing_prices` API.
pub struct PriceLabs {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    listing_id: Option<String>,
}

impl PriceLabs {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
        listing_id: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            listing_id,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/listing_prices", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PricingOracle for PriceLabs {
    async fn quote(&self, range: &CandidateInterval) -> Option<PricingQuote> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            tracing::warn!("PriceLabs API key not configured, skipping pricing");
            return None;
        };
        let Some(listing_id) = self.listing_id.as_deref() else {
            tracing::warn!("listing id not configured, skipping pricing");
            return None;
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("X-API-Key", api_key)
            .json(&ListingPricesRequest::for_range(listing_id, range))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "PriceLabs request failed");
                return None;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read PriceLabs response");
                return None;
            }
        };

        if !status.is_success() {
            tracing::warn!(%status, body = body.trim(), "PriceLabs API error");
            return None;
        }

        tracing::debug!(bytes = body.len(), "PriceLabs response received");
        parse_or_warn(&body)
    }
}

fn parse_or_warn(body: &str) -> Option<PricingQuote> {
    match stay_engine::parse_listing_prices(body) {
        Ok(Some(quote)) => Some(quote),
        Ok(None) => {
            tracing::warn!("pricing response contained no prices");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "unreadable pricing response");
            None
        }
    }
}
