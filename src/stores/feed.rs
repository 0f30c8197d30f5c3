use async_trait::async_trait;
use std::time::Duration;
use url::form_urlencoded;

use crate::config::FeedConfig;
use crate::fetch_client::{FetchClient, FetchOptions};
use crate::stores::traits::{RawListing, StoreAdapter};

/// A retailer exposing a JSON search endpoint that returns an array of
/// listings. The configured URL carries a `{term}` placeholder.
pub struct FeedAdapter {
    name: String,
    website: String,
    search_url: String,
    delay: Duration,
    client: FetchClient,
}

impl FeedAdapter {
    pub fn new(config: &FeedConfig, client: FetchClient) -> Self {
        let delay = config
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| client.config().politeness_delay());

        Self {
            name: config.name.clone(),
            website: config.website.clone(),
            search_url: config.search_url.clone(),
            delay,
            client,
        }
    }

    pub fn search_url_for(&self, term: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(term.trim().as_bytes()).collect();
        self.search_url.replace("{term}", &encoded)
    }
}

#[async_trait]
impl StoreAdapter for FeedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn website(&self) -> &str {
        &self.website
    }

    fn politeness_delay(&self) -> Duration {
        self.delay
    }

    async fn search(&self, term: &str) -> Vec<RawListing> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        let url = self.search_url_for(term);
        tracing::info!(store = %self.name, term = %term, "Searching");

        match self
            .client
            .fetch_json::<Vec<RawListing>>(&url, &FetchOptions::with_delay(self.delay))
            .await
        {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!(store = %self.name, term = %term, error = %e, "Search failed, skipping");
                Vec::new()
            }
        }
    }
}
