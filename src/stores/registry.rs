use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::fetch_client::FetchClient;
use crate::stores::retailers::{aldi, dunnes, lidl, supervalu, tesco, SyntheticRetailer};
use crate::stores::synthetic::SyntheticPricing;
use crate::stores::traits::StoreAdapter;

pub type StoreAdapterRef = Arc<dyn StoreAdapter>;

/// Ordered set of store adapters. Iteration order is registration order.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    adapters: Vec<StoreAdapterRef>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, replacing any existing one with the same name.
    pub fn register(&mut self, adapter: StoreAdapterRef) {
        match self.adapters.iter().position(|a| a.name() == adapter.name()) {
            Some(index) => {
                tracing::warn!(store = adapter.name(), "Replacing registered store adapter");
                self.adapters[index] = adapter;
            }
            None => self.adapters.push(adapter),
        }
    }

    pub fn get(&self, name: &str) -> Option<StoreAdapterRef> {
        self.adapters
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn adapters(&self) -> &[StoreAdapterRef] {
        &self.adapters
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Built-in retailers plus any configured feeds, honouring per-retailer
    /// `enabled` flags and delay overrides.
    pub fn from_config(config: &AppConfig, client: FetchClient) -> Self {
        let pricing = SyntheticPricing::new(config.stores.synthetic_mode, config.stores.synthetic_seed);
        let stores = &config.stores;
        let mut registry = Self::new();

        let built_in = [
            (&stores.tesco, tesco::PROFILE),
            (&stores.supervalu, supervalu::PROFILE),
            (&stores.dunnes, dunnes::PROFILE),
            (&stores.lidl, lidl::PROFILE),
            (&stores.aldi, aldi::PROFILE),
        ];
        for (settings, profile) in built_in {
            if !settings.enabled {
                tracing::debug!(store = profile.name, "Store disabled in configuration");
                continue;
            }
            let mut adapter = SyntheticRetailer::new(profile, pricing.clone());
            if let Some(ms) = settings.delay_ms {
                adapter = adapter.with_delay(Duration::from_millis(ms));
            }
            registry.register(Arc::new(adapter));
        }

        for feed in &config.feeds {
            registry.register(Arc::new(crate::stores::FeedAdapter::new(feed, client.clone())));
        }

        tracing::info!(stores = ?registry.names(), "Store adapters registered");
        registry
    }
}
