// Integration tests for Grocery Watcher
// These tests verify that all components work together correctly

pub mod catalog_tests;
pub mod fetch_tests;
pub mod scheduler_tests;

use std::sync::Arc;
use grocery_watcher::{
    AppConfig,
    catalog::{CatalogRepository, SqliteCatalog},
    config::{DatabaseConfig, FetchConfig, LoggingConfig, MetricsConfig, SchedulerConfig, StoresConfig},
    fetch_client::FetchClient,
    scheduler::CollectionScheduler,
    stores::StoreRegistry,
};

/// Test configuration for integration tests
pub fn get_test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 10,
        },
        fetch: FetchConfig {
            max_attempts: 3,
            backoff_base_ms: 5,
            backoff_factor: 2,
            request_timeout_secs: 2,
            politeness_delay_ms: 0,
            user_agent: "GroceryWatcher-Test/1.0".to_string(),
            accept_invalid_certs: false,
        },
        scheduler: SchedulerConfig {
            interval_hours: 48,
            run_on_start: false,
            parallel_stores: false,
            terms: Some(vec!["milk".to_string(), "bread".to_string(), "eggs".to_string()]),
        },
        stores: StoresConfig::default(),
        feeds: vec![],
        logging: LoggingConfig::default(),
        metrics: MetricsConfig::default(),
    }
}

/// Create an empty in-memory catalog
pub async fn create_test_catalog() -> anyhow::Result<Arc<SqliteCatalog>> {
    let config = get_test_config();
    let catalog = SqliteCatalog::connect(&config.database).await?;
    Ok(Arc::new(catalog))
}

/// Build the default five-store registry with politeness delays removed
pub fn create_test_registry(config: &AppConfig) -> anyhow::Result<StoreRegistry> {
    let mut config = config.clone();
    for retailer in [
        &mut config.stores.tesco,
        &mut config.stores.supervalu,
        &mut config.stores.dunnes,
        &mut config.stores.lidl,
        &mut config.stores.aldi,
    ] {
        retailer.delay_ms = Some(0);
    }
    let client = FetchClient::new(config.fetch.clone())?;
    Ok(StoreRegistry::from_config(&config, client))
}

/// Create a scheduler over the default stores and a fresh catalog
pub async fn create_test_scheduler() -> anyhow::Result<(CollectionScheduler, Arc<SqliteCatalog>)> {
    let config = get_test_config();
    let catalog = create_test_catalog().await?;
    let registry = create_test_registry(&config)?;
    let repository: Arc<dyn CatalogRepository> = catalog.clone();
    let scheduler = CollectionScheduler::new(registry, repository, config.scheduler.clone());
    Ok((scheduler, catalog))
}

/// Helper to wait for async operations
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_seconds: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_secs(timeout_seconds);

    while start.elapsed() < timeout {
        if condition().await {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    false
}
