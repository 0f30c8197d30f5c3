use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grocery_watcher::catalog::{CatalogRepository, SqliteCatalog};
use grocery_watcher::config::{AppConfig, LoggingConfig};
use grocery_watcher::fetch_client::FetchClient;
use grocery_watcher::normalizer::ListingNormalizer;
use grocery_watcher::scheduler::CollectionScheduler;
use grocery_watcher::stores::StoreRegistry;

#[derive(Parser)]
#[command(name = "grocery-watcher")]
#[command(version, about = "Collects grocery prices from Irish retailers and tracks price history")]
struct Cli {
    /// Directory holding default.toml and profile overrides
    #[arg(long, global = true, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect now, then on every interval until Ctrl-C
    Run,

    /// Run a single collection pass and print its report
    Once,

    /// Search one store and print normalized listings without saving them
    Search {
        store: String,
        term: String,
    },

    /// Print the recorded price history of one product
    History {
        store: String,
        product: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::from_dir(&cli.config_dir)
        .with_context(|| format!("failed to load configuration from {}", cli.config_dir))?;
    let _guard = init_tracing(&config.logging)?;
    config.warn_on_unsafe_settings();

    if config.metrics.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics.port));
        if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
            tracing::warn!(error = %e, "Failed to install Prometheus exporter");
        }
    }

    let client = FetchClient::new(config.fetch.clone())?;
    let registry = StoreRegistry::from_config(&config, client);

    match cli.command {
        Commands::Run => {
            let catalog = bootstrap(&config, &registry).await?;
            let scheduler = CollectionScheduler::new(registry, catalog, config.scheduler.clone());
            scheduler.start().await?;

            tokio::signal::ctrl_c().await?;
            info!("Shutting down...");
            scheduler.stop().await?;
        }
        Commands::Once => {
            let catalog = bootstrap(&config, &registry).await?;
            let scheduler = CollectionScheduler::new(registry, catalog, config.scheduler.clone());
            let report = scheduler.run_once().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Search { store, term } => {
            let adapter = registry
                .get(&store)
                .with_context(|| format!("unknown store {} (known: {})", store, registry.names().join(", ")))?;
            let normalizer = ListingNormalizer::new();
            for raw in adapter.search(&term).await {
                let listing = normalizer.standardize(&raw, adapter.name());
                println!("{:<45} {:>8} {:<10} {}", listing.product_name, listing.price, listing.unit, listing.url);
            }
        }
        Commands::History { store, product } => {
            let catalog = SqliteCatalog::connect(&config.database).await?;
            let store_row = catalog
                .find_store(&store)
                .await?
                .with_context(|| format!("store {} has not been collected yet", store))?;
            let product_row = catalog
                .find_product(&product, &store_row.id)
                .await?
                .with_context(|| format!("no product named {:?} at {}", product, store))?;

            println!("{} @ {} (current {})", product_row.name, store_row.name, product_row.price);
            for point in catalog.price_history(&product_row.id).await? {
                println!("  {}  {}", point.recorded_at.format("%Y-%m-%d %H:%M:%S"), point.price);
            }
        }
    }

    Ok(())
}

/// Open the catalog and make sure every registered store has a row.
async fn bootstrap(config: &AppConfig, registry: &StoreRegistry) -> Result<Arc<dyn CatalogRepository>> {
    let catalog = SqliteCatalog::connect(&config.database).await?;
    for adapter in registry.adapters() {
        catalog.ensure_store(adapter.name(), adapter.website()).await?;
    }
    info!(stores = registry.len(), "Catalog ready");
    Ok(Arc::new(catalog))
}

fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("grocery_watcher={}", logging.level)))?;

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "grocery-watcher.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
            Ok(None)
        }
    }
}
