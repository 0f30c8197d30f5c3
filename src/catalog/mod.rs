//! Persisted catalog: stores, products and their price history.
//!
//! Products are keyed by (name, store). Re-observing a product updates its
//! price in place and appends a history point only when the price moved.

mod schema;

pub use schema::SCHEMA_SQL;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::models::{ChangeType, PriceHistory, Product, Store};
use crate::normalizer::StandardListing;
use crate::utils::error::{AppError, Result};

/// What a single upsert did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Unchanged,
    PriceChanged {
        old: Decimal,
        new: Decimal,
        change: ChangeType,
    },
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns the existing store with this name, creating it if absent.
    async fn ensure_store(&self, name: &str, website: &str) -> Result<Store>;

    async fn find_store(&self, name: &str) -> Result<Option<Store>>;

    async fn list_stores(&self) -> Result<Vec<Store>>;

    /// Insert or update one listing, atomically with its history point.
    async fn upsert(&self, listing: &StandardListing, store_id: &str, search_term: &str) -> Result<UpsertOutcome>;

    async fn mark_store_scraped(&self, store_id: &str, at: DateTime<Utc>) -> Result<()>;

    async fn set_store_flags(&self, store_id: &str, is_active: bool, scraper_enabled: bool) -> Result<()>;

    async fn find_product(&self, name: &str, store_id: &str) -> Result<Option<Product>>;

    async fn set_product_active(&self, product_id: &str, is_active: bool) -> Result<()>;

    /// Oldest first.
    async fn price_history(&self, product_id: &str) -> Result<Vec<PriceHistory>>;

    /// Active products collected under `term`, cheapest first.
    async fn products_for_term(&self, term: &str) -> Result<Vec<Product>>;

    async fn count_products(&self) -> Result<i64>;
}

#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Connect and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.acquire_timeout));

        debug!(url = %config.url, "Connecting to catalog database");

        // Each connection to an in-memory database is its own database
        let pool = if config.url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout))
                .connect_with(options)
                .await?
        };

        let catalog = Self { pool };
        catalog.init_schema().await?;
        Ok(catalog)
    }

    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing catalog schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalog {
    async fn ensure_store(&self, name: &str, website: &str) -> Result<Store> {
        if let Some(store) = self.find_store(name).await? {
            return Ok(store);
        }

        let store = Store::new(name, website);
        sqlx::query(
            r#"
            INSERT INTO stores (id, name, website, is_active, scraper_enabled, last_scraped)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(&store.id)
        .bind(&store.name)
        .bind(&store.website)
        .bind(store.is_active)
        .bind(store.scraper_enabled)
        .bind(store.last_scraped)
        .execute(&self.pool)
        .await?;

        // Re-read in case a concurrent caller inserted first
        let store = self.find_store(name).await?.ok_or_else(|| AppError::NotFound {
            resource: format!("store {}", name),
        })?;
        info!(store = %store.name, id = %store.id, "Store registered");
        Ok(store)
    }

    async fn find_store(&self, name: &str) -> Result<Option<Store>> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    async fn list_stores(&self) -> Result<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>("SELECT * FROM stores ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(stores)
    }

    async fn upsert(&self, listing: &StandardListing, store_id: &str, search_term: &str) -> Result<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let mut candidate = Product::from_listing(listing, store_id, search_term);
        candidate.last_updated = now;

        // Write before reading so the transaction holds the write lock from
        // its first statement. A conflicting row keeps its stored price.
        let current = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (id, name, store_id, price, unit, image_url, store_url, last_updated, search_term, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(name, store_id) DO UPDATE SET
                last_updated = excluded.last_updated,
                is_active = 1
            RETURNING *
            "#,
        )
        .bind(&candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.store_id)
        .bind(candidate.price.to_string())
        .bind(&candidate.unit)
        .bind(&candidate.image_url)
        .bind(&candidate.store_url)
        .bind(candidate.last_updated)
        .bind(&candidate.search_term)
        .bind(candidate.is_active)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = if current.id == candidate.id {
            UpsertOutcome::Created
        } else if current.price == listing.price {
            UpsertOutcome::Unchanged
        } else {
            sqlx::query("UPDATE products SET price = ? WHERE id = ?")
                .bind(listing.price.to_string())
                .bind(&current.id)
                .execute(&mut *tx)
                .await?;
            UpsertOutcome::PriceChanged {
                old: current.price,
                new: listing.price,
                change: ChangeType::between(current.price, listing.price),
            }
        };

        if outcome != UpsertOutcome::Unchanged {
            let mut point = PriceHistory::record(&current.id, listing.price);
            point.recorded_at = now;
            sqlx::query("INSERT INTO price_history (id, product_id, price, recorded_at) VALUES (?, ?, ?, ?)")
                .bind(&point.id)
                .bind(&point.product_id)
                .bind(point.price.to_string())
                .bind(point.recorded_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        metrics::counter!("listings_upserted_total").increment(1);
        match outcome {
            UpsertOutcome::PriceChanged { old, new, change } => {
                metrics::counter!("price_changes_total").increment(1);
                info!(
                    product = %listing.product_name,
                    store_id = %store_id,
                    %old,
                    %new,
                    ?change,
                    "Price changed"
                );
            }
            UpsertOutcome::Created => {
                debug!(product = %listing.product_name, store_id = %store_id, price = %listing.price, "Product created");
            }
            UpsertOutcome::Unchanged => {}
        }

        Ok(outcome)
    }

    async fn mark_store_scraped(&self, store_id: &str, at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query("UPDATE stores SET last_scraped = ? WHERE id = ?")
            .bind(at)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                resource: format!("store {}", store_id),
            });
        }
        Ok(())
    }

    async fn set_store_flags(&self, store_id: &str, is_active: bool, scraper_enabled: bool) -> Result<()> {
        let result = sqlx::query("UPDATE stores SET is_active = ?, scraper_enabled = ? WHERE id = ?")
            .bind(is_active)
            .bind(scraper_enabled)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                resource: format!("store {}", store_id),
            });
        }
        Ok(())
    }

    async fn find_product(&self, name: &str, store_id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = ? AND store_id = ?")
            .bind(name)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn set_product_active(&self, product_id: &str, is_active: bool) -> Result<()> {
        let result = sqlx::query("UPDATE products SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                resource: format!("product {}", product_id),
            });
        }
        Ok(())
    }

    async fn price_history(&self, product_id: &str) -> Result<Vec<PriceHistory>> {
        let history = sqlx::query_as::<_, PriceHistory>(
            "SELECT * FROM price_history WHERE product_id = ? ORDER BY recorded_at ASC, rowid ASC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(history)
    }

    async fn products_for_term(&self, term: &str) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE search_term = ? AND is_active = 1
            ORDER BY CAST(price AS REAL) ASC, name ASC
            "#,
        )
        .bind(term.trim().to_lowercase())
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn count_products(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
