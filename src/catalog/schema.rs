//! SQLite schema for the collected catalog

/// Prices are TEXT so decimal values round-trip exactly.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stores (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    website TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    scraper_enabled BOOLEAN NOT NULL DEFAULT 1,
    last_scraped TEXT
);

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    store_id TEXT NOT NULL REFERENCES stores(id),
    price TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT '',
    image_url TEXT NOT NULL DEFAULT '',
    store_url TEXT NOT NULL DEFAULT '',
    last_updated TEXT NOT NULL,
    search_term TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    UNIQUE(name, store_id)
);

CREATE TABLE IF NOT EXISTS price_history (
    id TEXT PRIMARY KEY,
    product_id TEXT NOT NULL REFERENCES products(id),
    price TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_products_search_term ON products(search_term);
CREATE INDEX IF NOT EXISTS idx_price_history_product ON price_history(product_id, recorded_at);
"#;
