use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::{decode_price, generate_id};
use crate::normalizer::StandardListing;

/// One listing of one item at one store, identified by (name, store_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub store_id: String,
    pub price: Decimal,
    pub unit: String,
    pub image_url: String,
    pub store_url: String,
    pub last_updated: DateTime<Utc>,
    pub search_term: String,
    pub is_active: bool,
}

impl Product {
    pub fn from_listing(listing: &StandardListing, store_id: &str, search_term: &str) -> Self {
        Self {
            id: generate_id(),
            name: listing.product_name.clone(),
            store_id: store_id.to_string(),
            price: listing.price,
            unit: listing.unit.clone(),
            image_url: listing.image.clone(),
            store_url: listing.url.clone(),
            last_updated: Utc::now(),
            search_term: search_term.to_lowercase(),
            is_active: true,
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let price: String = row.try_get("price")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            store_id: row.try_get("store_id")?,
            price: decode_price("price", &price)?,
            unit: row.try_get("unit")?,
            image_url: row.try_get("image_url")?,
            store_url: row.try_get("store_url")?,
            last_updated: row.try_get("last_updated")?,
            search_term: row.try_get("search_term")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
