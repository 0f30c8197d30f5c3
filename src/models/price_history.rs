use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::{decode_price, generate_id};

/// Append-only price point; written whenever a product's price changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceHistory {
    pub id: String,
    pub product_id: String,
    pub price: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl PriceHistory {
    pub fn record(product_id: &str, price: Decimal) -> Self {
        Self {
            id: generate_id(),
            product_id: product_id.to_string(),
            price,
            recorded_at: Utc::now(),
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for PriceHistory {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let price: String = row.try_get("price")?;
        Ok(Self {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            price: decode_price("price", &price)?,
            recorded_at: row.try_get("recorded_at")?,
        })
    }
}
