use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub mod price_history;
pub mod product;
pub mod store;

// Re-exports for convenience
pub use price_history::*;
pub use product::*;
pub use store::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increased,
    Decreased,
    Unchanged,
}

impl ChangeType {
    pub fn between(old: Decimal, new: Decimal) -> Self {
        if new > old {
            ChangeType::Increased
        } else if new < old {
            ChangeType::Decreased
        } else {
            ChangeType::Unchanged
        }
    }
}

// Helper function to generate UUIDs in the format expected by the database
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Prices are persisted as decimal text so no precision is lost in SQLite.
pub(crate) fn decode_price(column: &str, raw: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
