use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::generate_id;

/// A retailer whose catalog is collected on every pass.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub website: String,
    pub is_active: bool,
    pub scraper_enabled: bool,
    pub last_scraped: Option<DateTime<Utc>>,
}

impl Store {
    pub fn new(name: &str, website: &str) -> Self {
        Self {
            id: generate_id(),
            name: name.to_string(),
            website: website.to_string(),
            is_active: true,
            scraper_enabled: true,
            last_scraped: None,
        }
    }

    pub fn is_collectable(&self) -> bool {
        self.is_active && self.scraper_enabled
    }
}
