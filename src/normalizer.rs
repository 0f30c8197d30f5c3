use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::stores::{RawListing, RawPrice};

/// A listing after normalization into the common catalog shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardListing {
    pub store: String,
    pub product_name: String,
    pub price: Decimal,
    pub unit: String,
    pub url: String,
    pub image: String,
}

pub struct ListingNormalizer {
    price_regex: Regex,
}

impl Default for ListingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingNormalizer {
    pub fn new() -> Self {
        ListingNormalizer {
            price_regex: Regex::new(r"\d+(?:\.\d+)?").expect("price pattern is valid"),
        }
    }

    pub fn standardize(&self, raw: &RawListing, store: &str) -> StandardListing {
        let price = match &raw.price {
            RawPrice::Amount(amount) => *amount,
            RawPrice::Text(text) => self.extract_price(text),
        };

        StandardListing {
            store: store.to_string(),
            product_name: raw.name.trim().to_string(),
            price,
            unit: raw.unit.trim().to_string(),
            url: raw.url.clone().unwrap_or_default(),
            image: raw.image.clone().unwrap_or_default(),
        }
    }

    /// First numeric token of `text` with thousands separators removed.
    /// Text without a parseable number yields zero rather than an error.
    pub fn extract_price(&self, text: &str) -> Decimal {
        let cleaned = text.replace(',', "");
        self.price_regex
            .find(&cleaned)
            .and_then(|m| Decimal::from_str(m.as_str()).ok())
            .unwrap_or(Decimal::ZERO)
    }
}
