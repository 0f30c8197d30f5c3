//! Built-in retailers backed by synthetic catalogs.
//!
//! Every retailer shares one adapter; they differ only in their catalog,
//! link conventions and how generated prices scale against the base.

pub mod aldi;
pub mod dunnes;
pub mod lidl;
pub mod supervalu;
pub mod tesco;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::stores::synthetic::{lookup, Catalog, SyntheticPricing};
use crate::stores::traits::{RawListing, RawPrice, StoreAdapter};

/// Builds a product link from the store website and the product name.
pub type LinkFormat = fn(website: &str, product: &str) -> String;

/// A retailer's fixed conventions.
#[derive(Debug, Clone, Copy)]
pub struct RetailerProfile {
    pub name: &'static str,
    pub website: &'static str,
    pub catalog: Catalog,
    /// Percentage of the shared base price charged for unknown terms.
    pub price_percent: i64,
    /// Whether unknown terms may also yield a premium variant.
    pub premium: bool,
    pub product_link: LinkFormat,
    /// Placeholder image path under the website.
    pub image_path: &'static str,
}

impl RetailerProfile {
    pub fn multiplier(&self) -> Decimal {
        Decimal::new(self.price_percent, 2)
    }
}

pub struct SyntheticRetailer {
    profile: RetailerProfile,
    delay: Duration,
    pricing: SyntheticPricing,
}

impl SyntheticRetailer {
    pub fn new(profile: RetailerProfile, pricing: SyntheticPricing) -> Self {
        Self {
            profile,
            delay: Duration::from_secs(2),
            pricing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn listing(&self, name: String, price: Decimal, unit: String) -> RawListing {
        let website = self.profile.website;
        RawListing {
            url: Some((self.profile.product_link)(website, &name)),
            image: Some(format!("{}{}", website, self.profile.image_path)),
            name,
            price: RawPrice::Amount(price),
            unit,
        }
    }

    fn mock_listings(&self, term: &str) -> Vec<RawListing> {
        match lookup(self.profile.catalog, term) {
            Some(items) => items
                .iter()
                .map(|i| self.listing(i.name.to_string(), i.price(), i.unit.to_string()))
                .collect(),
            None => self
                .pricing
                .generate(self.profile.name, term, self.profile.multiplier(), self.profile.premium)
                .into_iter()
                .map(|i| self.listing(i.name, i.price, i.unit))
                .collect(),
        }
    }
}

#[async_trait]
impl StoreAdapter for SyntheticRetailer {
    fn name(&self) -> &str {
        self.profile.name
    }

    fn website(&self) -> &str {
        self.profile.website
    }

    fn politeness_delay(&self) -> Duration {
        self.delay
    }

    async fn search(&self, term: &str) -> Vec<RawListing> {
        tracing::info!(store = self.profile.name, term = %term, "Searching");
        self.mock_listings(term)
    }
}
