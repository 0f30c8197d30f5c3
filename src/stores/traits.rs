use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Price as reported by a retailer: either already numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPrice {
    Amount(Decimal),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for RawPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WirePrice::deserialize(deserializer)? {
            // Go through the textual form so 1.19 stays 1.19
            WirePrice::Number(n) => {
                let text = n.to_string();
                match Decimal::from_str(&text) {
                    Ok(amount) => RawPrice::Amount(amount),
                    Err(_) => RawPrice::Text(text),
                }
            }
            WirePrice::Text(text) => RawPrice::Text(text),
        })
    }
}

/// One retailer's raw data for one product, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub name: String,
    pub price: RawPrice,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A retailer source of listings.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    fn name(&self) -> &str;
    fn website(&self) -> &str;

    /// Pause before every outbound request to this retailer.
    fn politeness_delay(&self) -> Duration;

    /// Never fails: an empty list means either nothing matched or the
    /// retailer could not be reached this cycle.
    async fn search(&self, term: &str) -> Vec<RawListing>;
}
