//! Deterministic stand-in catalogs for retailers without a live integration.
//!
//! Known terms resolve to a fixed table of listings per retailer. Any other
//! term gets generated listings whose base price depends only on the term and
//! the seed, so every retailer scales the same base and relative ordering
//! across retailers is preserved.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticMode {
    #[default]
    Seeded,
    Random,
}

/// A fixed catalog row: price is stored in cents.
#[derive(Debug, Clone, Copy)]
pub struct CatalogItem {
    pub name: &'static str,
    pub cents: i64,
    pub unit: &'static str,
}

pub const fn item(name: &'static str, cents: i64, unit: &'static str) -> CatalogItem {
    CatalogItem { name, cents, unit }
}

impl CatalogItem {
    pub fn price(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }
}

pub type Catalog = &'static [(&'static str, &'static [CatalogItem])];

/// Case-insensitive lookup of a known term.
pub fn lookup(catalog: Catalog, term: &str) -> Option<&'static [CatalogItem]> {
    let term = term.trim().to_lowercase();
    catalog
        .iter()
        .find(|(known, _)| *known == term)
        .map(|(_, items)| *items)
}

/// A generated listing before the retailer applies its URL conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticItem {
    pub name: String,
    pub price: Decimal,
    pub unit: String,
}

#[derive(Debug, Clone)]
pub struct SyntheticPricing {
    mode: SyntheticMode,
    seed: u64,
}

impl Default for SyntheticPricing {
    fn default() -> Self {
        Self::seeded(42)
    }
}

impl SyntheticPricing {
    pub fn new(mode: SyntheticMode, seed: u64) -> Self {
        Self { mode, seed }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SyntheticMode::Seeded, seed)
    }

    pub fn random() -> Self {
        Self::new(SyntheticMode::Random, 0)
    }

    pub fn mode(&self) -> SyntheticMode {
        self.mode
    }

    /// Base price in [1.00, 5.00) for a term.
    pub fn base_price(&self, term: &str) -> Decimal {
        let cents: i64 = self.rng_for(term, "base").gen_range(100..500);
        Decimal::new(cents, 2)
    }

    /// Generated listings for an unknown term: a standard item and, when
    /// `with_premium`, possibly a premium variant at 1.3x.
    pub fn generate(&self, retailer: &str, term: &str, multiplier: Decimal, with_premium: bool) -> Vec<SyntheticItem> {
        let title = title_case(term);
        let base = (self.base_price(term) * multiplier).round_dp(2);

        let mut items = vec![SyntheticItem {
            name: format!("{} {}", retailer, title),
            price: base,
            unit: "each".to_string(),
        }];

        if with_premium && self.rng_for(term, retailer).gen_bool(0.5) {
            items.push(SyntheticItem {
                name: format!("{} Premium {}", retailer, title),
                price: (base * Decimal::new(13, 1)).round_dp(2),
                unit: "each".to_string(),
            });
        }

        items
    }

    fn rng_for(&self, term: &str, salt: &str) -> StdRng {
        match self.mode {
            SyntheticMode::Seeded => {
                let key = self.seed ^ fnv1a(term.trim().to_lowercase().as_bytes()) ^ fnv1a(salt.as_bytes()).rotate_left(17);
                StdRng::seed_from_u64(key)
            }
            SyntheticMode::Random => StdRng::from_entropy(),
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x100000001b3)
    })
}

pub fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lower-cased name with spaces replaced by dashes.
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
