use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TermCategory {
    Dairy,
    Meat,
    Produce,
    Pantry,
    Beverages,
    Household,
}

impl std::fmt::Display for TermCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TermCategory::Dairy => "dairy",
            TermCategory::Meat => "meat",
            TermCategory::Produce => "produce",
            TermCategory::Pantry => "pantry",
            TermCategory::Beverages => "beverages",
            TermCategory::Household => "household",
        };
        f.write_str(label)
    }
}

/// Every term collected on each pass, in collection order.
pub const CATALOG_TERMS: &[(&str, TermCategory)] = &[
    ("milk", TermCategory::Dairy),
    ("bread", TermCategory::Dairy),
    ("eggs", TermCategory::Dairy),
    ("butter", TermCategory::Dairy),
    ("cheese", TermCategory::Dairy),
    ("yogurt", TermCategory::Dairy),
    ("chicken", TermCategory::Meat),
    ("beef", TermCategory::Meat),
    ("pork", TermCategory::Meat),
    ("fish", TermCategory::Meat),
    ("bacon", TermCategory::Meat),
    ("sausages", TermCategory::Meat),
    ("apples", TermCategory::Produce),
    ("bananas", TermCategory::Produce),
    ("oranges", TermCategory::Produce),
    ("grapes", TermCategory::Produce),
    ("strawberries", TermCategory::Produce),
    ("potatoes", TermCategory::Produce),
    ("onions", TermCategory::Produce),
    ("carrots", TermCategory::Produce),
    ("tomatoes", TermCategory::Produce),
    ("lettuce", TermCategory::Produce),
    ("pasta", TermCategory::Pantry),
    ("rice", TermCategory::Pantry),
    ("cereal", TermCategory::Pantry),
    ("flour", TermCategory::Pantry),
    ("sugar", TermCategory::Pantry),
    ("oil", TermCategory::Pantry),
    ("coffee", TermCategory::Beverages),
    ("tea", TermCategory::Beverages),
    ("juice", TermCategory::Beverages),
    ("water", TermCategory::Beverages),
    ("wine", TermCategory::Beverages),
    ("beer", TermCategory::Beverages),
    ("soap", TermCategory::Household),
    ("shampoo", TermCategory::Household),
    ("toothpaste", TermCategory::Household),
    ("detergent", TermCategory::Household),
    ("tissues", TermCategory::Household),
];

pub fn default_terms() -> Vec<String> {
    CATALOG_TERMS.iter().map(|(term, _)| term.to_string()).collect()
}

/// Category of a catalog term; `None` for ad-hoc terms.
pub fn category_for(term: &str) -> Option<TermCategory> {
    let term = term.trim().to_lowercase();
    CATALOG_TERMS
        .iter()
        .find(|(known, _)| *known == term)
        .map(|(_, category)| *category)
}
