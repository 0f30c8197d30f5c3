use super::RetailerProfile;
use crate::stores::synthetic::{item, slug, Catalog};

const CATALOG: Catalog = &[
    ("milk", &[
        item("Aldi Fresh Milk 1L", 103, "1L"),
        item("Aldi Fresh Milk 2L", 175, "2L"),
        item("Aldi Organic Milk 1L", 159, "1L"),
        item("Aldi Skimmed Milk 1L", 103, "1L"),
        item("Aldi Whole Milk 500ml", 62, "500ml"),
        item("Aldi Lactose Free Milk 1L", 165, "1L"),
    ]),
    ("bread", &[
        item("Aldi White Bread", 90, "800g"),
        item("Aldi Wholemeal Bread", 109, "800g"),
    ]),
    ("eggs", &[item("Aldi Free Range Eggs 12pk", 289, "12 pack")]),
];

fn product_link(website: &str, product: &str) -> String {
    format!("{}/groceries/{}", website, slug(product))
}

pub const PROFILE: RetailerProfile = RetailerProfile {
    name: "Aldi",
    website: "https://www.aldi.ie",
    catalog: CATALOG,
    price_percent: 83,
    premium: false,
    product_link,
    image_path: "/content/products/placeholder.jpg",
};
