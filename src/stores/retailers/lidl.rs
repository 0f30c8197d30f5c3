use super::RetailerProfile;
use crate::stores::synthetic::{item, slug, Catalog};

const CATALOG: Catalog = &[
    ("milk", &[
        item("Lidl Fresh Milk 1L", 107, "1L"),
        item("Lidl Fresh Milk 2L", 182, "2L"),
        item("Lidl Organic Milk 1L", 165, "1L"),
        item("Lidl Skimmed Milk 1L", 107, "1L"),
        item("Lidl Whole Milk 500ml", 64, "500ml"),
        item("Lidl Lactose Free Milk 1L", 171, "1L"),
    ]),
    ("bread", &[
        item("Lidl White Bread", 94, "800g"),
        item("Lidl Wholemeal Bread", 115, "800g"),
    ]),
    ("eggs", &[item("Lidl Free Range Eggs 12pk", 295, "12 pack")]),
];

fn product_link(website: &str, product: &str) -> String {
    format!("{}/products/{}", website, slug(product))
}

pub const PROFILE: RetailerProfile = RetailerProfile {
    name: "Lidl",
    website: "https://www.lidl.ie",
    catalog: CATALOG,
    price_percent: 87,
    premium: false,
    product_link,
    image_path: "/media/products/placeholder.jpg",
};
