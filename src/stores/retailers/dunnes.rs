use super::RetailerProfile;
use crate::stores::synthetic::{item, Catalog};

const CATALOG: Catalog = &[
    ("milk", &[
        item("Dunnes Fresh Milk 1L", 119, "1L"),
        item("Dunnes Fresh Milk 2L", 204, "2L"),
        item("Dunnes Organic Milk 1L", 179, "1L"),
        item("Dunnes Skimmed Milk 1L", 119, "1L"),
        item("Dunnes Whole Milk 500ml", 71, "500ml"),
        item("Dunnes Lactose Free Milk 1L", 185, "1L"),
    ]),
    ("bread", &[
        item("Dunnes White Sliced Pan", 105, "800g"),
        item("Dunnes Wholemeal Bread", 125, "800g"),
    ]),
    ("eggs", &[item("Dunnes Free Range Eggs 12pk", 315, "12 pack")]),
];

/// Product links go to the separate grocery delivery site.
fn product_link(_website: &str, product: &str) -> String {
    format!(
        "https://www.dunnesstoresgrocery.com/sm/delivery/rsid/258/results?q={}",
        product.replace(' ', "+")
    )
}

pub const PROFILE: RetailerProfile = RetailerProfile {
    name: "Dunnes",
    website: "https://www.dunnesstores.com",
    catalog: CATALOG,
    price_percent: 95,
    premium: false,
    product_link,
    image_path: "/assets/products/placeholder.jpg",
};
