use super::RetailerProfile;
use crate::stores::synthetic::{item, Catalog};

const CATALOG: Catalog = &[
    ("milk", &[
        item("SuperValu Fresh Milk 1L", 131, "1L"),
        item("SuperValu Fresh Milk 2L", 226, "2L"),
        item("SuperValu Organic Milk 1L", 195, "1L"),
        item("SuperValu Skimmed Milk 1L", 131, "1L"),
        item("SuperValu Whole Milk 500ml", 79, "500ml"),
        item("SuperValu Lactose Free Milk 1L", 205, "1L"),
    ]),
    ("bread", &[
        item("SuperValu White Bread", 115, "800g"),
        item("SuperValu Brown Bread", 135, "800g"),
    ]),
    ("eggs", &[item("SuperValu Free Range Eggs 12pk", 345, "12 pack")]),
    ("butter", &[item("SuperValu Irish Butter 500g", 299, "500g")]),
    ("chicken", &[item("SuperValu Chicken Breast 500g", 446, "500g")]),
    ("bananas", &[item("SuperValu Bananas 1kg", 156, "1kg")]),
    ("apples", &[item("SuperValu Apples 1kg", 240, "1kg")]),
    ("cheese", &[item("SuperValu Cheddar Cheese 200g", 263, "200g")]),
    ("yogurt", &[item("SuperValu Natural Yogurt 500g", 184, "500g")]),
    ("pasta", &[item("SuperValu Spaghetti 500g", 89, "500g")]),
    ("rice", &[item("SuperValu Basmati Rice 1kg", 226, "1kg")]),
    ("tomatoes", &[item("SuperValu Cherry Tomatoes 250g", 205, "250g")]),
    ("onions", &[item("SuperValu White Onions 1kg", 131, "1kg")]),
    ("potatoes", &[item("SuperValu Rooster Potatoes 2kg", 261, "2kg")]),
    ("carrots", &[item("SuperValu Carrots 1kg", 93, "1kg")]),
    ("beef", &[item("SuperValu Beef Mince 500g", 473, "500g")]),
    ("pork", &[item("SuperValu Pork Chops 500g", 394, "500g")]),
    ("fish", &[item("SuperValu Salmon Fillet 200g", 419, "200g")]),
    ("cereal", &[item("SuperValu Cornflakes 500g", 236, "500g")]),
    ("coffee", &[item("SuperValu Instant Coffee 200g", 473, "200g")]),
    ("tea", &[item("SuperValu Tea Bags 80pk", 289, "80 pack")]),
    ("sugar", &[item("SuperValu Granulated Sugar 1kg", 121, "1kg")]),
    ("flour", &[item("SuperValu Plain Flour 1.5kg", 142, "1.5kg")]),
    ("oil", &[item("SuperValu Sunflower Oil 1L", 198, "1L")]),
    ("orange", &[item("SuperValu Oranges 1kg", 209, "1kg")]),
    ("lemon", &[item("SuperValu Lemons 500g", 131, "500g")]),
    ("cucumber", &[item("SuperValu Cucumber Each", 79, "each")]),
    ("lettuce", &[item("SuperValu Iceberg Lettuce", 93, "each")]),
];

fn product_link(website: &str, _product: &str) -> String {
    format!("{}/groceries/", website)
}

pub const PROFILE: RetailerProfile = RetailerProfile {
    name: "SuperValu",
    website: "https://shop.supervalu.ie",
    catalog: CATALOG,
    price_percent: 105,
    premium: true,
    product_link,
    image_path: "/images/products/placeholder.jpg",
};
