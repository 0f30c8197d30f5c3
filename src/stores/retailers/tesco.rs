use super::RetailerProfile;
use crate::stores::synthetic::{item, Catalog};

const CATALOG: Catalog = &[
    ("milk", &[
        item("Tesco Fresh Milk 1L", 125, "1L"),
        item("Tesco Fresh Milk 2L", 215, "2L"),
        item("Tesco Organic Milk 1L", 185, "1L"),
        item("Tesco Skimmed Milk 1L", 125, "1L"),
        item("Tesco Whole Milk 500ml", 75, "500ml"),
        item("Tesco Lactose Free Milk 1L", 195, "1L"),
    ]),
    ("bread", &[
        item("Tesco White Sliced Pan", 110, "800g"),
        item("Tesco Wholemeal Bread", 145, "800g"),
    ]),
    ("eggs", &[
        item("Tesco Free Range Eggs 12pk", 325, "12 pack"),
        item("Tesco Large Eggs 6pk", 185, "6 pack"),
    ]),
    ("butter", &[item("Tesco Irish Butter 500g", 285, "500g")]),
    ("chicken", &[item("Tesco Chicken Breast 500g", 425, "500g")]),
    ("bananas", &[item("Tesco Bananas 1kg", 149, "1kg")]),
    ("apples", &[item("Tesco Apples 1kg", 229, "1kg")]),
    ("cheese", &[item("Tesco Cheddar Cheese 200g", 250, "200g")]),
    ("yogurt", &[item("Tesco Natural Yogurt 500g", 175, "500g")]),
    ("pasta", &[item("Tesco Spaghetti 500g", 85, "500g")]),
    ("rice", &[item("Tesco Basmati Rice 1kg", 215, "1kg")]),
    ("tomatoes", &[item("Tesco Cherry Tomatoes 250g", 195, "250g")]),
    ("onions", &[item("Tesco White Onions 1kg", 125, "1kg")]),
    ("potatoes", &[item("Tesco Rooster Potatoes 2kg", 249, "2kg")]),
    ("carrots", &[item("Tesco Carrots 1kg", 89, "1kg")]),
    ("beef", &[item("Tesco Beef Mince 500g", 450, "500g")]),
    ("pork", &[item("Tesco Pork Chops 500g", 375, "500g")]),
    ("fish", &[item("Tesco Salmon Fillet 200g", 399, "200g")]),
    ("cereal", &[item("Tesco Cornflakes 500g", 225, "500g")]),
    ("coffee", &[item("Tesco Instant Coffee 200g", 450, "200g")]),
    ("tea", &[item("Tesco Tea Bags 80pk", 275, "80 pack")]),
    ("sugar", &[item("Tesco Granulated Sugar 1kg", 115, "1kg")]),
    ("flour", &[item("Tesco Plain Flour 1.5kg", 135, "1.5kg")]),
    ("oil", &[item("Tesco Sunflower Oil 1L", 189, "1L")]),
    ("orange", &[item("Tesco Oranges 1kg", 199, "1kg")]),
    ("lemon", &[item("Tesco Lemons 500g", 125, "500g")]),
    ("cucumber", &[item("Tesco Cucumber Each", 75, "each")]),
    ("lettuce", &[item("Tesco Iceberg Lettuce", 89, "each")]),
];

fn product_link(website: &str, _product: &str) -> String {
    format!("{}/groceries/", website)
}

pub const PROFILE: RetailerProfile = RetailerProfile {
    name: "Tesco",
    website: "https://www.tesco.ie",
    catalog: CATALOG,
    price_percent: 100,
    premium: true,
    product_link,
    image_path: "/assets/images/products/placeholder.jpg",
};
