//! Sample catalog loaded at startup for local development.

use rust_decimal_macros::dec;
use tracing::info;

use super::{Category, Product, Specifications};
use crate::customer::{Customer, Role};
use crate::model::{ModelError, ModelStore, ModelsExt};

fn specs(compatibility: &str, color: &str, material: &str, warranty: &str) -> Specifications {
    Specifications {
        compatibility: Some(compatibility.into()),
        color: Some(color.into()),
        material: Some(material.into()),
        warranty: Some(warranty.into()),
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(
            "iphone-14-pro-silicone-case",
            "iPhone 14 Pro Silicone Case",
            dec!(2499),
            Category::Cases,
            "Apple",
        )
        .with_description("Premium silicone case designed specifically for iPhone 14 Pro.")
        .with_image("https://images.unsplash.com/photo-1574406582317-a080ec1e8fb5?w=300")
        .with_stock(50)
        .with_specifications(specs("iPhone 14 Pro", "Midnight Blue", "Silicone", "1 Year"))
        .featured(),
        Product::new(
            "samsung-25w-fast-charger",
            "Samsung 25W Fast Charger",
            dec!(1899),
            Category::Chargers,
            "Samsung",
        )
        .with_description("Official Samsung 25W Super Fast Charging adapter.")
        .with_image("https://images.unsplash.com/photo-1583863788434-e58a36330cf0?w=300")
        .with_stock(75)
        .with_specifications(specs("Samsung Galaxy Series", "White", "Plastic", "2 Years"))
        .featured(),
        Product::new(
            "sony-wh-1000xm4",
            "Sony WH-1000XM4 Wireless Headphones",
            dec!(24990),
            Category::Headphones,
            "Sony",
        )
        .with_description("Industry-leading noise cancellation. 30-hour battery life.")
        .with_image("https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=300")
        .with_stock(25)
        .with_specifications(specs("Universal", "Black", "Premium Plastic", "1 Year"))
        .featured(),
        Product::new(
            "anker-powercore-10000",
            "Anker PowerCore 10000mAh Power Bank",
            dec!(3499),
            Category::PowerBanks,
            "Anker",
        )
        .with_description("Compact high-capacity power bank with fast charging.")
        .with_image("https://images.unsplash.com/photo-1609592424157-2b0566e50a91?w=300")
        .with_stock(100)
        .with_specifications(specs("Universal", "Black", "Aluminum", "18 Months")),
        Product::new(
            "usb-c-to-lightning-cable",
            "USB-C to Lightning Cable",
            dec!(899),
            Category::Cables,
            "Belkin",
        )
        .with_description("1-meter USB-C to Lightning cable for fast charging and data transfer.")
        .with_image("https://images.unsplash.com/photo-1594736797933-d0a3ba4dbecf?w=300")
        .with_stock(200)
        .with_specifications(specs("iPhone, iPad", "White", "Braided Nylon", "2 Years")),
        Product::new(
            "tempered-glass-screen-protector",
            "Tempered Glass Screen Protector",
            dec!(599),
            Category::ScreenProtectors,
            "Nillkin",
        )
        .with_description("9H hardness tempered glass with oleophobic coating.")
        .with_image("https://images.unsplash.com/photo-1512499617640-c74ae3a79d37?w=300")
        .with_stock(150)
        .with_specifications(specs("iPhone 14 Series", "Transparent", "Tempered Glass", "6 Months")),
        Product::new(
            "jbl-charge-5",
            "JBL Charge 5 Portable Speaker",
            dec!(12999),
            Category::Speakers,
            "JBL",
        )
        .with_description("Portable Bluetooth speaker, IP67 waterproof, 20-hour playtime.")
        .with_image("https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=300")
        .with_stock(30)
        .with_specifications(specs("Bluetooth Devices", "Blue", "Fabric & Rubber", "1 Year"))
        .featured(),
        Product::new(
            "oneplus-warp-charge-65w",
            "OnePlus Warp Charge 65W",
            dec!(2799),
            Category::Chargers,
            "OnePlus",
        )
        .with_description("SuperVOOC fast charging adapter with 65W power delivery.")
        .with_image("https://images.unsplash.com/photo-1583863788434-e58a36330cf0?w=300")
        .with_stock(60)
        .with_specifications(specs("OnePlus Devices", "Red", "Plastic", "1 Year")),
    ]
}

pub fn sample_admin() -> Customer {
    Customer::new("admin", "Admin", "User", "admin@mobileaccessories.com").with_role(Role::Admin)
}

/// Write the sample catalog and admin customer, replacing any documents
/// with the same ids.
pub fn seed<S: ModelStore>(store: &S) -> Result<usize, ModelError> {
    let products = sample_products();
    let count = products.len();
    products
        .iter()
        .fold(store.batch(), |batch, product| batch.save(product))
        .save(&sample_admin())
        .commit()?;
    info!(products = count, "seeded sample catalog");
    Ok(count)
}
