//! Demo catalog loaded at startup

use rust_decimal::Decimal;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product};
use crate::repository::InMemoryProductRepository;

fn demo_product(
    product_id: &str,
    name: &str,
    unit_price: Decimal,
    description: &str,
    manufacturer: &str,
    category: &str,
    units_in_stock: u64,
) -> Product {
    Product::new(NewProduct {
        product_id: product_id.to_string(),
        name: name.to_string(),
        unit_price,
        description: description.to_string(),
        manufacturer: manufacturer.to_string(),
        category: category.to_string(),
        units_in_stock,
        condition: "New".to_string(),
        language: "English".to_string(),
    })
}

/// The products the store starts with
pub fn demo_catalog() -> Vec<Product> {
    vec![
        demo_product(
            "P1234",
            "iPhone 5s",
            Decimal::new(500, 0),
            "Apple iPhone 5s smartphone with 4.00-inch 640x1136 display and 8-megapixel rear camera",
            "Apple",
            "Smart Phone",
            1000,
        ),
        demo_product(
            "P1235",
            "Dell Inspiron",
            Decimal::new(700, 0),
            "Dell Inspiron 14-inch Laptop (Black) with 3rd Generation Intel Core processors",
            "Dell",
            "Laptop",
            1000,
        )
        .with_order_state(25, false),
        demo_product(
            "P1236",
            "Nexus 7",
            Decimal::new(300, 0),
            "Google Nexus 7 is the lightest 7 inch tablet With a quad-core Qualcomm Snapdragon S4 Pro processor",
            "Google",
            "Tablet",
            1000,
        ),
    ]
}

/// Repository holding [`demo_catalog`]
pub fn seeded_repository() -> ProductResult<InMemoryProductRepository> {
    InMemoryProductRepository::with_products(demo_catalog())
}
