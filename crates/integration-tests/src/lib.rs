//! Integration tests for the storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Store operations driven through a mounted session
//! - `cart_persistence` - Hydration, corruption recovery, and reopening
//!   sessions over memory and file storage
//!
//! This library holds the catalog fixtures the test files share.

use rust_decimal::Decimal;
use storefront_cart_core::Product;

/// A product with only an ID and a whole-unit price.
#[must_use]
pub fn product(id: &str, price: i64) -> Product {
    Product::new(id, format!("Product {id}"), Decimal::from(price))
}

/// A fully populated catalog product.
#[must_use]
pub fn catalog_product(id: &str, name: &str, cents: i64) -> Product {
    let mut product = Product::new(id, name, Decimal::new(cents, 2));
    product.images = vec![format!("https://cdn.example.com/{id}.jpg")];
    product.category = "apparel".to_string();
    product.sizes = vec!["S".to_string(), "M".to_string(), "L".to_string()];
    product.colors = vec!["black".to_string()];
    product.description = Some(format!("{name} description"));
    product
}
