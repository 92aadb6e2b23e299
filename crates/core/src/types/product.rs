//! Catalog product record.
//!
//! Products arrive from the storefront REST API. The cart copies their
//! display fields at add time, so nothing here is referenced after the copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the storefront currency.
    pub price: Decimal,
    /// Image URLs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Whether the product can currently be purchased.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Available size options.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available color options.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Plain text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with only the fields the cart needs.
    ///
    /// Remaining display fields start empty and can be filled in directly.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            images: Vec::new(),
            in_stock: true,
            category: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            description: None,
        }
    }

    /// Primary image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "id": "p1",
            "name": "Linen Shirt",
            "price": 49.5,
            "images": ["https://cdn.example.com/p1-front.jpg", "https://cdn.example.com/p1-back.jpg"],
            "inStock": false,
            "category": "shirts",
            "sizes": ["S", "M", "L"],
            "colors": ["sand"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Decimal::new(495, 1));
        assert!(!product.in_stock);
        assert_eq!(product.sizes.len(), 3);
        assert_eq!(
            product.primary_image(),
            Some("https://cdn.example.com/p1-front.jpg")
        );
        assert!(product.description.is_none());
    }

    #[test]
    fn test_deserialize_minimal_payload_uses_defaults() {
        let product: Product =
            serde_json::from_str(r#"{"id": "p2", "name": "Cap", "price": "12.00"}"#).unwrap();
        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert!(product.primary_image().is_none());
        assert_eq!(product.category, "");
    }
}
