//! Cart line items.
//!
//! A line item is a snapshot of a [`Product`] taken when it was first added,
//! plus a quantity. Later catalog changes do not reach items already in the
//! cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storefront_cart_core::{CurrencyCode, Price, Product, ProductId};

/// One product entry in the cart.
///
/// Serialized field names match the stored snapshot layout (camelCase, with
/// `id`, `price` and `quantity` always present). Empty display fields are
/// omitted. Fields the cart does not know about are kept in
/// [`extra`](Self::extra) and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    /// Product name at add time.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Unit price at add time, written as a JSON number.
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    /// Image URLs at add time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Stock flag at add time.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Category name at add time.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Size options at add time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    /// Color options at add time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Description at add time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of units.
    pub quantity: u32,
    /// Display fields written by other clients of the same storage entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_in_stock() -> bool {
    true
}

impl CartLineItem {
    /// Snapshot a product into a new line item.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            images: product.images.clone(),
            in_stock: product.in_stock,
            category: product.category.clone(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            description: product.description.clone(),
            quantity,
            extra: Map::new(),
        }
    }

    /// Price × quantity, saturating at the bounds of `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Price × quantity, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Unit price in the given currency.
    #[must_use]
    pub const fn unit_price(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }

    /// Primary image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
