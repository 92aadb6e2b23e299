//! Cart display model.
//!
//! Formatted, template-ready data for the cart page and the header badge.
//! Built from a [`CartStore`] on demand; nothing here is stored.

use serde::Serialize;

use storefront_cart_core::{CurrencyCode, Price};

use crate::item::CartLineItem;
use crate::store::CartStore;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<ImageView>,
}

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub url: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::from_cents(0, currency).to_string(),
            item_count: 0,
        }
    }

    /// Build the display model for `store`.
    #[must_use]
    pub fn from_store(store: &CartStore, currency: CurrencyCode) -> Self {
        Self {
            items: store
                .items()
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            subtotal: Price::new(store.total(), currency).to_string(),
            item_count: store.item_count(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn new(item: &CartLineItem, currency: CurrencyCode) -> Self {
        let price = item.unit_price(currency);
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            price: price.to_string(),
            line_price: price.times(item.quantity).to_string(),
            image: item.primary_image().map(|url| ImageView {
                url: url.to_string(),
            }),
        }
    }
}
