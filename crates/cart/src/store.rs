//! In-memory cart store.
//!
//! [`CartStore`] owns the line items for one session. Every method that
//! changes them advances [`revision`](CartStore::revision); methods that turn
//! out to be no-ops leave it alone so observers can skip work.
//!
//! Quantity arguments are signed and clamped rather than rejected:
//!
//! | Operation | Existing line | New line |
//! |-----------|---------------|----------|
//! | `add_item(p, q)` | `max(0, current + q)`, kept even at 0 | inserted with `max(1, q)` |
//! | `set_quantity(id, q)` | `q <= 0` removes, else set to `q` | no-op |

use rust_decimal::Decimal;
use tracing::debug;

use storefront_cart_core::{Product, ProductId};

use crate::item::CartLineItem;

/// Authoritative line-item collection for one cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    revision: u64,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line is adjusted by `quantity` (which may be negative) and
    /// floored at zero. A new line snapshots the product and starts at
    /// `max(1, quantity)`. Returns the line's resulting quantity.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            let next = clamp_quantity(i64::from(item.quantity).saturating_add(quantity));
            let changed = next != item.quantity;
            item.quantity = next;
            if changed {
                self.bump();
            }
            return next;
        }

        let initial = clamp_quantity(quantity.max(1));
        self.items.push(CartLineItem::from_product(product, initial));
        self.bump();
        debug!(product_id = %product.id, quantity = initial, "Inserted cart line");
        initial
    }

    /// Remove the line for `product_id`.
    ///
    /// Returns whether a line was removed; absent IDs are not an error.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.bump();
        }
        removed
    }

    /// Set the quantity of an existing line.
    ///
    /// `quantity <= 0` removes the line. IDs not in the cart are ignored;
    /// this never inserts.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let next = clamp_quantity(quantity);
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == product_id)
            && item.quantity != next
        {
            item.quantity = next;
            self.bump();
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.bump();
        }
    }

    /// Sum of price × quantity over all lines.
    ///
    /// Saturates at the bounds of `Decimal` instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == product_id)
    }

    /// Whether `product_id` has a line.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counter advanced by every committed change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace all lines with a loaded snapshot.
    ///
    /// Duplicate IDs are folded into the first occurrence by summing
    /// quantities, keeping one line per product.
    pub(crate) fn replace_items(&mut self, items: Vec<CartLineItem>) {
        let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
        for item in items {
            if let Some(existing) = merged.iter_mut().find(|line| line.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                merged.push(item);
            }
        }
        self.items = merged;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Clamp a signed quantity into the stored range.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}
