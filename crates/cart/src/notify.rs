//! User-visible cart notifications.
//!
//! The storefront shows a confirmation when something lands in the cart.
//! [`CartSession`](crate::CartSession) calls a [`CartNotifier`] after each
//! addition; how it is surfaced is up to the implementation.

use tracing::info;

use crate::item::CartLineItem;

/// Receives cart events worth telling the user about.
pub trait CartNotifier {
    /// `added` units of `item` were put in the cart.
    ///
    /// `item` reflects the line after the addition.
    fn item_added(&mut self, item: &CartLineItem, added: u32);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl CartNotifier for LogNotifier {
    fn item_added(&mut self, item: &CartLineItem, added: u32) {
        info!(
            product_id = %item.id,
            added,
            quantity = item.quantity,
            "Added {} to cart",
            item.name
        );
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CartNotifier for NoopNotifier {
    fn item_added(&mut self, _item: &CartLineItem, _added: u32) {}
}
