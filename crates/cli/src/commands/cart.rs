//! Cart commands.
//!
//! Each function takes an already mounted session, so every mutation here
//! is persisted by the session itself.

use std::fmt::Write as _;

use tracing::info;

use storefront_cart::{CartSession, CartStorage, CartView};
use storefront_cart_core::{CurrencyCode, Product, ProductId};

/// Add `quantity` units of `product`.
pub fn add<S: CartStorage>(session: &mut CartSession<S>, product: &Product, quantity: i64) {
    let line_quantity = session.add_item(product, quantity);
    info!(
        product_id = %product.id,
        quantity = line_quantity,
        item_count = session.item_count(),
        "Cart updated"
    );
}

/// Set the quantity of a line.
pub fn set<S: CartStorage>(session: &mut CartSession<S>, product_id: &ProductId, quantity: i64) {
    if !session.store().contains(product_id) {
        info!(product_id = %product_id, "Product not in cart, nothing to update");
        return;
    }
    session.set_quantity(product_id, quantity);
    info!(
        product_id = %product_id,
        item_count = session.item_count(),
        "Cart updated"
    );
}

/// Remove a line.
pub fn remove<S: CartStorage>(session: &mut CartSession<S>, product_id: &ProductId) {
    if session.remove_item(product_id) {
        info!(product_id = %product_id, "Removed from cart");
    } else {
        info!(product_id = %product_id, "Product not in cart, nothing to remove");
    }
}

/// Remove every line.
pub fn clear<S: CartStorage>(session: &mut CartSession<S>) {
    let lines = session.store().len();
    session.clear();
    info!(lines, "Cart cleared");
}

/// Print the cart to stdout.
///
/// # Errors
///
/// Returns an error if the view cannot be serialized as JSON.
#[allow(clippy::print_stdout)]
pub fn show<S: CartStorage>(
    session: &CartSession<S>,
    currency: CurrencyCode,
    json: bool,
) -> Result<(), serde_json::Error> {
    let view = session.view(currency);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }
    Ok(())
}

/// Render a cart view as plain text.
fn render(view: &CartView) -> String {
    if view.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(
            out,
            "{:<12} {:<28} {:>4} x {:>10} = {:>10}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    let _ = writeln!(out, "Items: {}", view.item_count);
    let _ = writeln!(out, "Subtotal: {}", view.subtotal);
    out
}
