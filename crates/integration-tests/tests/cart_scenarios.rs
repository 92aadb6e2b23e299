//! Integration tests for cart store operations.
//!
//! These drive a mounted session backed by memory storage and check the
//! derived totals after each sequence of operations.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use storefront_cart::{CartSession, MemoryStorage, NoopNotifier};
use storefront_cart_core::ProductId;
use storefront_cart_integration_tests::{catalog_product, product};

fn mounted() -> CartSession<MemoryStorage> {
    let mut session = CartSession::new(MemoryStorage::new(), "cart").with_notifier(NoopNotifier);
    session.mount();
    session
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_same_product_added_twice() {
    let mut cart = mounted();
    let p1 = product("p1", 10);

    cart.add_item(&p1, 2);
    cart.add_item(&p1, 3);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.store().get(&p1.id).unwrap().quantity, 5);
    assert_eq!(cart.total(), Decimal::from(50));
    assert_eq!(cart.item_count(), 5);
}

#[test]
fn test_set_quantity_zero_removes_line() {
    let mut cart = mounted();

    cart.add_item(&product("p1", 20), 1);
    cart.add_item(&product("p2", 5), 4);
    cart.set_quantity(&ProductId::new("p1"), 0);

    let ids: Vec<&str> = cart.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["p2"]);
    assert_eq!(cart.total(), Decimal::from(20));
    assert_eq!(cart.item_count(), 4);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_adds_sum_to_line_quantity() {
    let sequences: [&[i64]; 4] = [&[1], &[1, 1, 1], &[4, 2, 7], &[0, 3]];

    for quantities in sequences {
        let mut cart = mounted();
        let p = product("p", 3);
        for &quantity in quantities {
            cart.add_item(&p, quantity);
        }

        // The first add is clamped to at least one; later adds are added as-is.
        let (first, rest) = quantities.split_first().unwrap();
        let expected = (*first).max(1) + rest.iter().sum::<i64>();

        assert_eq!(cart.items().len(), 1, "sequence {quantities:?}");
        assert_eq!(
            i64::from(cart.store().get(&p.id).unwrap().quantity),
            expected,
            "sequence {quantities:?}"
        );
        assert_eq!(cart.total(), Decimal::from(expected * 3));
    }
}

#[test]
fn test_non_positive_set_quantity_removes() {
    for quantity in [0, -5] {
        let mut cart = mounted();
        cart.add_item(&product("p1", 7), 2);
        cart.add_item(&product("p2", 1), 1);

        cart.set_quantity(&ProductId::new("p1"), quantity);

        assert!(!cart.store().contains(&ProductId::new("p1")));
        assert_eq!(cart.total(), Decimal::from(1));
        assert_eq!(cart.item_count(), 1);
    }
}

#[test]
fn test_remove_absent_leaves_cart_unchanged() {
    let mut cart = mounted();
    cart.add_item(&product("p1", 7), 2);
    let before = cart.store().clone();
    let stored_before = cart.storage().raw("cart").map(str::to_string);

    assert!(!cart.remove_item(&ProductId::new("nope")));

    assert_eq!(cart.store(), &before);
    assert_eq!(cart.storage().raw("cart").map(str::to_string), stored_before);
}

#[test]
fn test_set_quantity_on_absent_product_does_not_insert() {
    let mut cart = mounted();
    cart.set_quantity(&ProductId::new("p1"), 4);
    assert!(cart.items().is_empty());
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn test_decrement_to_zero_keeps_line() {
    let mut cart = mounted();
    let p1 = product("p1", 10);

    cart.add_item(&p1, 1);
    cart.add_item(&p1, -3);

    assert_eq!(cart.store().get(&p1.id).unwrap().quantity, 0);
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.total(), Decimal::ZERO);

    cart.set_quantity(&p1.id, 0);
    assert!(cart.items().is_empty());
}

#[test]
fn test_catalog_changes_do_not_reach_cart() {
    let mut cart = mounted();
    let mut jacket = catalog_product("j1", "Field Jacket", 12_900);
    cart.add_item(&jacket, 1);

    jacket.price = Decimal::new(9_900, 2);
    jacket.name = "Field Jacket (Sale)".to_string();
    jacket.images.clear();

    let line = cart.store().get(&jacket.id).unwrap();
    assert_eq!(line.name, "Field Jacket");
    assert_eq!(line.price, Decimal::new(12_900, 2));
    assert_eq!(line.primary_image(), Some("https://cdn.example.com/j1.jpg"));
    assert_eq!(line.sizes, ["S", "M", "L"]);
}

#[test]
fn test_clear_resets_totals() {
    let mut cart = mounted();
    cart.add_item(&product("p1", 10), 2);
    cart.add_item(&product("p2", 4), 1);

    cart.clear();

    assert!(cart.items().is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
    assert_eq!(cart.item_count(), 0);
}
