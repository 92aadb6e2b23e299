//! Cart session: the object consumers hold.
//!
//! A session is constructed once when the storefront starts and handed to
//! the listing, detail, and cart views. It owns the store, the persistence
//! adapter, and the notifier, and runs the persistence effect after every
//! mutation so individual operations never ask for a save.

use std::fmt;

use rust_decimal::Decimal;
use tracing::instrument;

use storefront_cart_core::{CurrencyCode, Product, ProductId};

use crate::config::CartConfig;
use crate::item::CartLineItem;
use crate::notify::{CartNotifier, LogNotifier};
use crate::persistence::CartPersistence;
use crate::storage::CartStorage;
use crate::store::CartStore;
use crate::view::CartView;

/// Shopping cart for one browser session.
pub struct CartSession<S> {
    store: CartStore,
    persistence: CartPersistence<S>,
    notifier: Box<dyn CartNotifier>,
}

impl<S> fmt::Debug for CartSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartSession")
            .field("store", &self.store)
            .field("has_mounted", &self.persistence.has_mounted())
            .field("key", &self.persistence.key())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartSession<S> {
    /// Create an empty, unmounted session persisting under `key`.
    ///
    /// Additions are announced through [`LogNotifier`] until
    /// [`with_notifier`](Self::with_notifier) replaces it.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            store: CartStore::new(),
            persistence: CartPersistence::new(storage, key),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Create a session using the configured storage key.
    pub fn from_config(storage: S, config: &CartConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    /// Replace the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl CartNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Signal that storage is safe to use.
    ///
    /// The first call loads the stored cart and starts persisting; later
    /// calls do nothing. Returns whether this call mounted.
    pub fn mount(&mut self) -> bool {
        self.persistence.mount(&mut self.store)
    }

    /// Whether [`mount`](Self::mount) has run.
    #[must_use]
    pub const fn has_mounted(&self) -> bool {
        self.persistence.has_mounted()
    }

    /// Add `quantity` units of `product` (see [`CartStore::add_item`]).
    ///
    /// Returns the line's resulting quantity.
    #[instrument(skip_all, fields(product_id = %product.id, quantity = quantity))]
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> u32 {
        let before = self.store.get(&product.id).map_or(0, |item| item.quantity);
        let after = self.store.add_item(product, quantity);
        self.commit();

        if after > before
            && let Some(item) = self.store.get(&product.id)
        {
            self.notifier.item_added(item, after - before);
        }
        after
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) -> u32 {
        self.add_item(product, 1)
    }

    /// Remove the line for `product_id`; absent IDs are ignored.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.store.remove_item(product_id);
        self.commit();
        removed
    }

    /// Set a line's quantity; `quantity <= 0` removes it.
    #[instrument(skip_all, fields(product_id = %product_id, quantity = quantity))]
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.store.set_quantity(product_id, quantity);
        self.commit();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.store.clear();
        self.commit();
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.store.items()
    }

    /// Sum of price × quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.store.total()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.store.item_count()
    }

    /// Display model for the cart page.
    #[must_use]
    pub fn view(&self, currency: CurrencyCode) -> CartView {
        CartView::from_store(&self.store, currency)
    }

    /// Storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// End the session, handing back its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    fn commit(&mut self) {
        self.persistence.sync(&self.store);
    }
}
