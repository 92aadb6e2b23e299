//! Mirrors a [`CartStore`] into durable storage.
//!
//! # Mount gate
//!
//! Nothing is read or written until [`CartPersistence::mount`] runs. Before
//! that the cart renders from its deterministic empty state, which is what a
//! server-rendered page also shows; reading storage earlier would make the
//! first client render disagree with it.
//!
//! # Snapshot format
//!
//! A JSON array of line items under a single key. A value that is not JSON,
//! not an array, or holds something other than line items is deleted at
//! mount and the cart carries on as if nothing was stored.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{HydrationError, PersistError};
use crate::item::CartLineItem;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Decode a stored snapshot into line items.
///
/// # Errors
///
/// Returns `HydrationError` if `raw` is not JSON, not an array, contains
/// an element that is not a line item, or its line totals do not fit in a
/// `Decimal`.
pub fn decode_snapshot(raw: &str) -> Result<Vec<CartLineItem>, HydrationError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(HydrationError::Parse)?;

    let serde_json::Value::Array(elements) = value else {
        return Err(HydrationError::NotASequence(json_kind(&value)));
    };

    let items: Vec<CartLineItem> = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|source| HydrationError::InvalidItem { index, source })
        })
        .collect::<Result<_, _>>()?;

    let mut total = Decimal::ZERO;
    for (index, item) in items.iter().enumerate() {
        total = item
            .checked_line_total()
            .and_then(|line| total.checked_add(line))
            .ok_or(HydrationError::TotalOverflow { index })?;
    }

    Ok(items)
}

/// Encode line items as a snapshot.
///
/// # Errors
///
/// Returns `serde_json::Error` if an item's extra fields cannot be
/// serialized.
pub fn encode_snapshot(items: &[CartLineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Persistence adapter between a cart store and a storage backend.
///
/// The adapter never changes the store except once, at mount, when it seeds
/// it from storage. After that it only observes: [`sync`](Self::sync) writes
/// the store whenever its revision has moved since the last write.
#[derive(Debug)]
pub struct CartPersistence<S> {
    storage: S,
    key: String,
    has_mounted: bool,
    persisted_revision: Option<u64>,
}

impl<S> CartPersistence<S> {
    /// Create an unmounted adapter writing under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            has_mounted: false,
            persisted_revision: None,
        }
    }

    /// Whether storage may be touched yet.
    #[must_use]
    pub const fn has_mounted(&self) -> bool {
        self.has_mounted
    }

    /// Storage key for the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable storage backend.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the adapter, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: CartStorage> CartPersistence<S> {
    /// Open the mount gate, hydrate `store`, and write its state back.
    ///
    /// Only the first call does anything; returns whether this call mounted.
    #[instrument(skip(self, store), fields(key = %self.key))]
    pub fn mount(&mut self, store: &mut CartStore) -> bool {
        if self.has_mounted {
            debug!("Cart already mounted");
            return false;
        }
        self.has_mounted = true;

        self.hydrate(store);
        self.sync(store);
        true
    }

    /// Write `store` if mounted and changed since the last write.
    ///
    /// Failures are logged and retried on the next call.
    pub fn sync(&mut self, store: &CartStore) {
        if !self.has_mounted || self.persisted_revision == Some(store.revision()) {
            return;
        }

        match self.write(store.items()) {
            Ok(()) => {
                self.persisted_revision = Some(store.revision());
                debug!(
                    key = %self.key,
                    revision = store.revision(),
                    lines = store.len(),
                    "Cart persisted"
                );
            }
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist cart"),
        }
    }

    fn hydrate(&mut self, store: &mut CartStore) {
        match self.read() {
            Ok(Some(items)) => {
                info!(lines = items.len(), "Restored cart from storage");
                store.replace_items(items);
            }
            Ok(None) => debug!("No stored cart"),
            Err(e) => {
                warn!(error = %e, "Ignoring stored cart");
                if e.is_corrupt_entry()
                    && let Err(remove_err) = self.storage.remove(&self.key)
                {
                    warn!(error = %remove_err, "Failed to remove corrupt cart entry");
                }
            }
        }
    }

    fn read(&self) -> Result<Option<Vec<CartLineItem>>, HydrationError> {
        self.storage
            .get(&self.key)?
            .map(|raw| decode_snapshot(&raw))
            .transpose()
    }

    fn write(&mut self, items: &[CartLineItem]) -> Result<(), PersistError> {
        let raw = encode_snapshot(items)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storefront_cart_core::{Product, ProductId};

    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    const KEY: &str = "cart";

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {id}"), Decimal::from(price))
    }

    /// Storage whose reads or writes always fail.
    #[derive(Debug, Default)]
    struct BrokenStorage {
        fail_reads: bool,
        removed: bool,
    }

    impl CartStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                Err(StorageError::Unavailable("disabled".to_string()))
            } else {
                Ok(Some("{not json".to_string()))
            }
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            self.removed = true;
            Ok(())
        }
    }

    #[test]
    fn test_decode_rejects_non_sequences() {
        assert!(matches!(
            decode_snapshot("{not json"),
            Err(HydrationError::Parse(_))
        ));
        assert!(matches!(
            decode_snapshot("{}"),
            Err(HydrationError::NotASequence("object"))
        ));
        assert!(matches!(
            decode_snapshot("null"),
            Err(HydrationError::NotASequence("null"))
        ));
        assert!(matches!(
            decode_snapshot(r#"[{"id":"p1","quantity":1}, 7]"#),
            Err(HydrationError::InvalidItem { index: 1, .. })
        ));
        assert!(decode_snapshot("[]").unwrap().is_empty());
    }

    #[test]
    fn test_no_storage_access_before_mount() {
        let mut persistence = CartPersistence::new(MemoryStorage::new(), KEY);
        let mut store = CartStore::new();
        store.add_item(&product("p1", 10), 1);

        persistence.sync(&store);

        assert!(!persistence.has_mounted());
        assert!(persistence.storage().is_empty());
    }

    #[test]
    fn test_mount_writes_current_state_when_nothing_stored() {
        let mut persistence = CartPersistence::new(MemoryStorage::new(), KEY);
        let mut store = CartStore::new();
        store.add_item(&product("p1", 10), 2);

        assert!(persistence.mount(&mut store));

        assert_eq!(store.item_count(), 2);
        let stored = decode_snapshot(persistence.storage().raw(KEY).unwrap()).unwrap();
        assert_eq!(stored, store.items());
    }

    #[test]
    fn test_mount_replaces_state_with_snapshot() {
        let raw = r#"[{"id":"p1","name":"Shirt","price":10,"quantity":3}]"#;
        let mut persistence = CartPersistence::new(MemoryStorage::with_entry(KEY, raw), KEY);
        let mut store = CartStore::new();
        store.add_item(&product("early", 1), 1);

        persistence.mount(&mut store);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&ProductId::new("p1")).unwrap().quantity, 3);
        assert_eq!(store.total(), Decimal::from(30));
    }

    #[test]
    fn test_mount_only_once() {
        let mut persistence = CartPersistence::new(MemoryStorage::new(), KEY);
        let mut store = CartStore::new();
        assert!(persistence.mount(&mut store));

        persistence
            .storage_mut()
            .set(KEY, r#"[{"id":"late","quantity":9}]"#)
            .unwrap();
        assert!(!persistence.mount(&mut store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_entries_are_removed() {
        for raw in ["{not json", "{}", "null", r#"[{"quantity":1}]"#] {
            let mut persistence = CartPersistence::new(MemoryStorage::with_entry(KEY, raw), KEY);
            let mut store = CartStore::new();

            persistence.mount(&mut store);

            assert!(store.is_empty(), "input {raw:?}");
            // The empty cart is written back over the removed entry.
            assert_eq!(persistence.storage().raw(KEY), Some("[]"), "input {raw:?}");
        }
    }

    #[test]
    fn test_decode_rejects_overflowing_totals() {
        let line = r#"[{"id":"a","price":50000000000000000000000000000,"quantity":2}]"#;
        assert!(matches!(
            decode_snapshot(line),
            Err(HydrationError::TotalOverflow { index: 0 })
        ));

        let sum = r#"[
            {"id":"a","price":50000000000000000000000000000,"quantity":1},
            {"id":"b","price":50000000000000000000000000000,"quantity":1}
        ]"#;
        assert!(matches!(
            decode_snapshot(sum),
            Err(HydrationError::TotalOverflow { index: 1 })
        ));
    }

    #[test]
    fn test_overflowing_snapshot_is_removed() {
        let raw = r#"[{"id":"a","price":50000000000000000000000000000,"quantity":2}]"#;
        let mut persistence = CartPersistence::new(MemoryStorage::with_entry(KEY, raw), KEY);
        let mut store = CartStore::new();

        persistence.mount(&mut store);

        assert!(store.is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(persistence.storage().raw(KEY), Some("[]"));
    }

    #[test]
    fn test_sync_skips_unchanged_revision() {
        let mut persistence = CartPersistence::new(MemoryStorage::new(), KEY);
        let mut store = CartStore::new();
        persistence.mount(&mut store);

        persistence.storage_mut().set(KEY, "sentinel").unwrap();
        persistence.sync(&store);
        assert_eq!(persistence.storage().raw(KEY), Some("sentinel"));

        store.add_item(&product("p1", 1), 1);
        persistence.sync(&store);
        assert_ne!(persistence.storage().raw(KEY), Some("sentinel"));
    }

    #[test]
    fn test_read_failure_keeps_entry_and_falls_back() {
        let storage = BrokenStorage {
            fail_reads: true,
            removed: false,
        };
        let mut persistence = CartPersistence::new(storage, KEY);
        let mut store = CartStore::new();

        persistence.mount(&mut store);

        assert!(store.is_empty());
        assert!(!persistence.storage().removed);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut persistence = CartPersistence::new(BrokenStorage::default(), KEY);
        let mut store = CartStore::new();

        persistence.mount(&mut store);
        store.add_item(&product("p1", 1), 1);
        persistence.sync(&store);

        assert!(persistence.storage().removed);
        assert_eq!(store.item_count(), 1);
    }
}
