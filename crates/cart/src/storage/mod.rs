//! Durable key-value storage for cart snapshots.
//!
//! The cart writes one string value under one key. Backends decide where
//! that lives: [`MemoryStorage`] for tests and embedding, [`FileStorage`] for
//! a directory on disk.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Storage keys used by the cart.
pub mod keys {
    /// Default key for the serialized line-item array.
    pub const CART: &str = "cart";
}

/// A string key-value store scoped to one origin.
///
/// Only the persistence adapter calls these, and only after the session has
/// mounted.
pub trait CartStorage {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value by key.
    ///
    /// Returns `Ok(())` even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
