//! Error types for cart storage and persistence.
//!
//! None of these reach consumers of [`CartSession`](crate::CartSession):
//! the persistence adapter logs them and degrades to an empty or unchanged
//! cart. Storage backends return them so the adapter can decide.

use thiserror::Error;

/// Errors raised by a [`CartStorage`](crate::CartStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be used by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend refused the operation (quota, disabled storage).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a stored cart snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum HydrationError {
    /// Storage read failed.
    #[error("Storage read failed: {0}")]
    Read(#[from] StorageError),

    /// Stored value is not valid JSON.
    #[error("Stored cart is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Stored value parsed but is not an array.
    #[error("Stored cart is not a sequence (found {0})")]
    NotASequence(&'static str),

    /// An array element is not a line item.
    #[error("Stored cart item {index} is invalid: {source}")]
    InvalidItem {
        /// Position of the bad element in the stored array.
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Line totals overflow the decimal range.
    #[error("Stored cart item {index} overflows the cart total")]
    TotalOverflow {
        /// Position of the element whose line total did not fit.
        index: usize,
    },
}

impl HydrationError {
    /// Whether the stored entry itself is bad and should be deleted.
    ///
    /// Read failures say nothing about the entry, so it is left alone.
    #[must_use]
    pub const fn is_corrupt_entry(&self) -> bool {
        !matches!(self, Self::Read(_))
    }
}

/// Errors writing a snapshot back to storage.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Line items could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage write failed.
    #[error("Storage write failed: {0}")]
    Storage(#[from] StorageError),
}
