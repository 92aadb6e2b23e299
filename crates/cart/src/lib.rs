//! Storefront cart library.
//!
//! The cart for one browser session: an in-memory [`CartStore`], a
//! [`CartPersistence`] adapter that mirrors it to durable key-value storage,
//! and the [`CartSession`] that ties them together for consumers.
//!
//! # Lifecycle
//!
//! 1. [`CartSession::new`] yields an empty, unmounted cart. Mutations are
//!    allowed but nothing touches storage.
//! 2. [`CartSession::mount`] is called once by the hosting environment. It
//!    reads the stored snapshot, replaces the in-memory state if the snapshot
//!    is well formed, and from then on every committed change is written back.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_cart::{CartSession, MemoryStorage};
//! use storefront_cart_core::Product;
//!
//! let mut cart = CartSession::new(MemoryStorage::new(), "cart");
//! cart.mount();
//!
//! let shirt = Product::new("p1", "Linen Shirt", Decimal::from(10));
//! cart.add_item(&shirt, 2);
//! cart.add_item(&shirt, 3);
//!
//! assert_eq!(cart.item_count(), 5);
//! assert_eq!(cart.total(), Decimal::from(50));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod item;
pub mod notify;
pub mod persistence;
pub mod session;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{CartConfig, ConfigError};
pub use error::{HydrationError, PersistError, StorageError};
pub use item::CartLineItem;
pub use notify::{CartNotifier, LogNotifier, NoopNotifier};
pub use persistence::CartPersistence;
pub use session::CartSession;
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::CartStore;
pub use view::{CartItemView, CartView};
