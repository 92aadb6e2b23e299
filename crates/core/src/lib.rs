//! Storefront Cart Core - Shared catalog types.
//!
//! This crate provides the types the cart shares with its collaborators:
//! - `cart` - Cart store, persistence adapter, and session
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. Catalog data arrives from the storefront API as [`Product`]
//! records and is copied into the cart from here.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the catalog `Product` record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
