//! Core types for the storefront cart.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, ParseCurrencyError, Price};
pub use product::Product;
