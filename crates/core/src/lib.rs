//! Blossom Core - Shared types library.
//!
//! This crate provides common types used across all Blossom components:
//! - `client` - Mini App client core (stores, API gateway, persistence)
//! - `cli` - Command-line storefront for development and smoke testing
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, minor-unit money, catalog/cart/order/auth types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
