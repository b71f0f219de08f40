//! Blossom client core library.
//!
//! The state-bearing heart of the Mini App: local stores for cart,
//! favorites, and session credentials, plus the single API gateway every
//! backend call routes through. The view layer (CLI, or a future UI shell)
//! consumes this crate and owns no authoritative state of its own.
//!
//! # Architecture
//!
//! - [`stores`] - single-writer state containers, persisted write-through
//! - [`api`] - the gateway: credential injection, one-shot 401 refresh retry
//! - [`storage`] - durable local JSON records, one per store
//! - [`telegram`] - host-platform boundary (opaque init token + user)
//! - [`checkout`] - client-side form validation before order submission
//! - [`state`] - explicit app context wiring the pieces together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod checkout;
pub mod config;
pub mod state;
pub mod storage;
pub mod stores;
pub mod telegram;
