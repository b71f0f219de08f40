//! Core types for Blossom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod order;
pub mod page;
pub mod product;
pub mod promo;
pub mod user;

pub use id::*;
pub use money::Money;
pub use order::*;
pub use page::Paginated;
pub use product::{Category, CategoryRef, Product, ProductImage};
pub use promo::PromoCode;
pub use user::{AuthTokens, ShopUser, TelegramUser};
