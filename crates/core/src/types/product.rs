//! Catalog types as served by the shop backend.
//!
//! These shapes are a fixed external contract: the client never mutates
//! them, it only snapshots them into the cart and favorites stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::money::Money;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub slug: String,
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_count: Option<u32>,
}

/// A product gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// Brief category reference embedded in a product payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub title: String,
    pub slug: String,
}

/// A catalog product.
///
/// `price` is always in minor currency units; the `*_display` strings are
/// backend-rendered and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub price_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price_display: Option<String>,
    #[serde(default)]
    pub has_discount: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_available: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unlimited: Option<bool>,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Upper bound on the orderable quantity for this product.
    ///
    /// Unlimited products cap at 99 (UI limit); limited products cap at
    /// stock on hand, still bounded by 99. Missing stock data is treated
    /// as the UI limit.
    #[must_use]
    pub fn effective_max(&self) -> u32 {
        if self.is_unlimited.unwrap_or(false) {
            99
        } else {
            self.qty_available.unwrap_or(99).min(99)
        }
    }
}
