//! Favorites store: a persisted set of liked products.
//!
//! Structurally a simpler cart: set semantics keyed by product id, no
//! quantities, no pricing.

use blossom_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, keys};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct FavoritesState {
    items: Vec<Product>,
}

/// Store for liked products.
#[derive(Debug)]
pub struct FavoritesStore {
    state: FavoritesState,
    storage: Storage,
}

impl FavoritesStore {
    /// Create the store, reloading any persisted favorites.
    #[must_use]
    pub fn load(storage: Storage) -> Self {
        let state = storage
            .load::<FavoritesState>(keys::FAVORITES)
            .unwrap_or_default();
        Self { state, storage }
    }

    /// Add a product; a no-op if already present.
    pub fn add(&mut self, product: &Product) {
        if self.is_favorite(product.id) {
            return;
        }
        self.state.items.push(product.clone());
        self.persist();
    }

    /// Remove a product; a no-op if absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.state.items.retain(|item| item.id != product_id);
        self.persist();
    }

    /// Add if absent, remove if present.
    pub fn toggle(&mut self, product: &Product) {
        if self.is_favorite(product.id) {
            self.remove(product.id);
        } else {
            self.add(product);
        }
    }

    /// Whether the product is currently liked.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.state.items.iter().any(|item| item.id == product_id)
    }

    /// Remove all favorites.
    pub fn clear(&mut self) {
        self.state = FavoritesState::default();
        self.persist();
    }

    /// Current favorites, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.state.items
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(keys::FAVORITES, &self.state) {
            tracing::warn!(error = %e, "Failed to persist favorites state");
        }
    }
}
