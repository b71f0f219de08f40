//! Cart store: line items, promo code, and derived money values.
//!
//! A pure, persisted state container: no network calls originate here.
//! All quantity boundaries clamp silently instead of erroring, so every
//! operation is total over its inputs. The product snapshot captured at
//! add-time is deliberately not revalidated against the catalog; checkout
//! submission is the authoritative re-validation point.

use blossom_core::{CheckoutItem, Money, Product, ProductId, PromoCode};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, keys};

/// One product/quantity pair in the cart, unique by product id.
///
/// `product` is the catalog snapshot captured when the line was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub product: Product,
    pub quantity: u32,
}

/// Persisted cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartLine>,
    pub promo_code: Option<PromoCode>,
}

/// Store for the shopping cart.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    storage: Storage,
}

impl CartStore {
    /// Create the store, reloading any persisted cart.
    ///
    /// Loaded quantities are re-clamped into `[1, effective_max]` so an
    /// out-of-band edit of the record cannot break the invariant.
    #[must_use]
    pub fn load(storage: Storage) -> Self {
        let mut state = storage.load::<CartState>(keys::CART).unwrap_or_default();
        for line in &mut state.items {
            line.quantity = line.quantity.clamp(1, line.product.effective_max());
        }
        Self { state, storage }
    }

    /// Add a product to the cart.
    ///
    /// Merging into an existing line clamps the summed quantity to the
    /// product's effective max; a brand-new line clamps the same way.
    /// A zero quantity is treated as one.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        let max = product.effective_max();

        if let Some(line) = self
            .state
            .items
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity).min(max);
        } else {
            self.state.items.push(CartLine {
                product_id: product.id,
                product: product.clone(),
                quantity: quantity.min(max),
            });
        }
        self.persist();
    }

    /// Delete a line if present; a no-op (not an error) if absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.state.items.retain(|line| line.product_id != product_id);
        self.persist();
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Otherwise the value is
    /// clamped to the snapshot's effective max. A no-op if the line does
    /// not exist.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self
            .state
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity.min(line.product.effective_max());
            self.persist();
        }
    }

    /// Empty the cart. Clearing always discards any applied promo too.
    pub fn clear(&mut self) {
        self.state = CartState::default();
        self.persist();
    }

    /// Replace the single active promo code.
    ///
    /// Validity is the caller's responsibility; the promo lookup happens
    /// against the backend before this is called.
    pub fn apply_promo(&mut self, promo: PromoCode) {
        self.state.promo_code = Some(promo);
        self.persist();
    }

    /// Clear the active promo code.
    pub fn remove_promo(&mut self) {
        self.state.promo_code = None;
        self.persist();
    }

    /// Current lines.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.state.items
    }

    /// Active promo code, if any.
    #[must_use]
    pub const fn promo_code(&self) -> Option<&PromoCode> {
        self.state.promo_code.as_ref()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Sum of quantities across lines (not line count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state
            .items
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of `price * quantity` over lines, in minor units.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.state
            .items
            .iter()
            .map(|line| line.product.price.times(line.quantity))
            .sum()
    }

    /// Discount for the active promo, clamped so it never exceeds the
    /// subtotal. Zero without a promo.
    #[must_use]
    pub fn discount(&self) -> Money {
        self.state
            .promo_code
            .as_ref()
            .map_or(Money::ZERO, |promo| promo.discount_for(self.subtotal()))
    }

    /// `subtotal - discount`; never negative.
    #[must_use]
    pub fn total(&self) -> Money {
        self.subtotal().saturating_sub_floor_zero(self.discount())
    }

    /// Project the cart into the `(product_id, qty)` pairs the order API
    /// accepts. Derived prices never leave the client.
    #[must_use]
    pub fn checkout_items(&self) -> Vec<CheckoutItem> {
        self.state
            .items
            .iter()
            .map(|line| CheckoutItem {
                product_id: line.product_id,
                qty: line.quantity,
            })
            .collect()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(keys::CART, &self.state) {
            tracing::warn!(error = %e, "Failed to persist cart state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: i64, is_unlimited: bool, qty_available: Option<u32>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Bouquet {id}"),
            slug: format!("bouquet-{id}"),
            description: None,
            price: Money::from_minor(price),
            price_display: String::new(),
            old_price: None,
            old_price_display: None,
            has_discount: false,
            qty_available,
            is_unlimited: Some(is_unlimited),
            is_available: true,
            main_image: None,
            images: Vec::new(),
            category_slug: None,
            category: None,
            created_at: None,
        }
    }

    fn percent_promo(percent: u32) -> PromoCode {
        PromoCode {
            code: "TEN".to_string(),
            discount_percent: Some(percent),
            fixed_amount: None,
            is_active: true,
            expires_at: None,
        }
    }

    fn fixed_promo(minor: i64) -> PromoCode {
        PromoCode {
            code: "FIVEK".to_string(),
            discount_percent: None,
            fixed_amount: Some(Money::from_minor(minor)),
            is_active: true,
            expires_at: None,
        }
    }

    fn test_store(dir: &std::path::Path) -> CartStore {
        CartStore::load(Storage::open(dir).expect("open storage"))
    }

    #[test]
    fn test_add_merges_into_single_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, true, None);

        cart.add_item(&p, 2);
        cart.add_item(&p, 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_merge_clamps_to_effective_max() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, false, Some(2));

        cart.add_item(&p, 1);
        cart.add_item(&p, 5);

        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_initial_insert_clamps_too() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, false, Some(2));

        cart.add_item(&p, 7);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_zero_and_negative_remove() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, true, None);

        cart.add_item(&p, 2);
        cart.update_quantity(p.id, 0);
        assert!(cart.is_empty());

        cart.add_item(&p, 2);
        cart.update_quantity(p.id, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_stock() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, false, Some(2));

        cart.add_item(&p, 1);
        cart.update_quantity(p.id, 5);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_missing_line_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        cart.update_quantity(ProductId::new(42), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());
        let p = product(1, 150_000, true, None);

        cart.add_item(&p, 1);
        cart.remove_item(p.id);
        cart.remove_item(p.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_discards_items_and_promo() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        cart.add_item(&product(1, 150_000, true, None), 2);
        cart.apply_promo(percent_promo(10));
        cart.clear();

        assert_eq!(cart.item_count(), 0);
        assert!(cart.promo_code().is_none());
    }

    #[test]
    fn test_percent_discount_math() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        // 1500.00 x 3 with a 10% promo
        cart.add_item(&product(1, 150_000, true, None), 3);
        cart.apply_promo(percent_promo(10));

        assert_eq!(cart.subtotal().as_minor(), 450_000);
        assert_eq!(cart.discount().as_minor(), 45_000);
        assert_eq!(cart.total().as_minor(), 405_000);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        cart.add_item(&product(1, 150_000, true, None), 3);
        cart.apply_promo(fixed_promo(500_000));

        assert_eq!(cart.discount().as_minor(), 450_000);
        assert_eq!(cart.total().as_minor(), 0);
    }

    #[test]
    fn test_discount_never_exceeds_subtotal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        cart.add_item(&product(1, 100, true, None), 1);
        cart.apply_promo(fixed_promo(1_000_000));

        assert!(cart.discount() <= cart.subtotal());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_remove_promo_keeps_items() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        cart.add_item(&product(1, 100, true, None), 1);
        cart.apply_promo(percent_promo(10));
        cart.remove_promo();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.discount(), Money::ZERO);
    }

    #[test]
    fn test_checkout_items_carry_no_prices() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cart = test_store(dir.path());

        cart.add_item(&product(1, 150_000, true, None), 2);
        cart.add_item(&product(2, 90_000, true, None), 1);

        let items = cart.checkout_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, ProductId::new(1));
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].product_id, ProductId::new(2));
        assert_eq!(items[1].qty, 1);
    }

    #[test]
    fn test_cart_roundtrips_through_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut cart = test_store(dir.path());
            cart.add_item(&product(1, 150_000, true, None), 3);
            cart.apply_promo(percent_promo(10));
        }

        let reloaded = test_store(dir.path());
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(reloaded.promo_code().map(|p| p.code.as_str()), Some("TEN"));
        assert_eq!(reloaded.total().as_minor(), 405_000);
    }
}
