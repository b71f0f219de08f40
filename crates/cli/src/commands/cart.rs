//! Local cart commands.
//!
//! Mutations happen against the persisted store; only `add` touches the
//! network (to snapshot the product).

use blossom_client::api::ApiError;
use blossom_client::state::AppState;
use blossom_core::{Money, ProductId, PromoCode};

/// Show cart lines, the applied promo, and derived totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for line in cart.items() {
        tracing::info!(
            "[{}] {} x{} = {}",
            line.product_id,
            line.product.title,
            line.quantity,
            line.product.price.times(line.quantity).format()
        );
    }
    if let Some(promo) = cart.promo_code() {
        tracing::info!("Promo: {} (-{})", promo.code, cart.discount().format());
    }
    tracing::info!("Subtotal: {}", cart.subtotal().format());
    tracing::info!("Total:    {}", cart.total().format());
}

/// Fetch a product by slug and add it to the cart.
pub async fn add(state: &AppState, slug: &str, qty: u32) -> Result<(), ApiError> {
    let product = state.api().product(slug).await?;
    let title = product.title.clone();

    let mut cart = state.cart();
    cart.add_item(&product, qty);
    tracing::info!("Added {title}; cart now holds {} item(s)", cart.item_count());
    Ok(())
}

/// Remove a line by product id.
pub fn remove(state: &AppState, product_id: ProductId) {
    state.cart().remove_item(product_id);
    tracing::info!("Removed product {product_id} from cart");
}

/// Set a line's quantity; zero or negative removes the line.
pub fn set_qty(state: &AppState, product_id: ProductId, qty: i64) {
    let mut cart = state.cart();
    cart.update_quantity(product_id, qty);
    tracing::info!("Cart now holds {} item(s)", cart.item_count());
}

/// Empty the cart (drops any applied promo too).
pub fn clear(state: &AppState) {
    state.cart().clear();
    tracing::info!("Cart cleared");
}

/// Apply a promo code carrying the given discount.
pub fn promo(state: &AppState, code: String, percent: Option<u32>, fixed: Option<i64>) {
    let promo = PromoCode {
        code,
        discount_percent: percent,
        fixed_amount: fixed.map(Money::from_minor),
        is_active: true,
        expires_at: None,
    };

    let mut cart = state.cart();
    cart.apply_promo(promo);
    tracing::info!("Discount: {}", cart.discount().format());
    tracing::info!("Total:    {}", cart.total().format());
}

/// Remove the applied promo code.
pub fn remove_promo(state: &AppState) {
    let mut cart = state.cart();
    cart.remove_promo();
    tracing::info!("Promo removed; total {}", cart.total().format());
}
