//! Checkout submission and order history.

use blossom_client::api::ApiError;
use blossom_client::checkout::{CheckoutError, CheckoutForm};
use blossom_client::state::AppState;
use blossom_core::OrderId;

/// Validate the form and submit the cart as an order.
pub async fn checkout(
    state: &AppState,
    name: String,
    phone: String,
    address: String,
    comment: Option<String>,
) -> Result<(), CheckoutError> {
    let form = CheckoutForm {
        customer_name: name,
        customer_phone: phone,
        delivery_address: address,
        delivery_comment: comment,
    };

    let detail = state.submit_checkout(form).await?;
    tracing::info!(
        "Order {} created: {} ({})",
        detail.summary.id,
        detail.summary.total_display,
        detail.summary.status_display
    );
    Ok(())
}

/// List the current identity's orders.
pub async fn list(state: &AppState) -> Result<(), ApiError> {
    let page = state.api().orders().await?;
    tracing::info!("{} order(s)", page.count);
    for order in &page.results {
        tracing::info!(
            "#{} {} - {} item(s), {} [{}]",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.items_count,
            order.total_display,
            order.status_display
        );
    }
    Ok(())
}

/// Show one order's full detail.
pub async fn show(state: &AppState, id: OrderId) -> Result<(), ApiError> {
    let detail = state.api().order(id).await?;

    tracing::info!(
        "Order #{} [{}], placed {}",
        detail.summary.id,
        detail.summary.status_display,
        detail.summary.created_at.format("%Y-%m-%d %H:%M")
    );
    for item in &detail.items {
        tracing::info!(
            "{} x{} = {}",
            item.product_title,
            item.qty,
            item.line_total_display
        );
    }
    if detail.discount > blossom_core::Money::ZERO {
        tracing::info!("Discount: -{}", detail.discount_display);
    }
    tracing::info!("Delivery to {}: {}", detail.delivery_address, detail.delivery_fee_display);
    tracing::info!("Total: {}", detail.summary.total_display);
    Ok(())
}
