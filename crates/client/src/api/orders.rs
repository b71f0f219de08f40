//! Order endpoints: history and submission.

use blossom_core::{CheckoutRequest, Order, OrderDetail, OrderId, Paginated};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// List the current identity's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 401 after the refresh policy surfaces here.
    pub async fn orders(&self) -> Result<Paginated<Order>, ApiError> {
        self.get("orders/", &[]).await
    }

    /// Fetch one order's full detail.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 404 surfaces as `ApiError::Status`.
    pub async fn order(&self, id: OrderId) -> Result<OrderDetail, ApiError> {
        self.get(&format!("orders/{id}/"), &[]).await
    }

    /// Submit an order.
    ///
    /// The payload carries only `(product_id, qty)` pairs; the backend is
    /// the source of truth for all pricing at order time and may reject or
    /// adjust lines whose snapshots went stale.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; validation failures arrive as a 400 with a
    /// field-level body.
    pub async fn create_order(&self, request: &CheckoutRequest) -> Result<OrderDetail, ApiError> {
        self.post("orders/", request).await
    }
}
