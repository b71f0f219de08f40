//! Order types as served and accepted by the shop backend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, OrderItemId, ProductId};
use super::money::Money;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Confirmed,
    InProgress,
    Delivering,
    Done,
    Cancelled,
}

/// Payment method accepted at checkout.
///
/// Only payment links are supported today; card/cash variants are on the
/// backend roadmap and will extend this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    LinkAfterOrder,
}

/// A line within a placed order, with backend-authoritative pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub product_title: String,
    pub qty: u32,
    pub unit_price: Money,
    #[serde(default)]
    pub unit_price_display: String,
    pub line_total: Money,
    #[serde(default)]
    pub line_total_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Order summary as returned by the order list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub status_display: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_method_display: String,
    pub total: Money,
    #[serde(default)]
    pub total_display: String,
    pub items_count: u32,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Full order detail including money breakdown and delivery data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub summary: Order,
    pub subtotal: Money,
    #[serde(default)]
    pub subtotal_display: String,
    pub delivery_fee: Money,
    #[serde(default)]
    pub delivery_fee_display: String,
    pub discount: Money,
    #[serde(default)]
    pub discount_display: String,
    pub customer_phone: String,
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_to: Option<String>,
    pub items: Vec<OrderItem>,
    pub updated_at: DateTime<Utc>,
}

/// The `(product_id, qty)` projection of a cart line.
///
/// This is the only shape checkout may submit: the backend recomputes all
/// prices at order time, so cart-derived money values never cross the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub qty: u32,
}

/// Order submission payload (`POST /orders/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_to: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<CheckoutItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in_progress\"");
        let back: OrderStatus = serde_json::from_str("\"delivering\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Delivering);
    }

    #[test]
    fn test_checkout_request_omits_empty_optionals() {
        let request = CheckoutRequest {
            customer_name: "Anna".to_string(),
            customer_phone: "+7 900 123-45-67".to_string(),
            delivery_address: "Arbat 12, apt 5".to_string(),
            delivery_comment: None,
            delivery_date: None,
            delivery_time_from: None,
            delivery_time_to: None,
            payment_method: PaymentMethod::LinkAfterOrder,
            items: vec![CheckoutItem {
                product_id: ProductId::new(3),
                qty: 2,
            }],
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("delivery_comment").is_none());
        assert_eq!(json["payment_method"], "link_after_order");
        assert_eq!(json["items"][0]["product_id"], 3);
        assert_eq!(json["items"][0]["qty"], 2);
    }
}
