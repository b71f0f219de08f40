//! Client-side checkout form validation.
//!
//! Shape rules are checked before any network call and surface per-field;
//! a form that fails here is never sent to the backend. The backend
//! re-validates everything anyway - this layer exists so the user gets
//! inline feedback without a round trip.

use std::sync::LazyLock;

use blossom_core::{CheckoutItem, CheckoutRequest, PaymentMethod};
use regex::Regex;
use thiserror::Error;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern is a valid regex")
});

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const ADDRESS_MIN: usize = 5;
const ADDRESS_MAX: usize = 300;
const COMMENT_MAX: usize = 500;

/// A checkout form field, for per-field error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    CustomerName,
    CustomerPhone,
    DeliveryAddress,
    DeliveryComment,
}

impl CheckoutField {
    /// Wire/form name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CustomerName => "customer_name",
            Self::CustomerPhone => "customer_phone",
            Self::DeliveryAddress => "delivery_address",
            Self::DeliveryComment => "delivery_comment",
        }
    }
}

/// One failed shape rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: &'static str,
}

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more fields failed shape validation; nothing was sent.
    #[error("invalid checkout form: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// Submitting an empty cart is a view-layer bug, not a user error.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The order submission itself failed; the cart is left intact.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.name(), e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// User-entered checkout fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_comment: Option<String>,
}

impl CheckoutForm {
    /// Check all shape rules, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns the full list of failed fields; an empty `Ok(())` means the
    /// form may be submitted.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.customer_name.trim().chars().count();
        if name_len < NAME_MIN {
            errors.push(FieldError {
                field: CheckoutField::CustomerName,
                message: "at least 2 characters",
            });
        } else if name_len > NAME_MAX {
            errors.push(FieldError {
                field: CheckoutField::CustomerName,
                message: "at most 100 characters",
            });
        }

        if !PHONE_PATTERN.is_match(self.customer_phone.trim()) {
            errors.push(FieldError {
                field: CheckoutField::CustomerPhone,
                message: "enter a valid phone number",
            });
        }

        let address_len = self.delivery_address.trim().chars().count();
        if address_len < ADDRESS_MIN {
            errors.push(FieldError {
                field: CheckoutField::DeliveryAddress,
                message: "at least 5 characters",
            });
        } else if address_len > ADDRESS_MAX {
            errors.push(FieldError {
                field: CheckoutField::DeliveryAddress,
                message: "at most 300 characters",
            });
        }

        if let Some(comment) = &self.delivery_comment {
            if comment.chars().count() > COMMENT_MAX {
                errors.push(FieldError {
                    field: CheckoutField::DeliveryComment,
                    message: "at most 500 characters",
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the submission payload from this form and the cart's
    /// `(product_id, qty)` projection.
    #[must_use]
    pub fn into_request(self, items: Vec<CheckoutItem>) -> CheckoutRequest {
        CheckoutRequest {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            delivery_comment: self.delivery_comment.filter(|c| !c.is_empty()),
            delivery_date: None,
            delivery_time_from: None,
            delivery_time_to: None,
            payment_method: PaymentMethod::LinkAfterOrder,
            items,
        }
    }
}
