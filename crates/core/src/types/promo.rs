//! Promo code type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A promo code applied to a cart.
///
/// At most one of `discount_percent` / `fixed_amount` is expected to be
/// meaningful. When both are present, percent takes precedence.
/// Validity (`is_active`, expiry, existence) is checked by the backend
/// promo lookup; the cart applies whatever it is handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Money>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl PromoCode {
    /// Discount for the given subtotal, in minor units.
    ///
    /// Percent discounts round half up; fixed discounts are clamped to the
    /// subtotal so the total can never go negative. A promo with neither
    /// field set discounts nothing.
    #[must_use]
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if let Some(percent) = self.discount_percent {
            return subtotal.percent_of(percent);
        }
        if let Some(fixed) = self.fixed_amount {
            return fixed.min(subtotal);
        }
        Money::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(percent: Option<u32>, fixed: Option<i64>) -> PromoCode {
        PromoCode {
            code: "SPRING".to_string(),
            discount_percent: percent,
            fixed_amount: fixed.map(Money::from_minor),
            is_active: true,
            expires_at: None,
        }
    }

    #[test]
    fn test_percent_discount() {
        let d = promo(Some(10), None).discount_for(Money::from_minor(450_000));
        assert_eq!(d.as_minor(), 45_000);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        let d = promo(None, Some(500_000)).discount_for(Money::from_minor(450_000));
        assert_eq!(d.as_minor(), 450_000);
    }

    #[test]
    fn test_percent_wins_over_fixed() {
        let d = promo(Some(10), Some(500_000)).discount_for(Money::from_minor(450_000));
        assert_eq!(d.as_minor(), 45_000);
    }

    #[test]
    fn test_empty_promo_discounts_nothing() {
        let d = promo(None, None).discount_for(Money::from_minor(450_000));
        assert_eq!(d, Money::ZERO);
    }
}
