//! Minor-currency-unit money type.
//!
//! All price arithmetic in the client is integer arithmetic over the
//! smallest currency denomination (kopecks). Floating point is never used:
//! prices arrive from the backend as integers and rounding drift across
//! cart math is unacceptable.

use serde::{Deserialize, Serialize};

/// An amount of money in minor currency units (kopecks).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn as_minor(&self) -> i64 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction, clamped at zero.
    ///
    /// Used for `total = subtotal - discount`; the discount is already
    /// clamped to the subtotal, so the clamp here is an invariant guard
    /// rather than expected behavior.
    #[must_use]
    pub const fn saturating_sub_floor_zero(self, other: Self) -> Self {
        let diff = self.0.saturating_sub(other.0);
        if diff < 0 { Self(0) } else { Self(diff) }
    }

    /// Multiply by a quantity.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Take a percentage of this amount, rounding half up.
    ///
    /// `percent` is a whole-number percentage (10 means 10%).
    #[must_use]
    pub const fn percent_of(self, percent: u32) -> Self {
        Self(self.0.saturating_mul(percent as i64).saturating_add(50) / 100)
    }

    /// Smaller of two amounts.
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Format for display, e.g. `1 500 ₽`.
    ///
    /// Whole rubles are grouped by thousands; a kopeck remainder is shown
    /// with a decimal comma. The space before the currency sign is
    /// non-breaking so the sign never wraps alone.
    #[must_use]
    pub fn format(&self) -> String {
        let negative = self.0 < 0;
        let minor = self.0.unsigned_abs();
        let rubles = minor / 100;
        let kopecks = minor % 100;

        let mut grouped = String::new();
        let digits = rubles.to_string();
        let len = digits.len();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        if kopecks == 0 {
            format!("{sign}{grouped}\u{00a0}\u{20bd}")
        } else {
            format!("{sign}{grouped},{kopecks:02}\u{00a0}\u{20bd}")
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
