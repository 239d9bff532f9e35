//! # Money Module
//!
//! Provides the `Money` type used to present monetary amounts.
//!
//! ## Calculation vs Presentation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TWO REPRESENTATIONS                                                    │
//! │                                                                         │
//! │  Calculation (OrderLine, OrderTotals):                                  │
//! │    f64, ordinary floating point, exactly what the order store stores   │
//! │    3 × 10.00 × 10% → 3.0000000000000004 is acceptable here             │
//! │                                                                         │
//! │  Presentation (grid, listing, invoice):                                 │
//! │    Money(i64 cents), rounded once at the edge                           │
//! │    3.0000000000000004 → Money(300) → "3.00"                             │
//! │                                                                         │
//! │  Rounding happens ONLY when converting to Money, never in between.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::money::Money;
//!
//! let amount = Money::from_amount(33.0);
//! assert_eq!(amount.to_string(), "33.00");
//!
//! assert_eq!(format!("{:>8}", Money::from_cents(-75)), "   -0.75");
//! ```

use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: credit lines can carry negative quantities
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Display**: two decimals, no currency symbol (the store is currency agnostic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a floating point amount to the nearest cent.
    ///
    /// Halves round away from zero. Non-finite input is treated as zero.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(10.005).cents(), 1001);
    /// assert_eq!(Money::from_amount(-2.5).cents(), -250);
    /// assert_eq!(Money::from_amount(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // Nudge by a small epsilon so 10.005 (stored as 10.00499...) rounds up
        let scaled = amount * 100.0;
        let nudged = scaled + scaled.signum() * 1e-7;
        Money(nudged.round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole units portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering, e.g. `1234.50` or `-0.75`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part());
        // Honour width/alignment so tables can right-align amounts
        f.pad(&text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_display_padding() {
        assert_eq!(format!("{:>8}", Money::from_cents(3300)), "   33.00");
        assert_eq!(format!("{:<6}|", Money::from_cents(5)), "0.05  |");
    }

    #[test]
    fn test_from_amount_rounding() {
        assert_eq!(Money::from_amount(30.0).cents(), 3000);
        assert_eq!(Money::from_amount(3.0000000000000004).cents(), 300);
        assert_eq!(Money::from_amount(1.005).cents(), 101);
        assert_eq!(Money::from_amount(-1.005).cents(), -101);
        assert_eq!(Money::from_amount(0.004).cents(), 0);
        assert_eq!(Money::from_amount(f64::NAN).cents(), 0);
        assert_eq!(Money::from_amount(f64::INFINITY).cents(), 0);
    }
}
