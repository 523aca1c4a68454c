//! # Money Module
//!
//! Settlement and presentation of monetary amounts.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CALCULATION                          SETTLEMENT / DISPLAY              │
//! │                                                                         │
//! │  Decimal (exact, unrounded)  ──────►  Money (i64 cents)                 │
//! │    0.5 kg × $12.375/kg                  round half away from zero       │
//! │    = $6.1875                            = 619 cents                     │
//! │                                                                         │
//! │  Every engine figure stays a Decimal until it reaches a boundary:       │
//! │  the quote viewer, the PDF export, a payment request.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use galley_core::money::{format_currency, Money};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let total = Decimal::from_str("1234.56").unwrap();
//! assert_eq!(format_currency(total), "$1,234.56");
//!
//! let settled = Money::from_decimal(total).unwrap();
//! assert_eq!(settled.cents(), 123456);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A settled monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: a negative margin or credit line is still money
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - Only produced from a [`Decimal`] at a presentation/settlement boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Settles an exact decimal amount to whole cents.
    ///
    /// Rounds half away from zero, the same rule the browser's currency
    /// formatter applies, so a settled figure always matches what the client
    /// saw on the quote. Returns `None` when the amount does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use galley_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let amount = Decimal::from_str("6.185").unwrap();
    /// assert_eq!(Money::from_decimal(amount).unwrap().cents(), 619);
    ///
    /// let refund = Decimal::from_str("-6.185").unwrap();
    /// assert_eq!(Money::from_decimal(refund).unwrap().cents(), -619);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let rounded = round_to_cents(amount);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Subtracts, returning `None` on `i64` overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Formats an amount as a US-locale currency string.
///
/// Two decimal places, `,` thousands separator, `-` before the `$` for
/// negatives. Presentation only: never compare or re-parse the result.
///
/// ## Example
/// ```rust
/// use galley_core::money::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// assert_eq!(format_currency(Decimal::new(-123456, 2)), "-$1,234.56");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Rounds to two decimal places, midpoint away from zero.
fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Inserts `,` every three digits from the right: `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Same shape as [`format_currency`]: `-$1,234.56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(&self.dollars().unsigned_abs().to_string()),
            self.cents_part()
        )
    }
}

// =============================================================================
// Checked Arithmetic
// =============================================================================

/// Sums figures that may already have overflowed (`None`), naming `field`
/// in the error when either a term or the running sum does not fit.
pub(crate) fn checked_sum<I>(field: &str, terms: I) -> CoreResult<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    terms.into_iter().try_fold(Decimal::ZERO, |sum, term| {
        term.and_then(|term| sum.checked_add(term))
            .ok_or_else(|| CoreError::overflow(field))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
