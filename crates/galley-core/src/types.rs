//! # Domain Types
//!
//! Normalized types the engine computes with.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RecipeItem    │   │  QuoteLineItem  │   │ LaborAssignment │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  amount_required│   │  name           │   │  role           │       │
//! │  │  price_per_unit │   │  quantity       │   │  hourly_rate    │       │
//! │  │  unit           │   │  unit_price     │   │  hours?         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Percent     │   │   QuoteConfig   │   │  MarginStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  8 = 8%         │   │  tax, fee,      │   │  Excellent ≥70  │       │
//! │  │                 │   │  deposit, labor │   │  Good      ≥50  │       │
//! │  └─────────────────┘   └─────────────────┘   │  Low       ≥0   │       │
//! │                                              │  Negative  <0   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these carry an identity. They are built from a query result by
//! [`crate::input`], pushed through the engine and dropped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{
    DEFAULT_DEPOSIT_PERCENT, DEFAULT_LABOR_HOURS, DEFAULT_SERVICE_FEE_PERCENT,
    DEFAULT_TAX_RATE_PERCENT, EXCELLENT_MARGIN_THRESHOLD, GOOD_MARGIN_THRESHOLD,
};

// =============================================================================
// Percent
// =============================================================================

/// A rate expressed in percent: `Percent::new(8)` is 8%.
///
/// ## Why not a fraction?
/// Every persisted config and every form in the catering app stores
/// percentages as whole-number-style values (8, 15, 25, 300). Keeping that
/// unit avoids a `/100` at every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a percentage from its percent value.
    #[inline]
    pub fn new(value: impl Into<Decimal>) -> Self {
        Percent(value.into())
    }

    /// Returns the percent value (8 for 8%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (0.08 for 8%).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Applies the rate to an amount: `amount × value / 100`.
    ///
    /// `None` when the result does not fit in a `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use galley_core::types::Percent;
    /// use rust_decimal::Decimal;
    ///
    /// let fee = Percent::new(15);
    /// assert_eq!(fee.of(Decimal::from(200)), Some(Decimal::from(30)));
    /// ```
    #[inline]
    pub fn of(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.fraction())
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Recipe Item
// =============================================================================

/// One ingredient's quantity and unit cost within a dish's recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    /// Quantity of the ingredient the recipe needs, in `unit`.
    #[ts(as = "String")]
    pub amount_required: Decimal,

    /// Purchase price of one `unit` of the ingredient.
    #[ts(as = "String")]
    pub price_per_unit: Decimal,

    /// Unit label ("kg", "each", "bunch"). Display only.
    pub unit: String,
}

impl RecipeItem {
    /// Cost this ingredient contributes: `price_per_unit × amount_required`.
    #[inline]
    pub fn line_cost(&self) -> Option<Decimal> {
        self.price_per_unit.checked_mul(self.amount_required)
    }
}

// =============================================================================
// Quote Line Item
// =============================================================================

/// One menu item, staff role-hour block or equipment rental on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    /// Line label shown on the quote.
    pub name: String,

    /// Units ordered (guests served, hours booked, pieces rented).
    pub quantity: u32,

    /// Resolved unit price: the event's override, else the catalog price.
    #[ts(as = "String")]
    pub unit_price: Decimal,
}

impl QuoteLineItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

// =============================================================================
// Labor Assignment
// =============================================================================

/// A staff member assigned to an event, priced by the hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LaborAssignment {
    /// Role label ("server", "bartender", "chef").
    pub role: String,

    /// Hourly rate for the role.
    #[ts(as = "String")]
    pub hourly_rate: Decimal,

    /// Booked hours, when the schedule already knows them.
    /// `None` falls back to [`QuoteConfig::labor_hours_per_assignment`].
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
}

impl LaborAssignment {
    /// Estimated cost of this assignment.
    #[inline]
    pub fn estimated_cost(&self, default_hours: Decimal) -> Option<Decimal> {
        self.hourly_rate
            .checked_mul(self.hours.unwrap_or(default_hours))
    }
}

// =============================================================================
// Deposit Type
// =============================================================================

/// How the booking deposit is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DepositType {
    /// `total × deposit_percent / 100`.
    #[default]
    Percentage,
    /// A flat `deposit_fixed_amount`, whatever the total.
    Fixed,
}

impl DepositType {
    /// Labels accepted by [`DepositType::from_label`] as known values.
    pub const LABELS: [&'static str; 2] = ["percentage", "fixed"];

    /// Parses a persisted label, never failing.
    ///
    /// Only `"fixed"` (any case, surrounding whitespace ignored) selects
    /// [`DepositType::Fixed`]; everything else, including typos and empty
    /// strings, is [`DepositType::Percentage`].
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("fixed") {
            DepositType::Fixed
        } else {
            DepositType::Percentage
        }
    }

    /// Checks whether a label names a known deposit type exactly.
    pub fn is_known_label(label: &str) -> bool {
        Self::LABELS
            .iter()
            .any(|known| label.trim().eq_ignore_ascii_case(known))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepositType::Percentage => "percentage",
            DepositType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DepositType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Quote Config
// =============================================================================

/// Fully resolved per-event quote configuration.
///
/// Built once by [`crate::input::QuoteConfigInput::resolve`]; every field
/// is present, so calculation code never re-applies defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteConfig {
    /// Sales tax, applied to subtotal + service fee.
    #[ts(as = "String")]
    pub tax_rate_percent: Percent,

    /// Service fee, applied to the subtotal.
    #[ts(as = "String")]
    pub service_fee_percent: Percent,

    /// Deposit share of the final total (percentage deposits only).
    #[ts(as = "String")]
    pub deposit_percent: Percent,

    pub deposit_type: DepositType,

    /// Flat deposit (fixed deposits only).
    #[ts(as = "String")]
    pub deposit_fixed_amount: Decimal,

    /// Hours assumed for a staff assignment with no booked hours.
    #[ts(as = "String")]
    pub labor_hours_per_assignment: Decimal,
}

impl QuoteConfig {
    /// Deposit due for a final total.
    pub fn deposit_for(&self, total: Decimal) -> Option<Decimal> {
        match self.deposit_type {
            DepositType::Percentage => self.deposit_percent.of(total),
            DepositType::Fixed => Some(self.deposit_fixed_amount),
        }
    }
}

impl Default for QuoteConfig {
    /// ## Default Values
    /// - Tax: 8%
    /// - Service fee: 15%
    /// - Deposit: 25% of the final total
    /// - Labor: 5 hours per assignment
    fn default() -> Self {
        QuoteConfig {
            tax_rate_percent: Percent::new(DEFAULT_TAX_RATE_PERCENT),
            service_fee_percent: Percent::new(DEFAULT_SERVICE_FEE_PERCENT),
            deposit_percent: Percent::new(DEFAULT_DEPOSIT_PERCENT),
            deposit_type: DepositType::Percentage,
            deposit_fixed_amount: Decimal::ZERO,
            labor_hours_per_assignment: Decimal::from(DEFAULT_LABOR_HOURS),
        }
    }
}

// =============================================================================
// Margin Status
// =============================================================================

/// Margin tier shown next to a dish price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    /// margin ≥ 70
    Excellent,
    /// 50 ≤ margin < 70
    Good,
    /// 0 ≤ margin < 50
    Low,
    /// margin < 0
    Negative,
}

impl MarginStatus {
    /// Buckets a margin percentage. Lower bounds are inclusive: 70 is
    /// excellent, 50 is good, 0 is low.
    pub fn from_margin(margin: Decimal) -> Self {
        if margin >= Decimal::from(EXCELLENT_MARGIN_THRESHOLD) {
            MarginStatus::Excellent
        } else if margin >= Decimal::from(GOOD_MARGIN_THRESHOLD) {
            MarginStatus::Good
        } else if margin >= Decimal::ZERO {
            MarginStatus::Low
        } else {
            MarginStatus::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarginStatus::Excellent => "excellent",
            MarginStatus::Good => "good",
            MarginStatus::Low => "low",
            MarginStatus::Negative => "negative",
        }
    }
}

impl fmt::Display for MarginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of() {
        assert_eq!(Percent::new(8).of(dec!(100)), Some(dec!(8)));
        assert_eq!(Percent::new(dec!(8.25)).of(dec!(1000)), Some(dec!(82.5)));
        assert_eq!(Percent::zero().of(dec!(1000)), Some(Decimal::ZERO));
        assert_eq!(Percent::new(300).of(Decimal::MAX), None);
        assert_eq!(Percent::new(300).fraction(), dec!(3));
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::new(dec!(8.250)).to_string(), "8.25%");
        assert_eq!(Percent::new(15).to_string(), "15%");
    }

    #[test]
    fn test_percent_serializes_transparently() {
        let json = serde_json::to_string(&Percent::new(dec!(8.5))).unwrap();
        assert_eq!(json, "\"8.5\"");

        let parsed: Percent = serde_json::from_str("15").unwrap();
        assert_eq!(parsed, Percent::new(15));
    }

    #[test]
    fn test_line_totals() {
        let item = RecipeItem {
            amount_required: dec!(0.5),
            price_per_unit: dec!(20),
            unit: "kg".to_string(),
        };
        assert_eq!(item.line_cost(), Some(dec!(10)));

        let line = QuoteLineItem {
            name: "Canapés".to_string(),
            quantity: 120,
            unit_price: dec!(3.75),
        };
        assert_eq!(line.line_total(), Some(dec!(450)));

        let absurd = QuoteLineItem {
            unit_price: Decimal::MAX,
            ..line
        };
        assert_eq!(absurd.line_total(), None);
    }

    #[test]
    fn test_labor_estimated_cost() {
        let server = LaborAssignment {
            role: "server".to_string(),
            hourly_rate: dec!(25),
            hours: None,
        };
        assert_eq!(server.estimated_cost(dec!(5)), Some(dec!(125)));

        let chef = LaborAssignment {
            hours: Some(dec!(8)),
            ..server
        };
        assert_eq!(chef.estimated_cost(dec!(5)), Some(dec!(200)));
    }

    #[test]
    fn test_deposit_type_from_label() {
        assert_eq!(DepositType::from_label("fixed"), DepositType::Fixed);
        assert_eq!(DepositType::from_label(" Fixed "), DepositType::Fixed);
        assert_eq!(DepositType::from_label("percentage"), DepositType::Percentage);
        assert_eq!(DepositType::from_label("flat"), DepositType::Percentage);
        assert_eq!(DepositType::from_label(""), DepositType::Percentage);

        assert!(DepositType::is_known_label("FIXED"));
        assert!(!DepositType::is_known_label("flat"));
    }

    #[test]
    fn test_quote_config_defaults() {
        let config = QuoteConfig::default();
        assert_eq!(config.tax_rate_percent, Percent::new(8));
        assert_eq!(config.service_fee_percent, Percent::new(15));
        assert_eq!(config.deposit_percent, Percent::new(25));
        assert_eq!(config.deposit_type, DepositType::Percentage);
        assert_eq!(config.deposit_fixed_amount, Decimal::ZERO);
        assert_eq!(config.labor_hours_per_assignment, dec!(5));
    }

    #[test]
    fn test_deposit_for() {
        let percentage = QuoteConfig::default();
        assert_eq!(percentage.deposit_for(dec!(1000)), Some(dec!(250)));

        let fixed = QuoteConfig {
            deposit_type: DepositType::Fixed,
            deposit_fixed_amount: dec!(500),
            ..QuoteConfig::default()
        };
        assert_eq!(fixed.deposit_for(dec!(1000)), Some(dec!(500)));
        assert_eq!(fixed.deposit_for(dec!(10)), Some(dec!(500)));
    }

    #[test]
    fn test_margin_status_serde_labels() {
        let json = serde_json::to_string(&MarginStatus::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
        assert_eq!(MarginStatus::Negative.to_string(), "negative");
    }
}
