//! # Input Normalization
//!
//! Raw records as the persistence layer hands them over, and the single
//! step that turns them into [`crate::types`].
//!
//! ## Normalization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  JSON record (fields optional / null)                                  │
//! │       │  serde: malformed numbers rejected here                         │
//! │       ▼                                                                 │
//! │  RecipeItemInput / QuoteLineInput / LaborAssignmentInput               │
//! │       │  normalize(): missing number → 0, missing label → ""            │
//! │       ▼                                                                 │
//! │  RecipeItem / QuoteLineItem / LaborAssignment                          │
//! │                                                                         │
//! │  QuoteConfigInput (event)                                              │
//! │       │  .or(operator defaults)                                         │
//! │       │  .resolve(): missing field → built-in default (never 0)        │
//! │       ▼                                                                 │
//! │  QuoteConfig                                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the asymmetry: a missing *amount* is zero, a missing *config* field
//! is its documented default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{DepositType, LaborAssignment, Percent, QuoteConfig, QuoteLineItem, RecipeItem};

// =============================================================================
// Recipe Item Input
// =============================================================================

/// An ingredient/recipe-link record with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeItemInput {
    #[ts(as = "Option<String>")]
    pub amount_required: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub price_per_unit: Option<Decimal>,
    pub unit: Option<String>,
}

impl RecipeItemInput {
    pub fn normalize(&self) -> RecipeItem {
        RecipeItem {
            amount_required: self.amount_required.unwrap_or_default(),
            price_per_unit: self.price_per_unit.unwrap_or_default(),
            unit: self.unit.clone().unwrap_or_default(),
        }
    }
}

/// Normalizes a whole recipe.
pub fn normalize_recipe(items: &[RecipeItemInput]) -> Vec<RecipeItem> {
    items.iter().map(RecipeItemInput::normalize).collect()
}

// =============================================================================
// Quote Line Input
// =============================================================================

/// A quote line record: catalog price plus an optional per-event override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteLineInput {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    #[ts(as = "Option<String>")]
    pub base_price: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub override_price: Option<Decimal>,
}

impl QuoteLineInput {
    /// The override price wins over the base price; neither means 0.
    pub fn normalize(&self) -> QuoteLineItem {
        QuoteLineItem {
            name: self.name.clone().unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            unit_price: self
                .override_price
                .or(self.base_price)
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Labor Assignment Input
// =============================================================================

/// A staff assignment record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborAssignmentInput {
    pub role: Option<String>,
    #[ts(as = "Option<String>")]
    pub hourly_rate: Option<Decimal>,
    #[ts(as = "Option<String>")]
    pub hours: Option<Decimal>,
}

impl LaborAssignmentInput {
    pub fn normalize(&self) -> LaborAssignment {
        LaborAssignment {
            role: self.role.clone().unwrap_or_default(),
            hourly_rate: self.hourly_rate.unwrap_or_default(),
            hours: self.hours,
        }
    }
}

// =============================================================================
// Quote Config Input
// =============================================================================

/// A partially specified quote configuration.
///
/// `deposit_type` stays a free-form label here: an unknown label is not a
/// parse error, it resolves to [`DepositType::Percentage`].
///
/// Records use camelCase keys. The snake_case aliases are the spelling of
/// operator TOML files and `GALLEY_QUOTE__*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteConfigInput {
    #[serde(alias = "tax_rate_percent")]
    #[ts(as = "Option<String>")]
    pub tax_rate_percent: Option<Decimal>,
    #[serde(alias = "service_fee_percent")]
    #[ts(as = "Option<String>")]
    pub service_fee_percent: Option<Decimal>,
    #[serde(alias = "deposit_percent")]
    #[ts(as = "Option<String>")]
    pub deposit_percent: Option<Decimal>,
    #[serde(alias = "deposit_type")]
    pub deposit_type: Option<String>,
    #[serde(alias = "deposit_fixed_amount")]
    #[ts(as = "Option<String>")]
    pub deposit_fixed_amount: Option<Decimal>,
    #[serde(alias = "labor_hours_per_assignment")]
    #[ts(as = "Option<String>")]
    pub labor_hours_per_assignment: Option<Decimal>,
}

impl QuoteConfigInput {
    /// Layers `self` over `fallback`, field by field.
    ///
    /// ## Example
    /// ```rust
    /// use galley_core::input::QuoteConfigInput;
    /// use rust_decimal::Decimal;
    ///
    /// let event = QuoteConfigInput {
    ///     tax_rate_percent: Some(Decimal::from(9)),
    ///     ..Default::default()
    /// };
    /// let operator = QuoteConfigInput {
    ///     tax_rate_percent: Some(Decimal::from(7)),
    ///     service_fee_percent: Some(Decimal::from(18)),
    ///     ..Default::default()
    /// };
    ///
    /// let merged = event.or(&operator);
    /// assert_eq!(merged.tax_rate_percent, Some(Decimal::from(9)));
    /// assert_eq!(merged.service_fee_percent, Some(Decimal::from(18)));
    /// ```
    pub fn or(&self, fallback: &QuoteConfigInput) -> QuoteConfigInput {
        QuoteConfigInput {
            tax_rate_percent: self.tax_rate_percent.or(fallback.tax_rate_percent),
            service_fee_percent: self.service_fee_percent.or(fallback.service_fee_percent),
            deposit_percent: self.deposit_percent.or(fallback.deposit_percent),
            deposit_type: self
                .deposit_type
                .clone()
                .or_else(|| fallback.deposit_type.clone()),
            deposit_fixed_amount: self.deposit_fixed_amount.or(fallback.deposit_fixed_amount),
            labor_hours_per_assignment: self
                .labor_hours_per_assignment
                .or(fallback.labor_hours_per_assignment),
        }
    }

    /// Fills every missing field from [`QuoteConfig::default`].
    pub fn resolve(&self) -> QuoteConfig {
        let defaults = QuoteConfig::default();

        QuoteConfig {
            tax_rate_percent: self
                .tax_rate_percent
                .map(Percent::new)
                .unwrap_or(defaults.tax_rate_percent),
            service_fee_percent: self
                .service_fee_percent
                .map(Percent::new)
                .unwrap_or(defaults.service_fee_percent),
            deposit_percent: self
                .deposit_percent
                .map(Percent::new)
                .unwrap_or(defaults.deposit_percent),
            deposit_type: self
                .deposit_type
                .as_deref()
                .map(DepositType::from_label)
                .unwrap_or(defaults.deposit_type),
            deposit_fixed_amount: self
                .deposit_fixed_amount
                .unwrap_or(defaults.deposit_fixed_amount),
            labor_hours_per_assignment: self
                .labor_hours_per_assignment
                .unwrap_or(defaults.labor_hours_per_assignment),
        }
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// Everything needed to price one event: its lines, its staff and its own
/// (possibly partial, possibly absent) config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    pub lines: Vec<QuoteLineInput>,
    pub labor: Vec<LaborAssignmentInput>,
    pub config: Option<QuoteConfigInput>,
}

/// A quote request after normalization, ready for the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuote {
    pub lines: Vec<QuoteLineItem>,
    pub labor: Vec<LaborAssignment>,
    pub config: QuoteConfig,
}

impl QuoteRequest {
    /// Normalizes every record and resolves the config as
    /// event → `operator_defaults` → built-in defaults.
    pub fn normalize(&self, operator_defaults: &QuoteConfigInput) -> NormalizedQuote {
        let config = self
            .config
            .as_ref()
            .map(|event| event.or(operator_defaults))
            .unwrap_or_else(|| operator_defaults.clone())
            .resolve();

        NormalizedQuote {
            lines: self.lines.iter().map(QuoteLineInput::normalize).collect(),
            labor: self.labor.iter().map(LaborAssignmentInput::normalize).collect(),
            config,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
