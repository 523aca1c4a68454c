//! # Costing Module
//!
//! Recipe cost, suggested price and margin for a single dish.
//!
//! ## Costing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [RecipeItem] ──► calculate_recipe_cost ──► cost                       │
//! │                                              │                          │
//! │                    suggest_price(cost, 300%) ▼                          │
//! │                                        suggested price                  │
//! │                                              │                          │
//! │        manual price (optional) ──────────────┤                          │
//! │                                              ▼                          │
//! │                            calculate_margin(price, cost) ──► margin %   │
//! │                                                                │        │
//! │                                      MarginStatus::from_margin ▼        │
//! │                                                excellent/good/low/neg   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use galley_core::costing::{calculate_margin, calculate_recipe_cost, suggest_price};
//! use galley_core::types::{MarginStatus, RecipeItem};
//! use rust_decimal::Decimal;
//!
//! let recipe = vec![RecipeItem {
//!     amount_required: Decimal::from(2),
//!     price_per_unit: Decimal::from(5),
//!     unit: "kg".to_string(),
//! }];
//!
//! let cost = calculate_recipe_cost(&recipe)?;       // $10
//! let price = suggest_price(cost)?;                 // $40 (4× cost)
//! let margin = calculate_margin(price, cost)?;      // 75%
//! assert_eq!(MarginStatus::from_margin(margin), MarginStatus::Excellent);
//! # Ok::<(), galley_core::CoreError>(())
//! ```
//!
//! Every function returns [`CoreError::Overflow`] rather than panicking when
//! a figure outgrows `Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::checked_sum;
use crate::types::{MarginStatus, Percent, RecipeItem};
use crate::DEFAULT_MARKUP_PERCENT;

// =============================================================================
// Recipe Cost Aggregator
// =============================================================================

/// Sums `price_per_unit × amount_required` over a recipe. Empty is 0.
pub fn calculate_recipe_cost(items: &[RecipeItem]) -> CoreResult<Decimal> {
    checked_sum("recipeCost", items.iter().map(RecipeItem::line_cost))
}

// =============================================================================
// Price Suggestion Engine
// =============================================================================

/// Suggested selling price at the default 300% markup (4× cost).
#[inline]
pub fn suggest_price(cost: Decimal) -> CoreResult<Decimal> {
    suggest_price_with_markup(cost, Decimal::from(DEFAULT_MARKUP_PERCENT))
}

/// `cost × (1 + markup_percent / 100)`.
///
/// A negative markup is allowed and prices below cost; judging whether that
/// makes sense is the caller's business.
pub fn suggest_price_with_markup(cost: Decimal, markup_percent: Decimal) -> CoreResult<Decimal> {
    Decimal::ONE
        .checked_add(Percent::new(markup_percent).fraction())
        .and_then(|factor| cost.checked_mul(factor))
        .ok_or_else(|| CoreError::overflow("suggestedPrice"))
}

// =============================================================================
// Margin Classifier
// =============================================================================

/// Profit share of the selling price, in percent.
///
/// A zero price has a margin of 0 rather than a division by zero.
pub fn calculate_margin(price: Decimal, cost: Decimal) -> CoreResult<Decimal> {
    if price.is_zero() {
        return Ok(Decimal::ZERO);
    }
    price
        .checked_sub(cost)
        .and_then(|profit| profit.checked_div(price))
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| CoreError::overflow("margin"))
}

/// Buckets a margin percentage; see [`MarginStatus::from_margin`].
#[inline]
pub fn margin_status(margin: Decimal) -> MarginStatus {
    MarginStatus::from_margin(margin)
}

// =============================================================================
// Dish Costing
// =============================================================================

/// The costing panel of one menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DishCosting {
    #[ts(as = "String")]
    pub recipe_cost: Decimal,
    #[ts(as = "String")]
    pub suggested_price: Decimal,
    /// The manual price when one is set, else the suggested price.
    #[ts(as = "String")]
    pub selling_price: Decimal,
    #[ts(as = "String")]
    pub margin: Decimal,
    pub status: MarginStatus,
}

impl DishCosting {
    /// Runs the full pipeline for one dish.
    pub fn evaluate(
        items: &[RecipeItem],
        manual_price: Option<Decimal>,
        markup_percent: Decimal,
    ) -> CoreResult<Self> {
        let recipe_cost = calculate_recipe_cost(items)?;
        let suggested_price = suggest_price_with_markup(recipe_cost, markup_percent)?;
        let selling_price = manual_price.unwrap_or(suggested_price);
        let margin = calculate_margin(selling_price, recipe_cost)?;

        Ok(DishCosting {
            recipe_cost: recipe_cost.normalize(),
            suggested_price: suggested_price.normalize(),
            selling_price: selling_price.normalize(),
            margin: margin.normalize(),
            status: margin_status(margin),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(amount_required: Decimal, price_per_unit: Decimal) -> RecipeItem {
        RecipeItem {
            amount_required,
            price_per_unit,
            unit: "kg".to_string(),
        }
    }

    fn cost_of(recipe: &[RecipeItem]) -> Decimal {
        calculate_recipe_cost(recipe).unwrap()
    }

    fn margin(price: Decimal, cost: Decimal) -> Decimal {
        calculate_margin(price, cost).unwrap()
    }

    #[test]
    fn test_recipe_cost_empty_is_zero() {
        assert_eq!(cost_of(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_recipe_cost_sums_lines() {
        let recipe = vec![item(dec!(2), dec!(10)), item(dec!(0.5), dec!(20))];
        assert_eq!(cost_of(&recipe), dec!(30));
    }

    #[test]
    fn test_recipe_cost_free_ingredients() {
        let recipe = vec![
            item(dec!(2), Decimal::ZERO),
            item(dec!(1000), Decimal::ZERO),
            item(dec!(0.001), Decimal::ZERO),
        ];
        assert_eq!(cost_of(&recipe), Decimal::ZERO);
    }

    /// 0.1 + 0.2 stays 0.3.
    #[test]
    fn test_recipe_cost_is_exact() {
        let recipe = vec![item(dec!(1), dec!(0.1)), item(dec!(1), dec!(0.2))];
        assert_eq!(cost_of(&recipe), dec!(0.3));
    }

    #[test]
    fn test_recipe_cost_overflow_is_an_error() {
        let line = vec![item(dec!(1000), Decimal::MAX)];
        let err = calculate_recipe_cost(&line).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { ref field } if field == "recipeCost"));

        let sum = vec![item(dec!(1), Decimal::MAX), item(dec!(1), Decimal::MAX)];
        assert!(calculate_recipe_cost(&sum).is_err());
    }

    #[test]
    fn test_suggest_price() {
        assert_eq!(suggest_price(dec!(10)).unwrap(), dec!(40));
        assert_eq!(suggest_price_with_markup(dec!(10), dec!(50)).unwrap(), dec!(15));
        assert_eq!(suggest_price_with_markup(dec!(10), Decimal::ZERO).unwrap(), dec!(10));
    }

    #[test]
    fn test_suggest_price_zero_cost() {
        for markup in [dec!(0), dec!(50), dec!(300), dec!(-40), dec!(1000)] {
            assert_eq!(suggest_price_with_markup(Decimal::ZERO, markup).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_suggest_price_negative_markup_goes_below_cost() {
        assert_eq!(suggest_price_with_markup(dec!(10), dec!(-20)).unwrap(), dec!(8));
    }

    #[test]
    fn test_suggest_price_never_below_cost_for_non_negative_markup() {
        for cost in [dec!(0), dec!(0.01), dec!(7.35), dec!(1200)] {
            for markup in [dec!(0), dec!(1), dec!(300)] {
                assert!(suggest_price_with_markup(cost, markup).unwrap() >= cost);
            }
        }
    }

    #[test]
    fn test_suggest_price_overflow_is_an_error() {
        let err = suggest_price(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { ref field } if field == "suggestedPrice"));
    }

    #[test]
    fn test_calculate_margin() {
        assert_eq!(margin(dec!(200), dec!(100)), dec!(50));
        assert_eq!(margin(Decimal::ZERO, dec!(100)), Decimal::ZERO);
        assert_eq!(margin(dec!(100), dec!(150)), dec!(-50));
        assert_eq!(margin(dec!(40), dec!(10)), dec!(75));
    }

    /// A huge cost over a near-zero price would divide past `Decimal::MAX`.
    #[test]
    fn test_margin_overflow_is_an_error() {
        let err = calculate_margin(dec!(0.0000000001), dec!(100000000000000000000)).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { ref field } if field == "margin"));

        assert!(calculate_margin(Decimal::MAX, Decimal::MIN).is_err());
    }

    #[test]
    fn test_margin_status_boundaries() {
        let cases = [
            (dec!(-1), MarginStatus::Negative),
            (dec!(0), MarginStatus::Low),
            (dec!(49), MarginStatus::Low),
            (dec!(50), MarginStatus::Good),
            (dec!(69), MarginStatus::Good),
            (dec!(70), MarginStatus::Excellent),
            (dec!(80), MarginStatus::Excellent),
        ];
        for (margin, expected) in cases {
            assert_eq!(margin_status(margin), expected, "margin {margin}");
        }
    }

    #[test]
    fn test_margin_status_just_below_thresholds() {
        assert_eq!(margin_status(dec!(69.999)), MarginStatus::Good);
        assert_eq!(margin_status(dec!(49.999)), MarginStatus::Low);
        assert_eq!(margin_status(dec!(-0.001)), MarginStatus::Negative);
    }

    #[test]
    fn test_dish_costing_with_suggested_price() {
        let recipe = vec![item(dec!(2), dec!(10)), item(dec!(0.5), dec!(20))];
        let costing =
            DishCosting::evaluate(&recipe, None, Decimal::from(DEFAULT_MARKUP_PERCENT)).unwrap();

        assert_eq!(costing.recipe_cost, dec!(30));
        assert_eq!(costing.suggested_price, dec!(120));
        assert_eq!(costing.selling_price, dec!(120));
        assert_eq!(costing.margin, dec!(75));
        assert_eq!(costing.status, MarginStatus::Excellent);
    }

    #[test]
    fn test_dish_costing_with_manual_price() {
        let recipe = vec![item(dec!(1), dec!(30))];
        let costing = DishCosting::evaluate(&recipe, Some(dec!(25)), dec!(300)).unwrap();

        assert_eq!(costing.suggested_price, dec!(120));
        assert_eq!(costing.selling_price, dec!(25));
        assert_eq!(costing.margin, dec!(-20));
        assert_eq!(costing.status, MarginStatus::Negative);
    }

    #[test]
    fn test_dish_costing_empty_recipe_free_dish() {
        let costing = DishCosting::evaluate(&[], None, dec!(300)).unwrap();
        assert_eq!(costing.selling_price, Decimal::ZERO);
        assert_eq!(costing.margin, Decimal::ZERO);
        assert_eq!(costing.status, MarginStatus::Low);
    }
}
