//! # Quote Totals Composer
//!
//! Turns resolved quote lines, staff assignments and a [`QuoteConfig`]
//! into the full customer-facing breakdown.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Σ qty × unit price ─────────► items subtotal ──┐                      │
//! │                                                  ├──► subtotal          │
//! │  Σ hourly rate × hours ──────► labor estimate ──┘        │              │
//! │                                                          │              │
//! │                        service fee = subtotal × fee%     │              │
//! │                                                          ▼              │
//! │                tax = (subtotal + service fee) × tax%   ◄─ CASCADING     │
//! │                                                          │              │
//! │                total = subtotal + service fee + tax      ▼              │
//! │                                                                         │
//! │                deposit = total × deposit%   (or the fixed amount)       │
//! │                balance due = total − deposit                            │
//! │                                                                         │
//! │  Tax is charged on the service fee too. Computing it on the subtotal    │
//! │  alone gives a different (wrong) total for every existing quote.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is checked: a figure that outgrows `Decimal` is a
//! [`CoreError::Overflow`] naming the figure, never a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::input::{QuoteConfigInput, QuoteRequest};
use crate::money::{checked_sum, Money};
use crate::types::{LaborAssignment, QuoteConfig, QuoteLineItem};

// =============================================================================
// Quote Breakdown
// =============================================================================

/// Every figure of a quote, unrounded.
///
/// The quote viewer and the PDF export both print the whole breakdown, so
/// intermediate figures are kept rather than recomputed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    #[ts(as = "String")]
    pub items_subtotal: Decimal,
    #[ts(as = "String")]
    pub labor_estimate: Decimal,
    #[ts(as = "String")]
    pub subtotal: Decimal,
    #[ts(as = "String")]
    pub service_fee_amount: Decimal,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub total: Decimal,
    #[ts(as = "String")]
    pub deposit_amount: Decimal,
    /// What the client still owes once the deposit is paid. Negative when
    /// a fixed deposit exceeds the total.
    #[ts(as = "String")]
    pub balance_due: Decimal,
}

impl QuoteBreakdown {
    /// Strips trailing zeros that decimal multiplication accumulates
    /// (`1614.6000` → `1614.6`). Values are unchanged.
    fn normalized(self) -> Self {
        QuoteBreakdown {
            items_subtotal: self.items_subtotal.normalize(),
            labor_estimate: self.labor_estimate.normalize(),
            subtotal: self.subtotal.normalize(),
            service_fee_amount: self.service_fee_amount.normalize(),
            tax_amount: self.tax_amount.normalize(),
            total: self.total.normalize(),
            deposit_amount: self.deposit_amount.normalize(),
            balance_due: self.balance_due.normalize(),
        }
    }

    /// Settles every figure to cents for export and payment collection.
    ///
    /// Each figure is rounded on its own, exactly as the quote displays it,
    /// so the settled total may differ by a cent from the sum of the settled
    /// parts. The settled balance is the settled total minus the settled
    /// deposit, so deposit and balance always add up to what is charged.
    pub fn settle(&self) -> CoreResult<QuoteTotals> {
        let total = settle_field("total", self.total)?;
        let deposit_amount = settle_field("depositAmount", self.deposit_amount)?;
        let balance_due =
            total
                .checked_sub(deposit_amount)
                .ok_or_else(|| CoreError::AmountOutOfRange {
                    field: "balanceDue".to_string(),
                    amount: self.balance_due,
                })?;

        Ok(QuoteTotals {
            items_subtotal: settle_field("itemsSubtotal", self.items_subtotal)?,
            labor_estimate: settle_field("laborEstimate", self.labor_estimate)?,
            subtotal: settle_field("subtotal", self.subtotal)?,
            service_fee_amount: settle_field("serviceFeeAmount", self.service_fee_amount)?,
            tax_amount: settle_field("taxAmount", self.tax_amount)?,
            total,
            deposit_amount,
            balance_due,
        })
    }
}

fn settle_field(field: &str, amount: Decimal) -> CoreResult<Money> {
    Money::from_decimal(amount).ok_or_else(|| CoreError::AmountOutOfRange {
        field: field.to_string(),
        amount,
    })
}

/// A [`QuoteBreakdown`] settled to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub items_subtotal: Money,
    pub labor_estimate: Money,
    pub subtotal: Money,
    pub service_fee_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
    pub deposit_amount: Money,
    pub balance_due: Money,
}

// =============================================================================
// Composer
// =============================================================================

/// Σ quantity × unit price over the quote lines.
pub fn items_subtotal(lines: &[QuoteLineItem]) -> CoreResult<Decimal> {
    checked_sum("itemsSubtotal", lines.iter().map(QuoteLineItem::line_total))
}

/// Σ hourly rate × hours over the staff assignments, using
/// `default_hours` for assignments with no booked hours.
pub fn estimate_labor(labor: &[LaborAssignment], default_hours: Decimal) -> CoreResult<Decimal> {
    checked_sum(
        "laborEstimate",
        labor
            .iter()
            .map(|assignment| assignment.estimated_cost(default_hours)),
    )
}

/// Composes the full quote breakdown.
///
/// ## Example
/// ```rust
/// use galley_core::quote::compose_quote;
/// use galley_core::types::{QuoteConfig, QuoteLineItem};
/// use rust_decimal::Decimal;
///
/// let lines = vec![QuoteLineItem {
///     name: "Buffet".to_string(),
///     quantity: 100,
///     unit_price: Decimal::from(10),
/// }];
///
/// let quote = compose_quote(&lines, &[], &QuoteConfig::default())?;
/// assert_eq!(quote.subtotal, Decimal::from(1000));
/// assert_eq!(quote.service_fee_amount, Decimal::from(150));  // 15%
/// assert_eq!(quote.tax_amount, Decimal::from(92));           // 8% of 1150
/// assert_eq!(quote.total, Decimal::from(1242));
/// assert_eq!(quote.deposit_amount, Decimal::new(3105, 1));   // 25% of total
/// # Ok::<(), galley_core::CoreError>(())
/// ```
pub fn compose_quote(
    lines: &[QuoteLineItem],
    labor: &[LaborAssignment],
    config: &QuoteConfig,
) -> CoreResult<QuoteBreakdown> {
    let items_subtotal = items_subtotal(lines)?;
    let labor_estimate = estimate_labor(labor, config.labor_hours_per_assignment)?;
    let subtotal = checked_sum("subtotal", [Some(items_subtotal), Some(labor_estimate)])?;

    let service_fee_amount = config
        .service_fee_percent
        .of(subtotal)
        .ok_or_else(|| CoreError::overflow("serviceFeeAmount"))?;
    let tax_amount = subtotal
        .checked_add(service_fee_amount)
        .and_then(|taxable| config.tax_rate_percent.of(taxable))
        .ok_or_else(|| CoreError::overflow("taxAmount"))?;
    let total = checked_sum(
        "total",
        [Some(subtotal), Some(service_fee_amount), Some(tax_amount)],
    )?;

    let deposit_amount = config
        .deposit_for(total)
        .ok_or_else(|| CoreError::overflow("depositAmount"))?;
    let balance_due = total
        .checked_sub(deposit_amount)
        .ok_or_else(|| CoreError::overflow("balanceDue"))?;

    Ok(QuoteBreakdown {
        items_subtotal,
        labor_estimate,
        subtotal,
        service_fee_amount,
        tax_amount,
        total,
        deposit_amount,
        balance_due,
    }
    .normalized())
}

/// Normalizes a raw request (config layered over `operator_defaults`) and
/// composes it.
pub fn compose_quote_request(
    request: &QuoteRequest,
    operator_defaults: &QuoteConfigInput,
) -> CoreResult<QuoteBreakdown> {
    let quote = request.normalize(operator_defaults);
    compose_quote(&quote.lines, &quote.labor, &quote.config)
}

// =============================================================================
// Unit Tests
// =============================================================================
