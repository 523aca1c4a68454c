//! # Output Rendering
//!
//! Text tables for the terminal and JSON documents for the PDF/email
//! renderers. This is the only place amounts are formatted.
//!
//! ## Quote Text Layout
//! ```text
//! Items subtotal             $1,000.00
//! Labor estimate               $300.00
//! Subtotal                   $1,300.00
//! Service fee (15%)            $195.00
//! Tax (8%)                     $119.60
//! Total                      $1,614.60
//! Deposit (25%)                $403.65
//! Balance due                $1,210.95
//! ```

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use galley_core::costing::DishCosting;
use galley_core::quote::{QuoteBreakdown, QuoteTotals};
use galley_core::{format_currency, DepositType, MarginStatus, QuoteConfig};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CliResult;

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, currency-formatted table
    #[default]
    Text,
    /// Pretty-printed JSON with exact figures
    Json,
}

fn row(label: &str, value: &str) -> String {
    format!("{label:<LABEL_WIDTH$}{value:>AMOUNT_WIDTH$}\n")
}

// =============================================================================
// Quote
// =============================================================================

/// The JSON quote document handed to the PDF/email renderers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub config: &'a QuoteConfig,
    pub breakdown: &'a QuoteBreakdown,
    /// Cent-settled figures for payment collection.
    pub totals: QuoteTotals,
}

pub fn render_quote(
    breakdown: &QuoteBreakdown,
    config: &QuoteConfig,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(quote_table(breakdown, config)),
        OutputFormat::Json => {
            let document = QuoteDocument {
                generated_at,
                config,
                breakdown,
                totals: breakdown.settle()?,
            };
            Ok(serde_json::to_string_pretty(&document)?)
        }
    }
}

fn quote_table(breakdown: &QuoteBreakdown, config: &QuoteConfig) -> String {
    let deposit_label = match config.deposit_type {
        DepositType::Percentage => format!("Deposit ({})", config.deposit_percent),
        DepositType::Fixed => "Deposit (fixed)".to_string(),
    };

    let rows = [
        ("Items subtotal".to_string(), breakdown.items_subtotal),
        ("Labor estimate".to_string(), breakdown.labor_estimate),
        ("Subtotal".to_string(), breakdown.subtotal),
        (
            format!("Service fee ({})", config.service_fee_percent),
            breakdown.service_fee_amount,
        ),
        (
            format!("Tax ({})", config.tax_rate_percent),
            breakdown.tax_amount,
        ),
        ("Total".to_string(), breakdown.total),
        (deposit_label, breakdown.deposit_amount),
        ("Balance due".to_string(), breakdown.balance_due),
    ];

    rows.iter()
        .map(|(label, amount)| row(label, &format_currency(*amount)))
        .collect()
}

// =============================================================================
// Dish Costing
// =============================================================================

pub fn render_dish_costing(costing: &DishCosting, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(costing)?),
        OutputFormat::Text => Ok([
            row("Recipe cost", &format_currency(costing.recipe_cost)),
            row("Suggested price", &format_currency(costing.suggested_price)),
            row("Selling price", &format_currency(costing.selling_price)),
            row(
                "Margin",
                &format!("{}% ({})", costing.margin.round_dp(1).normalize(), costing.status),
            ),
        ]
        .concat()),
    }
}

/// Margin check for an ad-hoc price/cost pair.
#[derive(Debug, Serialize)]
pub struct MarginReport {
    pub margin: Decimal,
    pub status: MarginStatus,
}

pub fn render_margin(report: &MarginReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(row(
            "Margin",
            &format!("{}% ({})", report.margin.round_dp(1).normalize(), report.status),
        )),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
