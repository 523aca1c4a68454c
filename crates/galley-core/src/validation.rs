//! # Validation Module
//!
//! Strict input checks for callers that want to reject bad records instead
//! of pricing them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Non-numeric amounts, negative quantities                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Normalization (always)                                       │
//! │  └── Missing amounts → 0, missing config → defaults                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE (opt-in, e.g. `galley quote --strict`)           │
//! │  ├── Quantities positive and bounded                                   │
//! │  ├── Prices / rates non-negative and bounded                           │
//! │  └── Deposit type label known                                          │
//! │                                                                         │
//! │  The composer never calls these: a lenient quote still prices.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use galley_core::validation::{validate_deposit_percent, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_quantity("quantity", 120).is_ok());
//! assert!(validate_deposit_percent(Decimal::from(101)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::input::{QuoteConfigInput, QuoteRequest};
use crate::types::{DepositType, LaborAssignment, QuoteConfig, QuoteLineItem, RecipeItem};
use crate::{MAX_AMOUNT, MAX_LINE_QUANTITY, MAX_RATE_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(field: &str, qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ONE,
            max: Decimal::from(MAX_LINE_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a monetary amount or physical quantity.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items, comped staff)
/// - Must not exceed MAX_AMOUNT
pub fn validate_amount(field: &str, amount: Decimal) -> ValidationResult<()> {
    check_range(field, amount, Decimal::from(MAX_AMOUNT))
}

/// Validates a tax / service-fee rate in percent (0 to MAX_RATE_PERCENT).
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    check_range(field, percent, Decimal::from(MAX_RATE_PERCENT))
}

/// Validates a deposit percentage (0 to 100).
pub fn validate_deposit_percent(percent: Decimal) -> ValidationResult<()> {
    check_range("depositPercent", percent, Decimal::ONE_HUNDRED)
}

fn check_range(field: &str, value: Decimal, max: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max,
        });
    }

    Ok(())
}

/// Validates a persisted deposit type label.
///
/// The lenient path maps unknown labels to percentage; this rejects them.
pub fn validate_deposit_type_label(label: &str) -> ValidationResult<()> {
    if DepositType::is_known_label(label) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "depositType".to_string(),
        allowed: DepositType::LABELS.iter().map(|l| l.to_string()).collect(),
    })
}

// =============================================================================
// Record Validators
// =============================================================================

pub fn validate_recipe_item(item: &RecipeItem) -> ValidationResult<()> {
    validate_amount("amountRequired", item.amount_required)?;
    validate_amount("pricePerUnit", item.price_per_unit)?;
    Ok(())
}

pub fn validate_line(line: &QuoteLineItem) -> ValidationResult<()> {
    validate_quantity("quantity", line.quantity)?;
    validate_amount("unitPrice", line.unit_price)?;
    Ok(())
}

pub fn validate_labor(assignment: &LaborAssignment) -> ValidationResult<()> {
    validate_amount("hourlyRate", assignment.hourly_rate)?;
    if let Some(hours) = assignment.hours {
        validate_amount("hours", hours)?;
    }
    Ok(())
}

pub fn validate_quote_config(config: &QuoteConfig) -> ValidationResult<()> {
    validate_percent("taxRatePercent", config.tax_rate_percent.value())?;
    validate_percent("serviceFeePercent", config.service_fee_percent.value())?;
    validate_deposit_percent(config.deposit_percent.value())?;
    validate_amount("depositFixedAmount", config.deposit_fixed_amount)?;
    validate_amount("laborHoursPerAssignment", config.labor_hours_per_assignment)?;
    Ok(())
}

/// Runs every strict check over a raw quote request.
///
/// ## Rules
/// - At least one line or one staff assignment
/// - Every line / assignment valid after normalization
/// - Every deposit type label (event and operator) known
/// - The resolved config within range
pub fn validate_quote_request(
    request: &QuoteRequest,
    operator_defaults: &QuoteConfigInput,
) -> ValidationResult<()> {
    if request.lines.is_empty() && request.labor.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    for label in [
        request.config.as_ref().and_then(|c| c.deposit_type.as_deref()),
        operator_defaults.deposit_type.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        validate_deposit_type_label(label)?;
    }

    let quote = request.normalize(operator_defaults);
    quote.lines.iter().try_for_each(validate_line)?;
    quote.labor.iter().try_for_each(validate_labor)?;
    validate_quote_config(&quote.config)
}

// =============================================================================
// Unit Tests
// =============================================================================
