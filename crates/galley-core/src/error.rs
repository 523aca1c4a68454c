//! # Error Types
//!
//! Domain-specific error types for galley-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  galley-core errors (this file)                                        │
//! │  ├── CoreError        - Overflow / settlement failures                 │
//! │  └── ValidationError  - Strict boundary checks                         │
//! │                                                                         │
//! │  galley-cli errors (app)                                               │
//! │  ├── ConfigError      - Config file / env loading                      │
//! │  └── CliError         - Input reading and parsing                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → anyhow in main         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing numbers are zero, a zero price has a zero margin and an unknown
//! deposit type means percentage, so ordinary input never fails. Errors only
//! appear where the caller asks for them (strict validation), where a figure
//! outgrows `Decimal` (≈ 7.9 × 10²⁸), or where a value leaves the decimal
//! domain (cent settlement).

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A calculated figure does not fit in a `Decimal`.
    ///
    /// ## When This Occurs
    /// - Unvalidated input with absurd amounts or quantities
    /// - A margin over a near-zero selling price
    #[error("{field} overflowed during calculation")]
    Overflow { field: String },

    /// An amount cannot be represented as whole cents in an `i64`.
    ///
    /// ## When This Occurs
    /// - Settling a breakdown whose figures exceed ~92 quadrillion dollars
    ///   (only reachable with unvalidated input)
    #[error("{field} amount {amount} is out of range for settlement")]
    AmountOutOfRange { field: String, amount: Decimal },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn overflow(field: &str) -> Self {
        CoreError::Overflow {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the strict checks in [`crate::validation`], before any
/// calculation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field or collection is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmountOutOfRange {
            field: "total".to_string(),
            amount: Decimal::MAX,
        };
        assert!(err.to_string().starts_with("total amount "));
        assert!(err.to_string().ends_with("is out of range for settlement"));

        let err = CoreError::overflow("margin");
        assert_eq!(err.to_string(), "margin overflowed during calculation");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "lines".to_string(),
        };
        assert_eq!(err.to_string(), "lines is required");

        let err = ValidationError::OutOfRange {
            field: "depositPercent".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        };
        assert_eq!(err.to_string(), "depositPercent must be between 0 and 100");

        let err = ValidationError::NotAllowed {
            field: "depositType".to_string(),
            allowed: vec!["percentage".to_string(), "fixed".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "depositType must be one of: [\"percentage\", \"fixed\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
