//! # galley-core: Pure Costing & Quoting for Galley
//!
//! This crate is the calculation engine behind the catering app's recipe
//! editor, quote viewer and quote PDF. Every function is pure: no I/O, no
//! clock, no logging, no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Galley Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Web app / PDF export / galley CLI (presentation)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON records                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ galley-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────┐ │   │
//! │  │   │  input  │─►│ costing │  │  quote  │  │  money  │  │valid-│ │   │
//! │  │   │normalize│─►│ recipe  │  │ totals  │  │ format  │  │ation │ │   │
//! │  │   │         │  │ margin  │  │ deposit │  │ settle  │  │      │ │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘  └──────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Normalized entities (RecipeItem, QuoteLineItem, QuoteConfig, ...)
//! - [`input`] - Raw optional records and the one normalization step
//! - [`costing`] - Recipe cost, suggested price, margin tiers
//! - [`quote`] - Quote breakdown with cascading tax and deposit
//! - [`money`] - Cent settlement and currency formatting
//! - [`validation`] - Opt-in strict checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, every time
//! 2. **Exact Decimals**: amounts are `Decimal`, rounded only when displayed or settled
//! 3. **Lenient Engine**: missing numbers are zero, unknown labels fall back to defaults
//! 4. **Resolve Once**: config defaults are applied at the boundary, not per call
//!
//! ## Example Usage
//!
//! ```rust
//! use galley_core::input::{QuoteConfigInput, QuoteRequest};
//! use galley_core::money::format_currency;
//! use galley_core::quote::compose_quote_request;
//!
//! let request: QuoteRequest = serde_json::from_str(
//!     r#"{"lines": [{"name": "Buffet", "quantity": 100, "basePrice": 10}]}"#,
//! ).unwrap();
//!
//! let quote = compose_quote_request(&request, &QuoteConfigInput::default())?;
//! assert_eq!(format_currency(quote.total), "$1,242.00");
//! assert_eq!(format_currency(quote.deposit_amount), "$310.50");
//! assert_eq!(format_currency(quote.balance_due), "$931.50");
//! # Ok::<(), galley_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod costing;
pub mod error;
pub mod input;
pub mod money;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_currency, Money};
pub use rust_decimal::Decimal;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================
// Existing quotes and historical figures were computed with these values.
// Changing one changes every recomputed quote.

/// Default markup over ingredient cost: 300% (selling price = 4× cost).
pub const DEFAULT_MARKUP_PERCENT: u32 = 300;

/// Default sales tax, applied to subtotal + service fee.
pub const DEFAULT_TAX_RATE_PERCENT: u32 = 8;

/// Default service fee, applied to the subtotal.
pub const DEFAULT_SERVICE_FEE_PERCENT: u32 = 15;

/// Default deposit share of the final total.
pub const DEFAULT_DEPOSIT_PERCENT: u32 = 25;

/// Hours assumed per staff assignment when none are booked.
pub const DEFAULT_LABOR_HOURS: u32 = 5;

/// Lowest margin (inclusive) rated excellent.
pub const EXCELLENT_MARGIN_THRESHOLD: u32 = 70;

/// Lowest margin (inclusive) rated good.
pub const GOOD_MARGIN_THRESHOLD: u32 = 50;

/// Maximum quantity on one quote line (strict validation only).
///
/// ## Business Reason
/// Large weddings and conferences reach a few thousand covers; anything
/// past this is a typo.
pub const MAX_LINE_QUANTITY: u32 = 100_000;

/// Maximum single amount accepted by strict validation.
pub const MAX_AMOUNT: u64 = 1_000_000_000;

/// Maximum tax / service-fee rate accepted by strict validation.
pub const MAX_RATE_PERCENT: u32 = 100;
