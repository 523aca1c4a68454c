//! # Command Handlers
//!
//! One function per subcommand. Each takes already-read input text and
//! returns the rendered output, so the handlers never touch stdin/stdout
//! themselves.
//!
//! ## Quote Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quote.json ──► QuoteRequest ──► (--strict) validate_quote_request      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │        normalize(operator defaults from AppConfig)                      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               compose_quote ──► render_quote (text | json)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Read;

use chrono::{DateTime, Utc};
use galley_core::costing::{calculate_margin, margin_status, DishCosting};
use galley_core::input::{normalize_recipe, QuoteRequest, RecipeItemInput};
use galley_core::quote::compose_quote;
use galley_core::validation::{validate_quote_request, validate_recipe_item};
use galley_core::DepositType;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_dish_costing, render_margin, render_quote, MarginReport, OutputFormat};

/// Path value that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Reads a command's input file, or stdin for `-`.
pub fn read_input(path: &str) -> CliResult<String> {
    let read_error = |source| CliError::Read {
        path: path.to_string(),
        source,
    };

    if path == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_error)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(read_error)
    }
}

fn parse_json<T: DeserializeOwned>(source: &str, text: &str) -> CliResult<T> {
    serde_json::from_str(text).map_err(|e| CliError::Parse {
        path: source.to_string(),
        source: e,
    })
}

// =============================================================================
// recipe-cost
// =============================================================================

/// Pricing options of `galley recipe-cost`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipePricing {
    pub markup: Option<Decimal>,
    pub price: Option<Decimal>,
    pub strict: bool,
}

/// Costs one dish from a JSON array of recipe records.
///
/// `markup` falls back to the configured markup; `price` replaces the
/// suggested price as the selling price.
pub fn recipe_cost(
    app: &AppConfig,
    source: &str,
    text: &str,
    pricing: RecipePricing,
    format: OutputFormat,
) -> CliResult<String> {
    let records: Vec<RecipeItemInput> = parse_json(source, text)?;
    let recipe = normalize_recipe(&records);
    if pricing.strict {
        recipe.iter().try_for_each(validate_recipe_item)?;
    }
    let RecipePricing { markup, price, .. } = pricing;
    let markup = markup.unwrap_or(app.pricing.markup_percent);

    debug!(ingredients = recipe.len(), %markup, "Costing recipe");
    let costing = DishCosting::evaluate(&recipe, price, markup)?;
    info!(
        cost = %costing.recipe_cost,
        price = %costing.selling_price,
        status = %costing.status,
        "Recipe costed"
    );

    render_dish_costing(&costing, format)
}

// =============================================================================
// margin
// =============================================================================

pub fn margin(price: Decimal, cost: Decimal, format: OutputFormat) -> CliResult<String> {
    let margin = calculate_margin(price, cost)?;
    let report = MarginReport {
        margin,
        status: margin_status(margin),
    };
    render_margin(&report, format)
}

// =============================================================================
// quote
// =============================================================================

/// Composes a quote from a JSON [`QuoteRequest`].
///
/// Without `strict`, input is accepted the way the engine accepts it:
/// missing figures are zero and unknown deposit types fall back to a
/// percentage deposit. With `strict`, anything the validation rules reject
/// fails the command instead.
pub fn quote(
    app: &AppConfig,
    source: &str,
    text: &str,
    strict: bool,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> CliResult<String> {
    let request: QuoteRequest = parse_json(source, text)?;
    let operator_defaults = app.quote_defaults();

    if strict {
        validate_quote_request(&request, &operator_defaults)?;
    } else if let Some(label) = request
        .config
        .as_ref()
        .and_then(|config| config.deposit_type.as_deref())
        .filter(|label| !DepositType::is_known_label(label))
    {
        warn!(deposit_type = label, "Unknown deposit type, using percentage");
    }

    let normalized = request.normalize(&operator_defaults);
    debug!(
        lines = normalized.lines.len(),
        staff = normalized.labor.len(),
        tax = %normalized.config.tax_rate_percent,
        fee = %normalized.config.service_fee_percent,
        deposit = normalized.config.deposit_type.as_str(),
        "Composing quote"
    );

    let breakdown = compose_quote(&normalized.lines, &normalized.labor, &normalized.config)?;
    info!(
        total = %breakdown.total,
        deposit = %breakdown.deposit_amount,
        "Quote composed"
    );

    render_quote(&breakdown, &normalized.config, format, generated_at)
}

// =============================================================================
// Unit Tests
// =============================================================================
