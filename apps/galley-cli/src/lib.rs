//! # Galley CLI
//!
//! Command-line boundary around `galley-core`: reads JSON records, applies
//! operator configuration and prints costings and quotes.
//!
//! ## Commands
//! ```text
//! galley recipe-cost --input risotto.json [--markup 250] [--price 18.50] [--strict]
//! galley margin --price 18.50 --cost 4.20
//! galley quote --input wedding.json [--format json] [--strict]
//! ```
//!
//! `--input -` reads standard input. Results go to stdout; logs go to
//! stderr.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::RecipePricing;
use crate::config::AppConfig;
use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "galley", version, about = "Catering cost and quote engine")]
pub struct Cli {
    /// Config file (default: ./galley.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cost a recipe and suggest a selling price
    RecipeCost {
        /// JSON array of recipe items, or - for stdin
        #[arg(short, long, value_name = "FILE")]
        input: String,

        /// Markup percent over cost (default from config, else 300)
        #[arg(long, allow_negative_numbers = true)]
        markup: Option<Decimal>,

        /// Manual selling price, replacing the suggested price
        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Reject negative or out-of-range amounts
        #[arg(long)]
        strict: bool,
    },

    /// Margin and status of a price/cost pair
    Margin {
        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        cost: Decimal,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Compose an event quote
    Quote {
        /// JSON quote request, or - for stdin
        #[arg(short, long, value_name = "FILE")]
        input: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Reject input the engine would otherwise default or coerce
        #[arg(long)]
        strict: bool,
    },
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: INFO
/// - `-v`: DEBUG, `-vv`: TRACE
/// - `RUST_LOG` wins over both, e.g. `RUST_LOG=galley_cli=trace`
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one parsed command and returns what should be printed.
pub fn run(cli: Cli) -> anyhow::Result<String> {
    let app = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?app, "Configuration loaded");

    let output = match cli.command {
        Command::RecipeCost {
            input,
            markup,
            price,
            format,
            strict,
        } => {
            let text = commands::read_input(&input)?;
            let pricing = RecipePricing {
                markup,
                price,
                strict,
            };
            commands::recipe_cost(&app, &input, &text, pricing, format)
                .with_context(|| format!("Failed to cost recipe from {input}"))?
        }
        Command::Margin {
            price,
            cost,
            format,
        } => commands::margin(price, cost, format)?,
        Command::Quote {
            input,
            format,
            strict,
        } => {
            let text = commands::read_input(&input)?;
            commands::quote(&app, &input, &text, strict, format, Utc::now())
                .with_context(|| format!("Failed to compose quote from {input}"))?
        }
    };

    Ok(output)
}
