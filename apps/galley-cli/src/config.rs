//! Operator configuration for the `galley` binary.
//!
//! ## Configuration Sources (lowest to highest priority)
//! 1. Built-in defaults (galley-core constants)
//! 2. Config file (`--config <path>`, else an optional `galley.toml`)
//! 3. Environment variables (`GALLEY_QUOTE__TAX_RATE_PERCENT=9.5`)
//!
//! An event's own config, read from the quote input, still wins over all
//! three; see [`galley_core::input::QuoteRequest::normalize`].
//!
//! ```toml
//! [quote]
//! tax_rate_percent = 8.875
//! service_fee_percent = 18
//! deposit_type = "fixed"
//! deposit_fixed_amount = 500
//!
//! [pricing]
//! markup_percent = 250
//! ```

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use galley_core::input::QuoteConfigInput;
use galley_core::validation::{validate_deposit_type_label, validate_quote_config};
use galley_core::{ValidationError, DEFAULT_MARKUP_PERCENT};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Base name of the optional config file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "galley";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GALLEY";

/// Operator-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Quote defaults layered under every event's own config.
    pub quote: QuoteConfigInput,

    /// Recipe pricing settings.
    pub pricing: PricingConfig,
}

/// Recipe pricing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Markup used for suggested prices when `--markup` is not given.
    pub markup_percent: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            markup_percent: Decimal::from(DEFAULT_MARKUP_PERCENT),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// An explicit `path` must exist; the default `galley.toml` may not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Self::build(Config::builder().add_source(file).add_source(env_source()))
    }

    /// Deserializes and validates an assembled builder.
    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Operator defaults as a partial quote config.
    pub fn quote_defaults(&self) -> QuoteConfigInput {
        self.quote.clone()
    }

    /// Operator settings are checked strictly: a typo in a config file
    /// should stop the tool, not silently price every quote differently.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(label) = self.quote.deposit_type.as_deref() {
            validate_deposit_type_label(label)?;
        }
        validate_quote_config(&self.quote_defaults().resolve())?;
        Ok(())
    }
}

/// `GALLEY_<SECTION>__<KEY>` environment variables.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use galley_core::{DepositType, Percent};
    use rust_decimal_macros::dec;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_empty_config_uses_builtin_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.pricing.markup_percent, dec!(300));
        assert_eq!(config.quote_defaults(), QuoteConfigInput::default());
    }

    #[test]
    fn test_toml_sections() {
        let config = from_toml(
            r#"
            [quote]
            tax_rate_percent = 8.875
            service_fee_percent = 18
            deposit_type = "fixed"
            deposit_fixed_amount = 500

            [pricing]
            markup_percent = 250
            "#,
        )
        .unwrap();

        let resolved = config.quote_defaults().resolve();
        assert_eq!(resolved.tax_rate_percent, Percent::new(dec!(8.875)));
        assert_eq!(resolved.service_fee_percent, Percent::new(18));
        assert_eq!(resolved.deposit_type, DepositType::Fixed);
        assert_eq!(resolved.deposit_fixed_amount, dec!(500));
        assert_eq!(resolved.deposit_percent, Percent::new(25));
        assert_eq!(config.pricing.markup_percent, dec!(250));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut vars = config::Map::new();
        vars.insert(
            "GALLEY_QUOTE__TAX_RATE_PERCENT".to_string(),
            "9.5".to_string(),
        );

        let builder = Config::builder()
            .add_source(File::from_str(
                "[quote]\ntax_rate_percent = 7\nservice_fee_percent = 12",
                FileFormat::Toml,
            ))
            .add_source(env_source().source(Some(vars)));
        let config = AppConfig::build(builder).unwrap();

        assert_eq!(config.quote.tax_rate_percent, Some(dec!(9.5)));
        assert_eq!(config.quote.service_fee_percent, Some(dec!(12)));
    }

    #[test]
    fn test_every_quote_key_from_env() {
        let vars: config::Map<String, String> = [
            ("GALLEY_QUOTE__TAX_RATE_PERCENT", "6"),
            ("GALLEY_QUOTE__SERVICE_FEE_PERCENT", "10"),
            ("GALLEY_QUOTE__DEPOSIT_PERCENT", "40"),
            ("GALLEY_QUOTE__DEPOSIT_TYPE", "fixed"),
            ("GALLEY_QUOTE__DEPOSIT_FIXED_AMOUNT", "250"),
            ("GALLEY_QUOTE__LABOR_HOURS_PER_ASSIGNMENT", "6.5"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let builder = Config::builder().add_source(env_source().source(Some(vars)));
        let config = AppConfig::build(builder).unwrap();

        assert_eq!(
            config.quote_defaults(),
            QuoteConfigInput {
                tax_rate_percent: Some(dec!(6)),
                service_fee_percent: Some(dec!(10)),
                deposit_percent: Some(dec!(40)),
                deposit_type: Some("fixed".to_string()),
                deposit_fixed_amount: Some(dec!(250)),
                labor_hours_per_assignment: Some(dec!(6.5)),
            }
        );
    }

    #[test]
    fn test_labor_hours_from_toml() {
        let config = from_toml("[quote]\nlabor_hours_per_assignment = 4").unwrap();
        assert_eq!(config.quote_defaults().resolve().labor_hours_per_assignment, dec!(4));
    }

    #[test]
    fn test_unknown_deposit_type_rejected() {
        let err = from_toml("[quote]\ndeposit_type = \"flat\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ValidationError::NotAllowed { .. })));
    }

    #[test]
    fn test_out_of_range_deposit_rejected() {
        let err = from_toml("[quote]\ndeposit_percent = 120").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/galley.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
