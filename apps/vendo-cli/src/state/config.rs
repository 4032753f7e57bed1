//! # Configuration State
//!
//! Stores driver configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VENDO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::env;
use vendo_core::Money;

/// Largest accepted `VENDO_CURRENCY_DECIMALS`.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    /// Name printed in reports
    pub machine_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// How the demo prints its results
    pub output: OutputFormat,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

/// Output format of the driver.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,

    /// Pretty-printed JSON document
    Json,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            machine_name: "Vendo Demo Machine".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            output: OutputFormat::Text,
            log_filter: "info,vendo=debug".to_string(),
        }
    }
}

impl MachineConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `VENDO_MACHINE_NAME`: Override machine name
    /// - `VENDO_CURRENCY_SYMBOL`: Override currency symbol
    /// - `VENDO_CURRENCY_DECIMALS`: Minor-unit digits, 0-4
    /// - `VENDO_OUTPUT`: `text` or `json`
    /// - `VENDO_LOG`: Default tracing filter
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// every variable it does not know.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = MachineConfig::default();

        if let Some(name) = lookup("VENDO_MACHINE_NAME") {
            config.machine_name = name;
        }

        if let Some(symbol) = lookup("VENDO_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("VENDO_CURRENCY_DECIMALS") {
            config.currency_decimals = decimals
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= MAX_CURRENCY_DECIMALS)
                .ok_or_else(|| ConfigError::InvalidValue("VENDO_CURRENCY_DECIMALS".to_string()))?;
        }

        if let Some(output) = lookup("VENDO_OUTPUT") {
            config.output = match output.trim().to_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => return Err(ConfigError::InvalidValue("VENDO_OUTPUT".to_string())),
            };
        }

        if let Some(filter) = lookup("VENDO_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_cli::state::MachineConfig;
    /// use vendo_core::Money;
    ///
    /// let config = MachineConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(850)), "$8.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = MachineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            ("VENDO_MACHINE_NAME", "Lobby"),
            ("VENDO_CURRENCY_SYMBOL", "€"),
            ("VENDO_CURRENCY_DECIMALS", "2"),
            ("VENDO_OUTPUT", "JSON"),
            ("VENDO_LOG", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.machine_name, "Lobby");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_values() {
        let err = MachineConfig::from_lookup(lookup_from(&[("VENDO_OUTPUT", "xml")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue("VENDO_OUTPUT".to_string()));

        let err = MachineConfig::from_lookup(lookup_from(&[("VENDO_CURRENCY_DECIMALS", "9")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for VENDO_CURRENCY_DECIMALS");

        assert!(
            MachineConfig::from_lookup(lookup_from(&[("VENDO_CURRENCY_DECIMALS", "two")])).is_err()
        );
    }

    #[test]
    fn test_format_currency_positive() {
        let config = MachineConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(50)), "$0.50");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = MachineConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_without_decimals() {
        let config = MachineConfig {
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
            ..MachineConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(850)), "¥850");
    }
}
