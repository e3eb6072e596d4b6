//! Application configuration management.

use serde::Deserialize;

use crate::error::MoneyError;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report generation settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Currency every entry is normalized into before reporting.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty_output")]
    pub pretty_output: bool,
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_pretty_output() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            pretty_output: default_pretty_output(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "keelbook=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `KEELBOOK__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KEELBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// The configured base currency, validated against ISO 4217.
    pub fn base_currency(&self) -> Result<Currency, MoneyError> {
        Currency::parse(&self.report.base_currency)
    }
}
