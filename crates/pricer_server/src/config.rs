//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use adapter_contract::ReferenceRates;
use pricer_core::types::{Currency, Date};
use pricer_pricing::bulk::{DEFAULT_ITEM_TIMEOUT, DEFAULT_MAX_CONCURRENCY};
use pricer_pricing::BulkSettings;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid bulk setting: {0}")]
    InvalidBulk(String),

    #[error("Invalid reference rate for {currency}: {rate}. Must be finite and >= 0")]
    InvalidRate { currency: String, rate: f64 },

    #[error("Unknown currency in reference_rates: {0}")]
    UnknownCurrency(String),

    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Bulk pricing limits (`[bulk]` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Maximum number of contracts priced at once
    pub max_concurrency: usize,
    /// Per-contract timeout in milliseconds
    pub item_timeout_ms: u64,
    /// Largest accepted batch; bigger batches get 413
    pub max_batch_size: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            item_timeout_ms: DEFAULT_ITEM_TIMEOUT.as_millis() as u64,
            max_batch_size: 1000,
        }
    }
}

impl BulkConfig {
    /// Dispatcher settings for these limits
    pub fn settings(&self) -> BulkSettings {
        BulkSettings {
            max_concurrency: self.max_concurrency,
            item_timeout: Duration::from_millis(self.item_timeout_ms),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_environment")]
    pub environment: Environment,
    /// Fixed evaluation date (`YYYY-MM-DD`); the system date when absent
    pub evaluation_date: Option<Date>,
    /// Bulk pricing limits
    pub bulk: BulkConfig,
    /// Reference rate per currency code; replaces the built-in table when present
    pub reference_rates: Option<BTreeMap<String, f64>>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_environment<'de, D>(deserializer: D) -> Result<Environment, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Environment::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            shutdown_timeout_secs: 30,
            environment: Environment::Development,
            evaluation_date: None,
            bulk: BulkConfig::default(),
            reference_rates: None,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not valid", name, value)))
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables returned by `lookup`
    ///
    /// Only variables that are set are applied.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PRICER_SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PRICER_SERVER_PORT") {
            self.port = parse_env("PRICER_SERVER_PORT", &port)?;
        }
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(secs) = lookup("PRICER_SHUTDOWN_TIMEOUT_SECS") {
            self.shutdown_timeout_secs = parse_env("PRICER_SHUTDOWN_TIMEOUT_SECS", &secs)?;
        }
        if let Some(env) = lookup("PRICER_ENV") {
            self.environment = Environment::from_str(&env)?;
        }
        if let Some(limit) = lookup("PRICER_BULK_MAX_CONCURRENCY") {
            self.bulk.max_concurrency = parse_env("PRICER_BULK_MAX_CONCURRENCY", &limit)?;
        }
        if let Some(millis) = lookup("PRICER_BULK_ITEM_TIMEOUT_MS") {
            self.bulk.item_timeout_ms = parse_env("PRICER_BULK_ITEM_TIMEOUT_MS", &millis)?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if self.bulk.max_concurrency == 0 {
            return Err(ConfigError::InvalidBulk(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.bulk.item_timeout_ms == 0 {
            return Err(ConfigError::InvalidBulk(
                "item_timeout_ms must be at least 1".to_string(),
            ));
        }
        if self.bulk.max_batch_size == 0 {
            return Err(ConfigError::InvalidBulk(
                "max_batch_size must be at least 1".to_string(),
            ));
        }
        self.reference_rates()?;
        Ok(())
    }

    /// Reference rate table for currency resolution
    pub fn reference_rates(&self) -> Result<ReferenceRates, ConfigError> {
        let Some(entries) = &self.reference_rates else {
            return Ok(ReferenceRates::default());
        };
        let mut rates = Vec::with_capacity(entries.len());
        for (code, rate) in entries {
            let currency = Currency::from_str(code.trim())
                .map_err(|_| ConfigError::UnknownCurrency(code.clone()))?;
            if !rate.is_finite() || *rate < 0.0 {
                return Err(ConfigError::InvalidRate {
                    currency: code.clone(),
                    rate: *rate,
                });
            }
            rates.push((currency, *rate));
        }
        Ok(ReferenceRates::from_rates(rates))
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(limit) = cli.max_concurrency {
            self.bulk.max_concurrency = limit;
        }
        if let Some(millis) = cli.item_timeout_ms {
            self.bulk.item_timeout_ms = millis;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Bulk concurrency override
    pub max_concurrency: Option<usize>,
    /// Bulk item timeout override
    pub item_timeout_ms: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bulk.max_concurrency, 64);
        assert_eq!(config.bulk.item_timeout_ms, 5000);
        assert_eq!(config.bulk.max_batch_size, 1000);
        assert!(config.evaluation_date.is_none());
        assert_eq!(config.reference_rates().unwrap(), ReferenceRates::default());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str("dev").unwrap(), Environment::Development);
        assert_eq!(Environment::from_str("stage").unwrap(), Environment::Staging);
        assert_eq!(Environment::from_str("PROD").unwrap(), Environment::Production);
        assert!(Environment::from_str("invalid").is_err());
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(0))));

        let mut config = ServerConfig::default();
        config.bulk.max_concurrency = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBulk(_))));

        let mut config = ServerConfig::default();
        config.bulk.item_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBulk(_))));
    }

    #[test]
    fn test_reference_rates_validation() {
        let mut config = ServerConfig::default();
        config.reference_rates = Some(BTreeMap::from([("usd".to_string(), -0.01)]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { .. })
        ));

        config.reference_rates = Some(BTreeMap::from([("XAU".to_string(), 0.01)]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownCurrency(_))
        ));

        config.reference_rates = Some(BTreeMap::from([("USD".to_string(), f64::NAN)]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            shutdown_timeout_secs = 60
            environment = "production"
            evaluation_date = "2024-03-15"

            [bulk]
            max_concurrency = 8
            item_timeout_ms = 250

            [reference_rates]
            USD = 0.045
            EUR = 0.02
        "#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.shutdown_timeout_secs, 60);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.evaluation_date, Some(Date::from_ymd(2024, 3, 15).unwrap()));
        assert_eq!(config.bulk.max_concurrency, 8);
        assert_eq!(config.bulk.item_timeout_ms, 250);
        assert_eq!(config.bulk.max_batch_size, 1000);

        let rates = config.reference_rates().unwrap();
        assert_eq!(rates.rate(Currency::USD).unwrap(), 0.045);
        assert_eq!(rates.rate(Currency::EUR).unwrap(), 0.02);
        assert!(rates.rate(Currency::JPY).is_err());
        assert_eq!(
            config.bulk.settings().item_timeout,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: ServerConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.bulk, BulkConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[
                ("PRICER_SERVER_HOST", "127.0.0.1"),
                ("PRICER_SERVER_PORT", "9090"),
                ("PRICER_LOG_LEVEL", "warn"),
                ("PRICER_ENV", "staging"),
                ("PRICER_BULK_MAX_CONCURRENCY", "16"),
                ("PRICER_BULK_ITEM_TIMEOUT_MS", "1500"),
            ]))
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.bulk.max_concurrency, 16);
        assert_eq!(config.bulk.item_timeout_ms, 1500);
    }

    #[test]
    fn test_env_parse_error() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(env(&[("PRICER_BULK_MAX_CONCURRENCY", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("PRICER_BULK_MAX_CONCURRENCY"));
    }

    #[test]
    fn test_cli_takes_precedence_over_env() {
        let cli = CliArgs {
            port: Some(7000),
            log_level: Some("debug".to_string()),
            max_concurrency: Some(4),
            ..CliArgs::default()
        };
        let config = build_config_with_env(
            &cli,
            env(&[
                ("PRICER_SERVER_PORT", "9090"),
                ("PRICER_BULK_MAX_CONCURRENCY", "16"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.bulk.max_concurrency, 4);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), env(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPort(0);
        assert!(err.to_string().contains("Invalid port"));

        let err = ConfigError::InvalidRate {
            currency: "USD".to_string(),
            rate: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid reference rate for USD: -1. Must be finite and >= 0"
        );
    }
}
