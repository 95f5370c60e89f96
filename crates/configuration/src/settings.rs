use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty (or absent) `config.toml` yields a
/// runnable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub calculation: CalculationConstants,
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// The browser origin allowed by CORS.
    pub frontend_url: String,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string. When absent, `DATABASE_URL` from the environment
    /// (or `.env`) is used.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// When false, an unreachable database degrades to the in-memory store
    /// instead of aborting startup.
    pub require: bool,
}

/// Fixed figures used by the ROI calculator.
///
/// These are not caller-supplied. They are read once at startup and handed to
/// the calculator as an immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculationConstants {
    /// What the automated pipeline costs per processed invoice.
    pub automated_cost_per_invoice: Decimal,
    /// Residual error rate once automated, in percent.
    pub error_rate_auto: Decimal,
    /// Flat multiplier applied to raw monthly savings. The default of 1.1
    /// inflates every estimate by 10%; it is a business rule, not a
    /// statistical correction.
    pub min_roi_boost_factor: Decimal,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            frontend_url: "http://localhost:3000".to_string(),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
            require: false,
        }
    }
}

impl Default for CalculationConstants {
    fn default() -> Self {
        Self {
            automated_cost_per_invoice: dec!(0.20),
            error_rate_auto: dec!(0.1),
            min_roi_boost_factor: dec!(1.1),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "invoice-roi.log".to_string(),
        }
    }
}

impl Settings {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        self.calculation.validate()
    }
}

impl CalculationConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.automated_cost_per_invoice < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "calculation.automated_cost_per_invoice must be 0 or greater".to_string(),
            ));
        }
        if self.error_rate_auto < Decimal::ZERO || self.error_rate_auto > dec!(100) {
            return Err(ConfigError::ValidationError(
                "calculation.error_rate_auto must be between 0 and 100 percent".to_string(),
            ));
        }
        if self.min_roi_boost_factor <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "calculation.min_roi_boost_factor must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
