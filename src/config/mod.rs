//! Runtime configuration for the fee engine.
//!
//! Values come from `AR_FEES__<SECTION>__<KEY>` environment variables, with
//! a `.env` file honoured in development. Every setting has a default.
//!
//! # Example
//!
//! ```no_run
//! use ar_fee_engine::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to initialise logging");
//! ```

mod error;
mod fees;
mod logging;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use fees::FeeSettings;
pub use logging::{init_tracing, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an in-memory
/// INR setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Fee computation defaults (currency, chargePerAR)
    #[serde(default)]
    pub fees: FeeSettings,

    /// Record storage backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the `AR_FEES__` environment variables.
    ///
    /// # Variables
    ///
    /// - `AR_FEES__FEES__CHARGE_PER_AR=true` -> `fees.charge_per_ar = true`
    /// - `AR_FEES__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `AR_FEES__STORAGE__DATA_DIR=./data` -> `storage.data_dir = ./data`
    /// - `AR_FEES__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AR_FEES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unsupported currency, a file backend
    /// without a data directory, or an unparsable log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fees.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "AR_FEES__FEES__CHARGE_PER_AR",
        "AR_FEES__FEES__CURRENCY",
        "AR_FEES__STORAGE__BACKEND",
        "AR_FEES__STORAGE__DATA_DIR",
        "AR_FEES__LOGGING__JSON",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.fees.currency, "INR");
        assert!(!config.fees.charge_per_ar);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AR_FEES__FEES__CHARGE_PER_AR", "true");
        env::set_var("AR_FEES__STORAGE__BACKEND", "file");
        env::set_var("AR_FEES__STORAGE__DATA_DIR", "/tmp/ar-fees");
        env::set_var("AR_FEES__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.fees.charge_per_ar);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/ar-fees")));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_backend_without_dir_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AR_FEES__STORAGE__BACKEND", "file");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_unsupported_currency_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AR_FEES__FEES__CURRENCY", "EUR");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnsupportedCurrency(_))
        ));
    }
}
