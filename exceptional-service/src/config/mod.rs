//! Configuration module for exceptional-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExceptionalConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Pause between balance check and deduction in a withdrawal.
    pub withdraw_delay_ms: u64,
}

impl LedgerConfig {
    pub fn withdraw_delay(&self) -> Duration {
        Duration::from_millis(self.withdraw_delay_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            withdraw_delay_ms: 100,
        }
    }
}

impl ExceptionalConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let withdraw_delay_ms = match env::var("WITHDRAW_DELAY_MS") {
            Ok(value) => value.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "WITHDRAW_DELAY_MS must be a non-negative integer, got '{}': {}",
                    value,
                    e
                ))
            })?,
            Err(_) => LedgerConfig::default().withdraw_delay_ms,
        };

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "exceptional-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            ledger: LedgerConfig { withdraw_delay_ms },
        })
    }
}
