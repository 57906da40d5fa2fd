use serde::{Deserialize, Serialize};
use std::path::Path;

use super::account::AccountConfig;
use super::errors::ConfigError;
use super::gateway::GatewayConfig;
use super::logging::LoggingConfig;
use super::sync::SyncConfig;
use crate::account::AccountId;
use crate::errors::DomainError;

pub const TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";
pub const ACCOUNT_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

const LOCAL_CONFIG: &str = "hostsync.toml";
const SYSTEM_CONFIG: &str = "/etc/hostsync/config.toml";

/// Main configuration structure for hostsync
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Target account
    #[serde(default)]
    pub account: AccountConfig,

    /// Gateway API access and list layout
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Sync behaviour (throttle, precedence)
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hostsync.toml in current directory
    /// 3. /etc/hostsync/config.toml
    /// 4. Default configuration
    ///
    /// Environment variables fill values the file left empty; CLI overrides
    /// are applied last.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_env(std::env::var(TOKEN_ENV).ok(), std::env::var(ACCOUNT_ENV).ok());
        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env(&mut self, token: Option<String>, account_id: Option<String>) {
        if self.gateway.api_token.is_none() {
            self.gateway.api_token = token.filter(|t| !t.is_empty());
        }
        if self.account.id.is_none() {
            self.account.id = account_id.filter(|id| !id.is_empty());
        }
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(id) = overrides.account_id {
            self.account.id = Some(id);
        }
        if let Some(url) = overrides.dashboard_url {
            // An explicit URL on the command line beats an id from the file.
            self.account.id = None;
            self.account.dashboard_url = Some(url);
        }
        if let Some(token) = overrides.api_token {
            self.gateway.api_token = Some(token);
        }
        if let Some(base) = overrides.precedence_base {
            self.sync.override_precedence_base = base;
        }
        if let Some(ms) = overrides.throttle_ms {
            self.sync.throttle_ms = ms;
        }
        if overrides.debug {
            self.sync.debug = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.api_base.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gateway.api_base cannot be empty".to_string(),
            ));
        }

        if self.gateway.list_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gateway.list_prefix cannot be empty".to_string(),
            ));
        }

        if self.gateway.list_item_limit == 0 {
            return Err(ConfigError::Validation(
                "gateway.list_item_limit must be at least 1".to_string(),
            ));
        }

        if self.gateway.item_page_limit == 0 {
            return Err(ConfigError::Validation(
                "gateway.item_page_limit must be at least 1".to_string(),
            ));
        }

        // Membership is read one page per list; a fuller list would hide items.
        if self.gateway.list_item_limit > self.gateway.item_page_limit {
            return Err(ConfigError::Validation(format!(
                "gateway.list_item_limit ({}) cannot exceed gateway.item_page_limit ({})",
                self.gateway.list_item_limit, self.gateway.item_page_limit
            )));
        }

        if self.sync.override_precedence_base < 1 {
            return Err(ConfigError::Validation(format!(
                "sync.override_precedence_base must be positive, got {}",
                self.sync.override_precedence_base
            )));
        }

        if self.sync.block_precedence_base < 1 {
            return Err(ConfigError::Validation(format!(
                "sync.block_precedence_base must be positive, got {}",
                self.sync.block_precedence_base
            )));
        }

        Ok(())
    }

    /// Account to operate on; missing or malformed ids are configuration errors.
    pub fn account_id(&self) -> Result<AccountId, DomainError> {
        AccountId::resolve(
            self.account.id.as_deref(),
            self.account.dashboard_url.as_deref(),
        )
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if Path::new(LOCAL_CONFIG).exists() {
            Some(LOCAL_CONFIG.to_string())
        } else if Path::new(SYSTEM_CONFIG).exists() {
            Some(SYSTEM_CONFIG.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub account_id: Option<String>,
    pub dashboard_url: Option<String>,
    pub api_token: Option<String>,
    pub precedence_base: Option<i64>,
    pub throttle_ms: Option<u64>,
    pub debug: bool,
    pub log_level: Option<String>,
}
