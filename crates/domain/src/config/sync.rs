use serde::{Deserialize, Serialize};

use crate::gateway_rule::{BLOCK_PRECEDENCE_BASE, DEFAULT_OVERRIDE_PRECEDENCE_BASE};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Pause before every mutating API call
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Lowest precedence handed out to new override rules
    #[serde(default = "default_override_precedence_base")]
    pub override_precedence_base: i64,

    #[serde(default = "default_block_precedence_base")]
    pub block_precedence_base: i64,

    /// Delay before the post-sync convergence check
    #[serde(default = "default_refresh_delay_secs")]
    pub refresh_delay_secs: u64,

    /// Skip the post-sync convergence check and log at debug level
    #[serde(default)]
    pub debug: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            override_precedence_base: default_override_precedence_base(),
            block_precedence_base: default_block_precedence_base(),
            refresh_delay_secs: default_refresh_delay_secs(),
            debug: false,
        }
    }
}

fn default_throttle_ms() -> u64 {
    150
}

fn default_override_precedence_base() -> i64 {
    DEFAULT_OVERRIDE_PRECEDENCE_BASE
}

fn default_block_precedence_base() -> i64 {
    BLOCK_PRECEDENCE_BASE
}

fn default_refresh_delay_secs() -> u64 {
    5
}
