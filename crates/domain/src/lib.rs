//! hostsync Domain Layer
pub mod account;
pub mod config;
pub mod errors;
pub mod gateway_rule;
pub mod hosts;
pub mod managed_list;
pub mod progress;
pub mod sync_stats;

pub use account::AccountId;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use gateway_rule::{
    block_rule_precedence, GatewayRule, OverrideTarget, RuleAction, RulePayload,
    BLOCK_PRECEDENCE_BASE, DEFAULT_OVERRIDE_PRECEDENCE_BASE, OVERRIDE_ARROW,
};
pub use hosts::{HostEntry, HostsInput, BLOCK_ADDRESS};
pub use managed_list::{
    managed_list_name, next_list_number, ManagedList, DEFAULT_LIST_PREFIX, LIST_ITEM_LIMIT,
};
pub use progress::{Progress, SyncStage};
pub use sync_stats::SyncStats;
