use serde::{Deserialize, Serialize};

use crate::managed_list::{DEFAULT_LIST_PREFIX, LIST_ITEM_LIMIT};

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Gateway API access and list layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// API root; `/accounts/{id}/gateway` is appended
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer token; falls back to `CLOUDFLARE_API_TOKEN`
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_list_prefix")]
    pub list_prefix: String,

    #[serde(default = "default_list_item_limit")]
    pub list_item_limit: usize,

    /// `limit` sent when reading list items (single page only)
    #[serde(default = "default_item_page_limit")]
    pub item_page_limit: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_token: None,
            list_prefix: default_list_prefix(),
            list_item_limit: default_list_item_limit(),
            item_page_limit: default_item_page_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_list_prefix() -> String {
    DEFAULT_LIST_PREFIX.to_string()
}

fn default_list_item_limit() -> usize {
    LIST_ITEM_LIMIT
}

fn default_item_page_limit() -> usize {
    LIST_ITEM_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}
