use serde::{Deserialize, Serialize};

/// Which Cloudflare account to operate on.
///
/// `id` wins over `dashboard_url`; the URL is only used to extract the
/// 32-character hex segment from its path.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub dashboard_url: Option<String>,
}
