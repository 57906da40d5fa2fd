use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::DomainError;

static ACCOUNT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{32}$").expect("static regex"));

static ACCOUNT_PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/([a-f0-9]{32})(?:/|$|\?|#)").expect("static regex"));

/// Cloudflare account identifier: 32 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if !ACCOUNT_ID.is_match(raw) {
            return Err(DomainError::InvalidAccountId(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Extracts the account id from a dashboard URL or path, e.g.
    /// `https://one.dash.cloudflare.com/<id>/traffic-policies/...`.
    pub fn from_dashboard_url(url: &str) -> Option<Self> {
        ACCOUNT_PATH_SEGMENT
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_ascii_lowercase()))
    }

    /// Resolves the account from an explicit id, falling back to a dashboard URL.
    pub fn resolve(id: Option<&str>, dashboard_url: Option<&str>) -> Result<Self, DomainError> {
        if let Some(id) = id.filter(|s| !s.trim().is_empty()) {
            return Self::parse(id);
        }
        if let Some(url) = dashboard_url {
            return Self::from_dashboard_url(url).ok_or_else(|| {
                DomainError::Configuration(format!("no account id found in URL {}", url))
            });
        }
        Err(DomainError::Configuration(
            "account id not set (use --account, --dashboard-url or [account] in config)"
                .to_string(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
