use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::managed_list::ManagedList;

/// Separator used in override rule names: `"<domain> → <ip>"`.
pub const OVERRIDE_ARROW: &str = "→";

/// Block rules get `BLOCK_PRECEDENCE_BASE - list number`, so earlier lists win.
pub const BLOCK_PRECEDENCE_BASE: i64 = 999_999;

pub const DEFAULT_OVERRIDE_PRECEDENCE_BASE: i64 = 10_000;

static EQUALITY_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"==\s*"([^"]+)""#).expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Block,
    Override,
}

impl RuleAction {
    pub fn to_str(&self) -> &'static str {
        match self {
            RuleAction::Block => "block",
            RuleAction::Override => "override",
        }
    }
}

/// Gateway rule as read from the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRule {
    pub id: String,
    pub name: String,
    pub traffic: String,
    pub precedence: i64,
    pub override_ips: Vec<String>,
}

/// Domain and target address recovered from an existing override rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTarget {
    pub domain: String,
    pub ip: String,
}

impl GatewayRule {
    pub fn is_override(&self) -> bool {
        self.name.contains(OVERRIDE_ARROW)
    }

    /// Heuristic link between an existing rule and a list: same name, or the
    /// list id referenced as `$<id>` in the traffic expression.
    pub fn references_list(&self, list: &ManagedList) -> bool {
        self.name == list.name || self.traffic.contains(&format!("${}", list.id))
    }

    /// Recovers `domain → ip` from rules written as an equality test against
    /// a quoted domain. Returns `None` for anything else.
    pub fn override_target(&self) -> Option<OverrideTarget> {
        if !self.is_override() {
            return None;
        }
        let domain = EQUALITY_DOMAIN.captures(&self.traffic)?.get(1)?.as_str();
        let ip = self.override_ips.first()?;
        Some(OverrideTarget {
            domain: domain.to_string(),
            ip: ip.clone(),
        })
    }

    /// Rules that `purge` is allowed to remove.
    pub fn is_owned(&self, list_prefix: &str) -> bool {
        self.name.starts_with(list_prefix) || self.is_override()
    }
}

/// Body of a rule create/update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePayload {
    pub name: String,
    pub precedence: i64,
    pub action: RuleAction,
    pub traffic: String,
    pub filters: Vec<String>,
    pub enabled: bool,
    pub override_ips: Vec<String>,
}

impl RulePayload {
    pub fn block_list(list_name: &str, list_id: &str, precedence: i64) -> Self {
        Self {
            name: list_name.to_string(),
            precedence,
            action: RuleAction::Block,
            traffic: format!("any(dns.domains[*] in ${})", list_id),
            filters: vec!["dns".to_string()],
            enabled: true,
            override_ips: Vec::new(),
        }
    }

    pub fn override_domain(domain: &str, ip: &str, precedence: i64) -> Self {
        Self {
            name: format!("{} {} {}", domain, OVERRIDE_ARROW, ip),
            precedence,
            action: RuleAction::Override,
            traffic: format!("any(dns.domains[*] == \"{}\")", domain),
            filters: vec!["dns".to_string()],
            enabled: true,
            override_ips: vec![ip.to_string()],
        }
    }
}

pub fn block_rule_precedence(base: i64, list_number: u32) -> i64 {
    base - i64::from(list_number)
}
