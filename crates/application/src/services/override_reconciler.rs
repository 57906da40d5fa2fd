use hostsync_domain::{GatewayRule, HostEntry};
use rustc_hash::{FxHashMap, FxHashSet};

/// Existing override rule for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingOverride {
    pub rule_id: String,
    pub ip: String,
    pub precedence: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideDecision {
    Create {
        domain: String,
        ip: String,
        precedence: i64,
    },
    Update {
        rule_id: String,
        domain: String,
        ip: String,
        previous_ip: String,
        precedence: i64,
    },
    Skip {
        domain: String,
        ip: String,
    },
}

impl OverrideDecision {
    pub fn domain(&self) -> &str {
        match self {
            OverrideDecision::Create { domain, .. }
            | OverrideDecision::Update { domain, .. }
            | OverrideDecision::Skip { domain, .. } => domain,
        }
    }
}

/// Hands out precedence values that no rule is using yet.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceAllocator {
    used: FxHashSet<i64>,
}

impl PrecedenceAllocator {
    pub fn from_rules(rules: &[GatewayRule]) -> Self {
        Self {
            used: rules.iter().map(|r| r.precedence).collect(),
        }
    }

    /// First free value `>= base`; the value is reserved before returning.
    pub fn next_from(&mut self, base: i64) -> i64 {
        let mut candidate = base;
        while self.used.contains(&candidate) {
            candidate += 1;
        }
        self.used.insert(candidate);
        candidate
    }
}

/// Override rules recognisable as `"<domain> → <ip>"` with an equality
/// traffic test, keyed by lowercased domain. Later rules win.
pub fn index_overrides(rules: &[GatewayRule]) -> FxHashMap<String, ExistingOverride> {
    rules
        .iter()
        .filter_map(|rule| {
            let target = rule.override_target()?;
            Some((
                target.domain.to_lowercase(),
                ExistingOverride {
                    rule_id: rule.id.clone(),
                    ip: target.ip,
                    precedence: rule.precedence,
                },
            ))
        })
        .collect()
}

/// One decision per desired pair, in input order.
///
/// Updates keep the rule's current precedence; creates take the next slot at
/// or above `precedence_base` that no rule of either kind occupies.
pub fn plan_overrides(
    desired: &[HostEntry],
    rules: &[GatewayRule],
    precedence_base: i64,
) -> Vec<OverrideDecision> {
    let existing = index_overrides(rules);
    let mut precedences = PrecedenceAllocator::from_rules(rules);

    desired
        .iter()
        .map(|entry| match existing.get(&entry.domain.to_lowercase()) {
            Some(current) if current.ip == entry.ip => OverrideDecision::Skip {
                domain: entry.domain.clone(),
                ip: entry.ip.clone(),
            },
            Some(current) => OverrideDecision::Update {
                rule_id: current.rule_id.clone(),
                domain: entry.domain.clone(),
                ip: entry.ip.clone(),
                previous_ip: current.ip.clone(),
                precedence: current.precedence,
            },
            None => OverrideDecision::Create {
                domain: entry.domain.clone(),
                ip: entry.ip.clone(),
                precedence: precedences.next_from(precedence_base),
            },
        })
        .collect()
}
