//! Hosts-file style input parsing.
//!
//! Accepts pasted text of the form `<ipv4> <domain> [...]`. Lines that do not
//! start with a dotted quad followed by at least one token are dropped
//! silently; duplicates of a domain after its first appearance are dropped
//! the same way.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::errors::DomainError;

/// Address that marks a line as a block entry rather than an override.
pub const BLOCK_ADDRESS: &str = "0.0.0.0";

static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("static regex"));

static HOSTS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}\s+.+$").expect("static regex")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub ip: String,
    pub domain: String,
}

impl HostEntry {
    pub fn is_block(&self) -> bool {
        self.ip == BLOCK_ADDRESS
    }
}

/// Desired state split into the two kinds of remote resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsInput {
    /// Domains to block, in first-seen order, unique.
    pub block_domains: Vec<String>,
    /// `ip → domain` overrides, in first-seen order, unique by domain.
    pub overrides: Vec<HostEntry>,
}

impl HostsInput {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let entries = parse_hosts_text(text);
        if entries.is_empty() {
            return Err(DomainError::NoValidEntries);
        }

        let mut input = HostsInput::default();
        for entry in entries {
            if entry.is_block() {
                input.block_domains.push(entry.domain);
            } else {
                input.overrides.push(entry);
            }
        }
        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        self.block_domains.is_empty() && self.overrides.is_empty()
    }
}

/// Collapses whitespace and keeps only lines shaped like `<ipv4> <rest>`.
pub fn clean_input_lines(text: &str) -> Vec<String> {
    let text = LINE_BREAK_TAG.replace_all(text, "\n");
    text.split('\n')
        .map(|line| WHITESPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| HOSTS_LINE.is_match(line))
        .collect()
}

/// Parses cleaned lines into entries, keeping the first occurrence of every
/// domain (compared case-insensitively).
pub fn parse_hosts_text(text: &str) -> Vec<HostEntry> {
    let mut seen = HashSet::new();
    clean_input_lines(text)
        .into_iter()
        .filter_map(|line| {
            let mut parts = line.split(' ');
            let ip = parts.next()?;
            let domain = parts.next()?.to_lowercase();
            if domain.is_empty() || !seen.insert(domain.clone()) {
                return None;
            }
            Some(HostEntry {
                ip: ip.to_string(),
                domain,
            })
        })
        .collect()
}
