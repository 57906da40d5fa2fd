use serde::Serialize;

/// Counters accumulated over a sync or purge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub lists_created: u64,
    pub rules_created: u64,
    pub domains_added: u64,
    pub domains_removed: u64,
    pub duplicates_removed: u64,
    pub lists_removed: u64,
    pub rules_removed: u64,
    pub overrides_created: u64,
    pub overrides_updated: u64,
    pub overrides_skipped: u64,
    pub failures: u64,
}

impl SyncStats {
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            "--- FINAL REPORT ---".to_string(),
            format!("Duplicates removed: {}", self.duplicates_removed),
            format!("Domains removed: {}", self.domains_removed),
            format!("Domains added: {}", self.domains_added),
            format!(
                "Lists/rules created: {}/{}",
                self.lists_created, self.rules_created
            ),
            format!(
                "Lists/rules removed: {}/{}",
                self.lists_removed, self.rules_removed
            ),
            format!(
                "Overrides created/updated/skipped: {}/{}/{}",
                self.overrides_created, self.overrides_updated, self.overrides_skipped
            ),
            format!("Failed operations: {}", self.failures),
            "--------------------".to_string(),
        ]
    }
}
