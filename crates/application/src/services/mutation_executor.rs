use hostsync_domain::{DomainError, GatewayRule, ManagedList, RulePayload, SyncStats};
use std::sync::Arc;
use tracing::debug;

use crate::ports::{GatewayClient, SyncReporter, Throttle};

/// Applies gateway mutations one at a time, pausing before each call.
///
/// Every call updates `stats`: the matching counter on success, `failures`
/// plus a log line on error. The error is still returned so callers can stop
/// a dependent step (e.g. appending to a list that was never created).
pub struct MutationExecutor {
    client: Arc<dyn GatewayClient>,
    throttle: Arc<dyn Throttle>,
    reporter: Arc<dyn SyncReporter>,
    stats: SyncStats,
}

impl MutationExecutor {
    pub fn new(
        client: Arc<dyn GatewayClient>,
        throttle: Arc<dyn Throttle>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Self {
        Self {
            client,
            throttle,
            reporter,
            stats: SyncStats::default(),
        }
    }

    pub fn stats_mut(&mut self) -> &mut SyncStats {
        &mut self.stats
    }

    pub fn into_stats(self) -> SyncStats {
        self.stats
    }

    pub async fn remove_duplicates(
        &mut self,
        list_id: &str,
        domains: &[String],
    ) -> Result<(), DomainError> {
        self.reporter.log(&format!(
            "Removing {} duplicates from list {}...",
            domains.len(),
            list_id
        ));
        self.throttle.pause().await;
        let result = self.client.remove_items(list_id, domains).await;
        self.record(result, "Failed to remove duplicates", |s| {
            s.duplicates_removed += domains.len() as u64
        })
    }

    pub async fn remove_domains(
        &mut self,
        list_id: &str,
        domains: &[String],
    ) -> Result<(), DomainError> {
        self.reporter.log(&format!(
            "Removing {} domains from list {}...",
            domains.len(),
            list_id
        ));
        self.throttle.pause().await;
        let result = self.client.remove_items(list_id, domains).await;
        self.record(result, "Failed to remove domains", |s| {
            s.domains_removed += domains.len() as u64
        })
    }

    pub async fn append_domains(
        &mut self,
        list_id: &str,
        list_name: &str,
        domains: &[String],
    ) -> Result<(), DomainError> {
        self.reporter.log(&format!(
            "Adding {} domains to {}...",
            domains.len(),
            list_name
        ));
        self.throttle.pause().await;
        let result = self.client.append_items(list_id, domains).await;
        self.record(result, "Failed to add domains", |s| {
            s.domains_added += domains.len() as u64
        })
    }

    pub async fn create_list(&mut self, name: &str) -> Result<ManagedList, DomainError> {
        self.reporter.log(&format!("Creating list {}...", name));
        self.throttle.pause().await;
        let result = self.client.create_list(name).await;
        self.record(result, "Failed to create list", |s| s.lists_created += 1)
    }

    pub async fn delete_list(&mut self, list: &ManagedList) -> Result<(), DomainError> {
        self.reporter.log(&format!("Deleting list {}...", list.name));
        self.throttle.pause().await;
        let result = self.client.delete_list(&list.id).await;
        self.record(result, "Failed to delete list", |s| s.lists_removed += 1)
    }

    pub async fn create_block_rule(
        &mut self,
        payload: &RulePayload,
    ) -> Result<GatewayRule, DomainError> {
        self.throttle.pause().await;
        let result = self.client.create_rule(payload).await;
        self.record(result, "Failed to create rule", |s| s.rules_created += 1)
    }

    pub async fn delete_rule(&mut self, rule: &GatewayRule) -> Result<(), DomainError> {
        self.reporter.log(&format!("Deleting rule {}...", rule.name));
        self.throttle.pause().await;
        let result = self.client.delete_rule(&rule.id).await;
        self.record(result, "Failed to delete rule", |s| s.rules_removed += 1)
    }

    pub async fn create_override(
        &mut self,
        domain: &str,
        payload: &RulePayload,
    ) -> Result<GatewayRule, DomainError> {
        self.reporter
            .log(&format!("Creating override rule for {}...", domain));
        self.throttle.pause().await;
        let result = self.client.create_rule(payload).await;
        self.record(result, &format!("Failed to create {}", domain), |s| {
            s.overrides_created += 1
        })
    }

    pub async fn update_override(
        &mut self,
        rule_id: &str,
        domain: &str,
        payload: &RulePayload,
    ) -> Result<(), DomainError> {
        self.reporter
            .log(&format!("Updating override rule for {}...", domain));
        self.throttle.pause().await;
        let result = self.client.update_rule(rule_id, payload).await;
        self.record(result, &format!("Failed to update {}", domain), |s| {
            s.overrides_updated += 1
        })
    }

    fn record<T>(
        &mut self,
        result: Result<T, DomainError>,
        failure: &str,
        on_success: impl FnOnce(&mut SyncStats),
    ) -> Result<T, DomainError> {
        match &result {
            Ok(_) => on_success(&mut self.stats),
            Err(e) => {
                self.stats.failures += 1;
                debug!(error = %e, operation = failure, "Gateway mutation failed");
                self.reporter.log(&format!("{}: {}", failure, e));
            }
        }
        result
    }
}
