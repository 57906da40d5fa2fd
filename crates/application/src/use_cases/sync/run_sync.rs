use hostsync_domain::{
    next_list_number, DomainError, HostEntry, HostsInput, ManagedList, RulePayload, SyncStage,
    SyncStats,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::settings::{emit_report, progress, SyncSettings};
use crate::ports::{GatewayClient, SyncReporter, Throttle};
use crate::services::{
    derive_counts, plan_allocation, plan_block_lists, plan_empty_list_cleanup, plan_overrides,
    MutationExecutor, OverrideDecision, RemoteStateReader,
};

/// Outcome of one sync run. Stats are kept even when the run aborted.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub stage: SyncStage,
    pub error: Option<DomainError>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// End-to-end sync: block lists first, then override rules.
///
/// Only snapshot reads can abort a run; every mutation failure is logged,
/// counted and skipped. Mutations run one at a time behind the throttle.
pub struct RunSyncUseCase {
    reader: RemoteStateReader,
    client: Arc<dyn GatewayClient>,
    throttle: Arc<dyn Throttle>,
    reporter: Arc<dyn SyncReporter>,
    settings: SyncSettings,
}

impl RunSyncUseCase {
    pub fn new(
        client: Arc<dyn GatewayClient>,
        throttle: Arc<dyn Throttle>,
        reporter: Arc<dyn SyncReporter>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            reader: RemoteStateReader::new(
                client.clone(),
                settings.layout.prefix.clone(),
                settings.item_page_limit,
            ),
            client,
            throttle,
            reporter,
            settings,
        }
    }

    #[instrument(skip(self, input), fields(
        block_domains = input.block_domains.len(),
        overrides = input.overrides.len()
    ))]
    pub async fn execute(&self, input: &HostsInput) -> SyncReport {
        progress(self.reporter.as_ref(), SyncStage::Idle, "Starting sync...", 0, 1);
        let mut executor = MutationExecutor::new(
            self.client.clone(),
            self.throttle.clone(),
            self.reporter.clone(),
        );

        let result = match self.sync_block_lists(&mut executor, &input.block_domains).await {
            Ok(()) => self.sync_overrides(&mut executor, &input.overrides).await,
            Err(e) => Err(e),
        };

        let stats = executor.into_stats();
        emit_report(self.reporter.as_ref(), &stats);

        match result {
            Ok(()) => {
                progress(
                    self.reporter.as_ref(),
                    SyncStage::Done,
                    "All operations completed.",
                    1,
                    1,
                );
                info!(failures = stats.failures, "Sync completed");
                SyncReport {
                    stats,
                    stage: SyncStage::Done,
                    error: None,
                }
            }
            Err(e) => {
                self.reporter.log(&format!("CRITICAL ERROR: {}", e));
                progress(
                    self.reporter.as_ref(),
                    SyncStage::Error,
                    "Sync aborted.",
                    1,
                    1,
                );
                error!(error = %e, "Sync aborted");
                SyncReport {
                    stats,
                    stage: SyncStage::Error,
                    error: Some(e),
                }
            }
        }
    }

    async fn sync_block_lists(
        &self,
        executor: &mut MutationExecutor,
        desired: &[String],
    ) -> Result<(), DomainError> {
        let reporter = self.reporter.as_ref();
        if desired.is_empty() {
            reporter.log("No block domains found, skipping block list sync.");
            return Ok(());
        }
        reporter.log(&format!("Found {} block domains.", desired.len()));

        progress(reporter, SyncStage::Analyzing, "Fetching lists and rules...", 1, 3);
        let (lists, rules) = self
            .reader
            .read_lists_and_rules()
            .await
            .map_err(|e| DomainError::abort("failed to fetch lists and rules", &e))?;
        reporter.log(&format!("Found {} managed lists.", lists.len()));

        progress(reporter, SyncStage::Analyzing, "Reading list contents...", 2, 3);
        let membership = self
            .reader
            .read_membership(&lists)
            .await
            .map_err(|e| DomainError::abort("failed to read list items", &e))?;
        reporter.log(&format!(
            "Found {} unique domains in {} lists.",
            membership.len(),
            lists.len()
        ));

        let plan = plan_block_lists(desired, &membership);
        let mut removed: FxHashMap<String, usize> = FxHashMap::default();

        progress(reporter, SyncStage::Deduplicating, "Looking for duplicates...", 0, 1);
        if plan.duplicate_removals.is_empty() {
            reporter.log("No duplicates found.");
        } else {
            reporter.log(&format!(
                "Found {} duplicates. Cleaning up...",
                plan.duplicate_count()
            ));
            for removal in &plan.duplicate_removals {
                if executor
                    .remove_duplicates(&removal.list_id, &removal.domains)
                    .await
                    .is_ok()
                {
                    *removed.entry(removal.list_id.clone()).or_default() += removal.domains.len();
                }
            }
        }
        progress(reporter, SyncStage::Deduplicating, "Deduplication finished.", 1, 1);

        reporter.log(&format!(
            "To add: {}, to remove: {}.",
            plan.to_add.len(),
            plan.stale_count()
        ));

        let total = plan.stale_count();
        progress(reporter, SyncStage::Cleaning, "Removing stale domains...", 0, total);
        let mut processed = 0;
        for removal in &plan.stale_removals {
            if executor
                .remove_domains(&removal.list_id, &removal.domains)
                .await
                .is_ok()
            {
                *removed.entry(removal.list_id.clone()).or_default() += removal.domains.len();
            }
            processed += removal.domains.len();
            progress(reporter, SyncStage::Cleaning, "Removing domains...", processed, total);
        }

        reporter.log("Looking for empty lists...");
        let lists = self.lists_after_removals(&lists, &removed).await;
        let cleanups = plan_empty_list_cleanup(&lists, &rules);
        let mut deleted = FxHashSet::default();
        for cleanup in &cleanups {
            reporter.log(&format!("List {} is empty.", cleanup.list.name));
            // The rule goes first: the service refuses to delete a list that
            // a rule still references.
            if let Some(rule) = &cleanup.rule {
                let _ = executor.delete_rule(rule).await;
            }
            if executor.delete_list(&cleanup.list).await.is_ok() {
                deleted.insert(cleanup.list.id.clone());
            }
        }

        let emptied: FxHashSet<String> = cleanups.iter().map(|c| c.list.id.clone()).collect();
        let existing: Vec<ManagedList> = lists
            .into_iter()
            .filter(|l| !deleted.contains(&l.id))
            .collect();
        self.allocate(executor, &plan.to_add, &existing, &emptied)
            .await;
        Ok(())
    }

    /// Fills spare capacity, then creates list+rule pairs for the rest.
    /// Lists that were just found empty are never refilled: their rule may
    /// already be gone.
    async fn allocate(
        &self,
        executor: &mut MutationExecutor,
        to_add: &[String],
        existing: &[ManagedList],
        emptied: &FxHashSet<String>,
    ) {
        let reporter = self.reporter.as_ref();
        let total = to_add.len();
        progress(reporter, SyncStage::Creating, "Adding new domains...", 0, total);
        if to_add.is_empty() {
            return;
        }

        let fillable: Vec<ManagedList> = existing
            .iter()
            .filter(|l| !emptied.contains(&l.id))
            .cloned()
            .collect();
        let allocation = plan_allocation(
            &fillable,
            to_add,
            &self.settings.layout,
            next_list_number(existing),
        );
        debug!(
            fills = allocation.fills.len(),
            new_lists = allocation.new_lists.len(),
            "Planned allocation"
        );

        reporter.log("Looking for spare capacity in existing lists...");
        let mut processed = 0;
        for fill in &allocation.fills {
            let _ = executor
                .append_domains(&fill.list_id, &fill.list_name, &fill.domains)
                .await;
            processed += fill.domains.len();
            progress(reporter, SyncStage::Creating, "Filling lists...", processed, total);
        }

        for (i, batch) in allocation.new_lists.iter().enumerate() {
            let list = match executor.create_list(&batch.name).await {
                Ok(list) => list,
                Err(_) => {
                    let left: usize = allocation.new_lists[i..]
                        .iter()
                        .map(|b| b.domains.len())
                        .sum();
                    reporter.log(&format!(
                        "Stopping list creation, {} domains left unallocated.",
                        left
                    ));
                    break;
                }
            };

            let _ = executor
                .append_domains(&list.id, &batch.name, &batch.domains)
                .await;

            let rule = RulePayload::block_list(&batch.name, &list.id, batch.precedence);
            let _ = executor.create_block_rule(&rule).await;

            processed += batch.domains.len();
            progress(reporter, SyncStage::Creating, "Creating new lists...", processed, total);
        }
    }

    /// Current list counts after the removal pass. Re-reads the lists when
    /// anything was removed and falls back to subtracting the removals from
    /// the snapshot if that read fails.
    async fn lists_after_removals(
        &self,
        before: &[ManagedList],
        removed: &FxHashMap<String, usize>,
    ) -> Vec<ManagedList> {
        if removed.is_empty() {
            return before.to_vec();
        }
        match self.reader.read_managed_lists().await {
            Ok(lists) => lists,
            Err(e) => {
                self.reporter.log(&format!(
                    "Could not re-read lists ({}), using derived counts.",
                    e
                ));
                derive_counts(before, removed)
            }
        }
    }

    async fn sync_overrides(
        &self,
        executor: &mut MutationExecutor,
        overrides: &[HostEntry],
    ) -> Result<(), DomainError> {
        let reporter = self.reporter.as_ref();
        if overrides.is_empty() {
            reporter.log("No override rules found, skipping.");
            return Ok(());
        }
        reporter.log(&format!("Found {} override rules.", overrides.len()));

        let total = overrides.len();
        progress(reporter, SyncStage::Reconciling, "Processing rules...", 0, total);

        // Re-read: the block list pass may have created rules since the snapshot.
        let rules = self
            .reader
            .read_rules()
            .await
            .map_err(|e| DomainError::abort("failed to fetch rules for overrides", &e))?;

        let decisions = plan_overrides(overrides, &rules, self.settings.override_precedence_base);
        for (i, decision) in decisions.iter().enumerate() {
            match decision {
                OverrideDecision::Skip { .. } => {
                    executor.stats_mut().overrides_skipped += 1;
                }
                OverrideDecision::Create {
                    domain,
                    ip,
                    precedence,
                } => {
                    let payload = RulePayload::override_domain(domain, ip, *precedence);
                    let _ = executor.create_override(domain, &payload).await;
                }
                OverrideDecision::Update {
                    rule_id,
                    domain,
                    ip,
                    precedence,
                    ..
                } => {
                    let payload = RulePayload::override_domain(domain, ip, *precedence);
                    let _ = executor.update_override(rule_id, domain, &payload).await;
                }
            }
            debug!(domain = decision.domain(), "Override processed");
            progress(reporter, SyncStage::Reconciling, "Processing rules...", i + 1, total);
        }
        Ok(())
    }
}
