use hostsync_domain::{next_list_number, DomainError, HostsInput};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::GatewayClient;
use crate::services::{
    derive_counts, plan_allocation, plan_block_lists, plan_empty_list_cleanup, plan_overrides,
    AllocationPlan, BlockListPlan, EmptyListCleanup, OverrideDecision, RemoteStateReader,
};
use crate::use_cases::sync::SyncSettings;

/// What a sync would do against the current remote state, assuming every
/// mutation succeeds.
#[derive(Debug, Clone, Default)]
pub struct SyncPreview {
    pub managed_lists: usize,
    pub block: BlockListPlan,
    pub empty_lists: Vec<EmptyListCleanup>,
    pub allocation: AllocationPlan,
    pub overrides: Vec<OverrideDecision>,
}

impl SyncPreview {
    pub fn overrides_to_create(&self) -> usize {
        self.count_overrides(|d| matches!(d, OverrideDecision::Create { .. }))
    }

    pub fn overrides_to_update(&self) -> usize {
        self.count_overrides(|d| matches!(d, OverrideDecision::Update { .. }))
    }

    pub fn overrides_unchanged(&self) -> usize {
        self.count_overrides(|d| matches!(d, OverrideDecision::Skip { .. }))
    }

    fn count_overrides(&self, f: impl Fn(&OverrideDecision) -> bool) -> usize {
        self.overrides.iter().filter(|d| f(d)).count()
    }

    /// True when a sync would not issue a single mutation.
    pub fn is_converged(&self) -> bool {
        self.block.is_noop()
            && self.empty_lists.is_empty()
            && self.overrides_to_create() == 0
            && self.overrides_to_update() == 0
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Managed lists: {}", self.managed_lists),
            format!("Duplicates to remove: {}", self.block.duplicate_count()),
            format!("Domains to remove: {}", self.block.stale_count()),
            format!("Empty lists to delete: {}", self.empty_lists.len()),
            format!(
                "Domains to add: {} ({} into existing lists, {} new lists)",
                self.block.to_add.len(),
                self.allocation.fills.iter().map(|f| f.domains.len()).sum::<usize>(),
                self.allocation.new_lists.len()
            ),
            format!(
                "Overrides to create/update/keep: {}/{}/{}",
                self.overrides_to_create(),
                self.overrides_to_update(),
                self.overrides_unchanged()
            ),
        ]
    }
}

/// Read-only dry run of [`crate::use_cases::RunSyncUseCase`].
pub struct PreviewSyncUseCase {
    reader: RemoteStateReader,
    settings: SyncSettings,
}

impl PreviewSyncUseCase {
    pub fn new(client: Arc<dyn GatewayClient>, settings: SyncSettings) -> Self {
        Self {
            reader: RemoteStateReader::new(
                client,
                settings.layout.prefix.clone(),
                settings.item_page_limit,
            ),
            settings,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn execute(&self, input: &HostsInput) -> Result<SyncPreview, DomainError> {
        let snapshot = self
            .reader
            .read_snapshot()
            .await
            .map_err(|e| DomainError::abort("failed to read remote state", &e))?;

        let mut preview = SyncPreview {
            managed_lists: snapshot.managed_lists.len(),
            ..Default::default()
        };

        if !input.block_domains.is_empty() {
            preview.block = plan_block_lists(&input.block_domains, &snapshot.membership);

            let mut removed: FxHashMap<String, usize> = FxHashMap::default();
            for removal in preview
                .block
                .duplicate_removals
                .iter()
                .chain(&preview.block.stale_removals)
            {
                *removed.entry(removal.list_id.clone()).or_default() += removal.domains.len();
            }
            let lists = derive_counts(&snapshot.managed_lists, &removed);

            preview.empty_lists = plan_empty_list_cleanup(&lists, &snapshot.rules);
            let remaining: Vec<_> = lists.into_iter().filter(|l| l.count > 0).collect();
            preview.allocation = plan_allocation(
                &remaining,
                &preview.block.to_add,
                &self.settings.layout,
                next_list_number(&remaining),
            );
        }

        preview.overrides = plan_overrides(
            &input.overrides,
            &snapshot.rules,
            self.settings.override_precedence_base,
        );

        info!(converged = preview.is_converged(), "Sync preview ready");
        Ok(preview)
    }
}
