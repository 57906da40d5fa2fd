use hostsync_domain::{DomainError, GatewayRule, SyncStage};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::ports::{GatewayClient, SyncReporter, Throttle};
use crate::services::{MutationExecutor, RemoteStateReader};
use crate::use_cases::sync::settings::{emit_report, progress};
use crate::use_cases::sync::{SyncReport, SyncSettings};

/// Removes everything hostsync created: rules first (prefix-named block
/// rules and `→` override rules), then every managed list.
pub struct PurgeManagedUseCase {
    reader: RemoteStateReader,
    client: Arc<dyn GatewayClient>,
    throttle: Arc<dyn Throttle>,
    reporter: Arc<dyn SyncReporter>,
    list_prefix: String,
}

impl PurgeManagedUseCase {
    pub fn new(
        client: Arc<dyn GatewayClient>,
        throttle: Arc<dyn Throttle>,
        reporter: Arc<dyn SyncReporter>,
        settings: &SyncSettings,
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
            list_prefix: settings.layout.prefix.clone(),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> SyncReport {
        let reporter = self.reporter.as_ref();
        let mut executor = MutationExecutor::new(
            self.client.clone(),
            self.throttle.clone(),
            self.reporter.clone(),
        );

        progress(reporter, SyncStage::Analyzing, "Fetching lists and rules...", 0, 1);
        let (lists, rules) = match self.reader.read_lists_and_rules().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let e = DomainError::abort("failed to fetch lists and rules", &e);
                reporter.log(&format!("CRITICAL ERROR: {}", e));
                progress(reporter, SyncStage::Error, "Purge aborted.", 1, 1);
                error!(error = %e, "Purge aborted");
                return SyncReport {
                    stats: executor.into_stats(),
                    stage: SyncStage::Error,
                    error: Some(e),
                };
            }
        };

        let owned: Vec<&GatewayRule> = rules
            .iter()
            .filter(|r| r.is_owned(&self.list_prefix))
            .collect();
        reporter.log(&format!(
            "Deleting {} rules and {} lists...",
            owned.len(),
            lists.len()
        ));

        let total = owned.len() + lists.len();
        let mut done = 0;
        progress(reporter, SyncStage::Purging, "Deleting rules...", done, total);
        for rule in owned {
            let _ = executor.delete_rule(rule).await;
            done += 1;
            progress(reporter, SyncStage::Purging, "Deleting rules...", done, total);
        }
        for list in &lists {
            let _ = executor.delete_list(list).await;
            done += 1;
            progress(reporter, SyncStage::Purging, "Deleting lists...", done, total);
        }

        let stats = executor.into_stats();
        emit_report(reporter, &stats);
        progress(reporter, SyncStage::Done, "Purge completed.", 1, 1);
        info!(
            rules_removed = stats.rules_removed,
            lists_removed = stats.lists_removed,
            failures = stats.failures,
            "Purge completed"
        );
        SyncReport {
            stats,
            stage: SyncStage::Done,
            error: None,
        }
    }
}
