use hostsync_domain::{Config, Progress, SyncStage, SyncStats};

use crate::ports::SyncReporter;
use crate::services::ListLayout;

/// Knobs shared by the sync, plan and purge use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub layout: ListLayout,
    pub item_page_limit: usize,
    pub override_precedence_base: i64,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: ListLayout {
                prefix: config.gateway.list_prefix.clone(),
                item_limit: config.gateway.list_item_limit,
                block_precedence_base: config.sync.block_precedence_base,
            },
            item_page_limit: config.gateway.item_page_limit,
            override_precedence_base: config.sync.override_precedence_base,
        }
    }
}

pub(crate) fn progress(
    reporter: &dyn SyncReporter,
    stage: SyncStage,
    message: &str,
    current: usize,
    total: usize,
) {
    reporter.update_progress(&Progress::new(stage, message, current, total));
}

pub(crate) fn emit_report(reporter: &dyn SyncReporter, stats: &SyncStats) {
    for line in stats.report_lines() {
        reporter.log(&line);
    }
}
