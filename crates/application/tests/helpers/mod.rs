#![allow(dead_code)]

mod mock_gateway;
mod recording_reporter;

pub use mock_gateway::MockGatewayClient;
pub use recording_reporter::{CountingThrottle, RecordingReporter};

use hostsync_application::services::ListLayout;
use hostsync_application::use_cases::SyncSettings;

pub const PREFIX: &str = "[DNS Tools] AdBlock";

pub fn settings(item_limit: usize) -> SyncSettings {
    SyncSettings {
        layout: ListLayout {
            prefix: PREFIX.to_string(),
            item_limit,
            block_precedence_base: 999_999,
        },
        item_page_limit: 1000,
        override_precedence_base: 10_000,
    }
}

pub fn list_name(n: u32) -> String {
    format!("{} {}", PREFIX, n)
}

pub fn domains(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}.example.com", prefix, i)).collect()
}
