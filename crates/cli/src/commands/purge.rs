use anyhow::bail;
use hostsync_application::use_cases::{PurgeManagedUseCase, SyncSettings};
use hostsync_domain::Config;
use hostsync_infrastructure::TracingReporter;
use std::sync::Arc;
use tracing::warn;

pub async fn purge(config: &Config, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        bail!(
            "purge deletes every list named \"{} *\" and every rule hostsync created; pass --yes to confirm",
            config.gateway.list_prefix
        );
    }

    let use_case = PurgeManagedUseCase::new(
        super::gateway(config)?,
        super::throttle(config),
        Arc::new(TracingReporter),
        &SyncSettings::from_config(config),
    );
    let report = use_case.execute().await;

    if let Some(error) = report.error {
        return Err(error.into());
    }
    if report.stats.failures > 0 {
        warn!(failures = report.stats.failures, "Some deletions failed");
    }
    Ok(())
}
