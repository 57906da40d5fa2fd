use hostsync_application::use_cases::{PreviewSyncUseCase, RunSyncUseCase, SyncSettings};
use hostsync_domain::Config;
use hostsync_infrastructure::TracingReporter;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::input::read_hosts;

pub async fn sync(config: &Config, input: &Path) -> anyhow::Result<()> {
    let hosts = read_hosts(input)?;
    let client = super::gateway(config)?;
    let settings = SyncSettings::from_config(config);

    let use_case = RunSyncUseCase::new(
        client.clone(),
        super::throttle(config),
        Arc::new(TracingReporter),
        settings.clone(),
    );
    let report = use_case.execute(&hosts).await;

    if let Some(error) = report.error {
        return Err(error.into());
    }
    if report.stats.failures > 0 {
        warn!(failures = report.stats.failures, "Some operations failed");
    }

    if config.sync.debug {
        info!("Debug mode, skipping convergence check");
        return Ok(());
    }

    info!(
        delay_secs = config.sync.refresh_delay_secs,
        "Re-reading remote state to confirm convergence"
    );
    tokio::time::sleep(Duration::from_secs(config.sync.refresh_delay_secs)).await;

    let preview = PreviewSyncUseCase::new(client, settings).execute(&hosts).await?;
    if preview.is_converged() {
        info!("Remote state matches input");
    } else {
        warn!("Remote state still differs from input");
        for line in preview.summary_lines() {
            warn!("{}", line);
        }
    }
    Ok(())
}
