use hostsync_application::use_cases::{PreviewSyncUseCase, SyncSettings};
use hostsync_domain::Config;
use std::path::Path;

use super::input::read_hosts;

/// Prints what `sync` would change, without changing anything.
pub async fn plan(config: &Config, input: &Path) -> anyhow::Result<()> {
    let hosts = read_hosts(input)?;
    let use_case = PreviewSyncUseCase::new(super::gateway(config)?, SyncSettings::from_config(config));
    let preview = use_case.execute(&hosts).await?;

    for line in preview.summary_lines() {
        println!("{}", line);
    }
    if preview.is_converged() {
        println!("Nothing to do.");
    }
    Ok(())
}
