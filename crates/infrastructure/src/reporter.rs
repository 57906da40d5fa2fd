use hostsync_application::ports::SyncReporter;
use hostsync_domain::Progress;
use tracing::info;

/// Forwards run output to `tracing`: log lines as plain events, progress
/// with structured `stage/current/total` fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn log(&self, message: &str) {
        info!(target: "hostsync::run", "{}", message);
    }

    fn update_progress(&self, progress: &Progress) {
        info!(
            target: "hostsync::progress",
            stage = %progress.stage,
            current = progress.current,
            total = progress.total,
            percent = format_args!("{:.0}", progress.percent()),
            "{}",
            progress.message
        );
    }
}
