use hostsync_domain::Progress;

/// Receives user-facing log lines and progress updates from a run.
pub trait SyncReporter: Send + Sync {
    fn log(&self, message: &str);
    fn update_progress(&self, progress: &Progress);
}
