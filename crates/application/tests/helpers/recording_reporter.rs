use async_trait::async_trait;
use hostsync_application::ports::{SyncReporter, Throttle};
use hostsync_domain::{Progress, SyncStage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Captures everything a run reports.
#[derive(Default)]
pub struct RecordingReporter {
    logs: Mutex<Vec<String>>,
    progress: Mutex<Vec<Progress>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }

    pub fn has_log(&self, needle: &str) -> bool {
        self.logs.lock().unwrap().iter().any(|l| l.contains(needle))
    }

    pub fn stages(&self) -> Vec<SyncStage> {
        let mut stages: Vec<SyncStage> = Vec::new();
        for p in self.progress.lock().unwrap().iter() {
            if stages.last() != Some(&p.stage) {
                stages.push(p.stage);
            }
        }
        stages
    }

    pub fn last_progress(&self) -> Option<Progress> {
        self.progress.lock().unwrap().last().cloned()
    }
}

impl SyncReporter for RecordingReporter {
    fn log(&self, message: &str) {
        self.logs.lock().unwrap().push(message.to_string());
    }

    fn update_progress(&self, progress: &Progress) {
        self.progress.lock().unwrap().push(progress.clone());
    }
}

/// Throttle that never sleeps but counts how often it was asked to.
#[derive(Default)]
pub struct CountingThrottle {
    pauses: AtomicU64,
}

impl CountingThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> u64 {
        self.pauses.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::Relaxed);
    }
}
