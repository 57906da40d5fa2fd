use serde::Serialize;
use std::fmt;

/// Stages of a sync run. `Error` is terminal and only entered when a
/// snapshot read fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Idle,
    Analyzing,
    Deduplicating,
    Cleaning,
    Creating,
    Reconciling,
    Purging,
    Done,
    Error,
}

impl SyncStage {
    pub fn to_str(&self) -> &'static str {
        match self {
            SyncStage::Idle => "idle",
            SyncStage::Analyzing => "analyzing",
            SyncStage::Deduplicating => "deduplicating",
            SyncStage::Cleaning => "cleaning",
            SyncStage::Creating => "creating",
            SyncStage::Reconciling => "reconciling",
            SyncStage::Purging => "purging",
            SyncStage::Done => "done",
            SyncStage::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncStage::Done | SyncStage::Error)
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub stage: SyncStage,
    pub message: String,
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(stage: SyncStage, message: impl Into<String>, current: usize, total: usize) -> Self {
        Self {
            stage,
            message: message.into(),
            current,
            total,
        }
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}
