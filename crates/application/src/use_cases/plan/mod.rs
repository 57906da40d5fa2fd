pub mod preview_sync;

pub use preview_sync::{PreviewSyncUseCase, SyncPreview};
