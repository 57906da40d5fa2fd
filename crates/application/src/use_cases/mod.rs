pub mod plan;
pub mod purge;
pub mod sync;

// Re-export use cases
pub use plan::{PreviewSyncUseCase, SyncPreview};
pub use purge::PurgeManagedUseCase;
pub use sync::{RunSyncUseCase, SyncReport, SyncSettings};
