pub mod run_sync;
pub mod settings;

pub use run_sync::{RunSyncUseCase, SyncReport};
pub use settings::SyncSettings;
