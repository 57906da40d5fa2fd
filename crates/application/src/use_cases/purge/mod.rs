pub mod purge_managed;

pub use purge_managed::PurgeManagedUseCase;
