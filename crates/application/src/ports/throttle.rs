use async_trait::async_trait;

/// Pause taken before every mutating gateway call.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}
