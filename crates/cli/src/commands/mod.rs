mod input;
mod plan;
mod purge;
mod sync;

pub use plan::plan;
pub use purge::purge;
pub use sync::sync;

use hostsync_application::ports::{GatewayClient, Throttle};
use hostsync_domain::Config;
use hostsync_infrastructure::{CloudflareGatewayClient, FixedDelayThrottle};
use std::sync::Arc;
use tracing::info;

pub(crate) fn gateway(config: &Config) -> anyhow::Result<Arc<dyn GatewayClient>> {
    let client = CloudflareGatewayClient::from_config(config)?;
    info!(base_url = client.base_url(), "Using gateway API");
    Ok(Arc::new(client))
}

pub(crate) fn throttle(config: &Config) -> Arc<dyn Throttle> {
    Arc::new(FixedDelayThrottle::from_millis(config.sync.throttle_ms))
}
