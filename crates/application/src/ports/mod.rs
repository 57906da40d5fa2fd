mod gateway_client;
mod sync_reporter;
mod throttle;

pub use gateway_client::GatewayClient;
pub use sync_reporter::SyncReporter;
pub use throttle::Throttle;
