pub mod gateway;
pub mod reporter;
pub mod throttle;

pub use gateway::CloudflareGatewayClient;
pub use reporter::TracingReporter;
pub use throttle::{FixedDelayThrottle, NoThrottle};
