pub mod client;
pub mod dto;
pub mod error_message;

pub use client::CloudflareGatewayClient;
pub use error_message::parse_api_error;
