#![allow(dead_code)]

mod mock_api;

pub use mock_api::{MockApi, RecordedRequest};

pub const ACCOUNT: &str = "0123456789abcdef0123456789abcdef";
pub const TOKEN: &str = "test-token";

pub fn gateway_path(suffix: &str) -> String {
    format!("/accounts/{}/gateway{}", ACCOUNT, suffix)
}
