use async_trait::async_trait;
use hostsync_domain::{DomainError, GatewayRule, ManagedList, RulePayload};

/// Gateway list and rule resources of one account.
///
/// Every call is a single request with no retry. Errors are either
/// `DomainError::Network` (no response) or `DomainError::RemoteFetch`
/// (non-2xx with the service's message).
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn list_lists(&self) -> Result<Vec<ManagedList>, DomainError>;

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError>;

    /// First page of a list's item values, at most `limit` entries.
    async fn list_items(&self, list_id: &str, limit: usize) -> Result<Vec<String>, DomainError>;

    async fn create_list(&self, name: &str) -> Result<ManagedList, DomainError>;

    async fn append_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError>;

    async fn remove_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError>;

    async fn delete_list(&self, list_id: &str) -> Result<(), DomainError>;

    async fn create_rule(&self, payload: &RulePayload) -> Result<GatewayRule, DomainError>;

    async fn update_rule(&self, rule_id: &str, payload: &RulePayload) -> Result<(), DomainError>;

    async fn delete_rule(&self, rule_id: &str) -> Result<(), DomainError>;
}
