use hostsync_domain::{DomainError, GatewayRule, ManagedList};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::membership::DomainMembership;
use crate::ports::GatewayClient;

/// Point-in-time view of the account's gateway resources.
#[derive(Debug, Clone, Default)]
pub struct RemoteSnapshot {
    /// Managed lists in fetch order.
    pub managed_lists: Vec<ManagedList>,
    pub rules: Vec<GatewayRule>,
    pub membership: DomainMembership,
}

/// Read-only access to lists, rules and list items. Never retries; callers
/// may simply call again.
pub struct RemoteStateReader {
    client: Arc<dyn GatewayClient>,
    list_prefix: String,
    item_page_limit: usize,
}

impl RemoteStateReader {
    pub fn new(client: Arc<dyn GatewayClient>, list_prefix: String, item_page_limit: usize) -> Self {
        Self {
            client,
            list_prefix,
            item_page_limit,
        }
    }

    /// Lists and rules fetched concurrently; the managed subset of lists is
    /// returned in fetch order.
    #[instrument(skip(self))]
    pub async fn read_lists_and_rules(
        &self,
    ) -> Result<(Vec<ManagedList>, Vec<GatewayRule>), DomainError> {
        let (lists, rules) = tokio::join!(self.client.list_lists(), self.client.list_rules());
        let lists = lists?;
        let rules = rules?;

        let managed = self.managed(lists);
        debug!(
            managed_lists = managed.len(),
            rules = rules.len(),
            "Fetched lists and rules"
        );
        Ok((managed, rules))
    }

    pub async fn read_managed_lists(&self) -> Result<Vec<ManagedList>, DomainError> {
        let lists = self.client.list_lists().await?;
        Ok(self.managed(lists))
    }

    pub async fn read_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        self.client.list_rules().await
    }

    /// Items of every list, one bounded page each, in list order.
    #[instrument(skip(self, lists), fields(lists = lists.len()))]
    pub async fn read_membership(
        &self,
        lists: &[ManagedList],
    ) -> Result<DomainMembership, DomainError> {
        let mut membership = DomainMembership::new();
        for list in lists {
            let items = self
                .client
                .list_items(&list.id, self.item_page_limit)
                .await?;
            for item in &items {
                membership.insert(item, &list.id);
            }
        }
        debug!(domains = membership.len(), "Read list membership");
        Ok(membership)
    }

    pub async fn read_snapshot(&self) -> Result<RemoteSnapshot, DomainError> {
        let (managed_lists, rules) = self.read_lists_and_rules().await?;
        let membership = self.read_membership(&managed_lists).await?;
        Ok(RemoteSnapshot {
            managed_lists,
            rules,
            membership,
        })
    }

    fn managed(&self, lists: Vec<ManagedList>) -> Vec<ManagedList> {
        lists
            .into_iter()
            .filter(|l| l.is_managed(&self.list_prefix))
            .collect()
    }
}
