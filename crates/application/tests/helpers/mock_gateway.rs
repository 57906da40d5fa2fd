use async_trait::async_trait;
use hostsync_application::ports::GatewayClient;
use hostsync_domain::{DomainError, GatewayRule, ManagedList, RulePayload};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MockList {
    id: String,
    name: String,
    items: Vec<String>,
}

#[derive(Default)]
struct MockState {
    lists: Vec<MockList>,
    rules: Vec<GatewayRule>,
    next_id: u64,
}

impl MockState {
    fn next_id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", kind, self.next_id)
    }

    fn list_mut(&mut self, list_id: &str) -> Result<&mut MockList, DomainError> {
        self.lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| DomainError::remote_fetch(404, "list not found"))
    }
}

/// In-memory gateway account. Behaves like the real service for the calls
/// the engine makes, including refusing to delete a list a rule still uses.
#[derive(Clone)]
pub struct MockGatewayClient {
    state: Arc<RwLock<MockState>>,
    failing: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
    mutations: Arc<AtomicU64>,
}

impl MockGatewayClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState::default())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            mutations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Seeds a list and returns its id.
    pub async fn add_list(&self, name: &str, items: Vec<String>) -> String {
        let mut state = self.state.write().await;
        let id = state.next_id("list");
        state.lists.push(MockList {
            id: id.clone(),
            name: name.to_string(),
            items,
        });
        id
    }

    /// Seeds a rule from a payload and returns its id.
    pub async fn add_rule(&self, payload: &RulePayload) -> String {
        let mut state = self.state.write().await;
        let id = state.next_id("rule");
        state.rules.push(rule_from_payload(&id, payload));
        id
    }

    pub async fn fail_on(&self, operation: &str) {
        self.failing.write().await.insert(operation.to_string());
    }

    pub async fn recover(&self, operation: &str) {
        self.failing.write().await.remove(operation);
    }

    pub async fn lists(&self) -> Vec<ManagedList> {
        self.state
            .read()
            .await
            .lists
            .iter()
            .map(|l| ManagedList::new(l.id.clone(), l.name.clone(), l.items.len()))
            .collect()
    }

    pub async fn items(&self, list_id: &str) -> Vec<String> {
        self.state
            .read()
            .await
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .map(|l| l.items.clone())
            .unwrap_or_default()
    }

    pub async fn rules(&self) -> Vec<GatewayRule> {
        self.state.read().await.rules.clone()
    }

    /// Every domain held by any list, with repeats.
    pub async fn all_items(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .lists
            .iter()
            .flat_map(|l| l.items.clone())
            .collect()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::Relaxed)
    }

    async fn enter(&self, call: String, operation: &str, mutating: bool) -> Result<(), DomainError> {
        self.calls.write().await.push(call);
        if mutating {
            self.mutations.fetch_add(1, Ordering::Relaxed);
        }
        if self.failing.read().await.contains(operation) {
            return Err(DomainError::remote_fetch(
                500,
                format!("mock failure in {}", operation),
            ));
        }
        Ok(())
    }
}

impl Default for MockGatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

fn rule_from_payload(id: &str, payload: &RulePayload) -> GatewayRule {
    GatewayRule {
        id: id.to_string(),
        name: payload.name.clone(),
        traffic: payload.traffic.clone(),
        precedence: payload.precedence,
        override_ips: payload.override_ips.clone(),
    }
}

#[async_trait]
impl GatewayClient for MockGatewayClient {
    async fn list_lists(&self) -> Result<Vec<ManagedList>, DomainError> {
        self.enter("list_lists".to_string(), "list_lists", false)
            .await?;
        Ok(self.lists().await)
    }

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        self.enter("list_rules".to_string(), "list_rules", false)
            .await?;
        Ok(self.rules().await)
    }

    async fn list_items(&self, list_id: &str, limit: usize) -> Result<Vec<String>, DomainError> {
        self.enter(format!("list_items:{}", list_id), "list_items", false)
            .await?;
        let mut items = self.items(list_id).await;
        items.truncate(limit);
        Ok(items)
    }

    async fn create_list(&self, name: &str) -> Result<ManagedList, DomainError> {
        self.enter(format!("create_list:{}", name), "create_list", true)
            .await?;
        let id = self.add_list(name, Vec::new()).await;
        Ok(ManagedList::new(id, name, 0))
    }

    async fn append_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError> {
        self.enter(
            format!("append_items:{}:{}", list_id, domains.len()),
            "append_items",
            true,
        )
        .await?;
        let mut state = self.state.write().await;
        state.list_mut(list_id)?.items.extend(domains.iter().cloned());
        Ok(())
    }

    async fn remove_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError> {
        self.enter(
            format!("remove_items:{}:{}", list_id, domains.len()),
            "remove_items",
            true,
        )
        .await?;
        let mut state = self.state.write().await;
        let list = state.list_mut(list_id)?;
        // Bulk removal drops every copy of a value in the list.
        list.items.retain(|item| !domains.contains(item));
        Ok(())
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), DomainError> {
        self.enter(format!("delete_list:{}", list_id), "delete_list", true)
            .await?;
        let mut state = self.state.write().await;
        let reference = format!("${}", list_id);
        if state.rules.iter().any(|r| r.traffic.contains(&reference)) {
            return Err(DomainError::remote_fetch(400, "list is referenced by a rule"));
        }
        let before = state.lists.len();
        state.lists.retain(|l| l.id != list_id);
        if state.lists.len() == before {
            return Err(DomainError::remote_fetch(404, "list not found"));
        }
        Ok(())
    }

    async fn create_rule(&self, payload: &RulePayload) -> Result<GatewayRule, DomainError> {
        self.enter(format!("create_rule:{}", payload.name), "create_rule", true)
            .await?;
        let mut state = self.state.write().await;
        let id = state.next_id("rule");
        let rule = rule_from_payload(&id, payload);
        state.rules.push(rule.clone());
        Ok(rule)
    }

    async fn update_rule(&self, rule_id: &str, payload: &RulePayload) -> Result<(), DomainError> {
        self.enter(format!("update_rule:{}", rule_id), "update_rule", true)
            .await?;
        let mut state = self.state.write().await;
        let rule = state
            .rules
            .iter_mut()
            .find(|r| r.id == rule_id)
            .ok_or_else(|| DomainError::remote_fetch(404, "rule not found"))?;
        *rule = rule_from_payload(rule_id, payload);
        Ok(())
    }

    async fn delete_rule(&self, rule_id: &str) -> Result<(), DomainError> {
        self.enter(format!("delete_rule:{}", rule_id), "delete_rule", true)
            .await?;
        let mut state = self.state.write().await;
        let before = state.rules.len();
        state.rules.retain(|r| r.id != rule_id);
        if state.rules.len() == before {
            return Err(DomainError::remote_fetch(404, "rule not found"));
        }
        Ok(())
    }
}
