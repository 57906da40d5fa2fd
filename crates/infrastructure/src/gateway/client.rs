use async_trait::async_trait;
use hostsync_application::ports::GatewayClient;
use hostsync_domain::{AccountId, Config, DomainError, GatewayRule, ManagedList, RulePayload};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use super::dto::{
    CreateListRequest, Envelope, ListDto, ListItemDto, PatchListRequest, RuleDto, RuleRequest,
};
use super::error_message::parse_api_error;

/// Gateway API client for one account, authenticated with a bearer token.
pub struct CloudflareGatewayClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl CloudflareGatewayClient {
    pub fn new(
        api_base: &str,
        account: &AccountId,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: format!(
                "{}/accounts/{}/gateway",
                api_base.trim_end_matches('/'),
                account
            ),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let account = config.account_id()?;
        let token = config
            .gateway
            .api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                DomainError::Configuration(
                    "API token not set (use --api-token, CLOUDFLARE_API_TOKEN or [gateway] api_token)"
                        .to_string(),
                )
            })?;
        Self::new(
            &config.gateway.api_base,
            &account,
            token,
            Duration::from_secs(config.gateway.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    /// Sends the request; any non-2xx status becomes `RemoteFetch`.
    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| connection_error(&self.base_url, &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_api_error(status.as_u16(), &body);
        debug!(status = status.as_u16(), message = %message, "Gateway API error");
        Err(DomainError::remote_fetch(status.as_u16(), message))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, DomainError> {
        let response = self.send(request).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidResponse(e.to_string()))?;
        Ok(envelope.result)
    }

    async fn fetch_required<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, DomainError> {
        self.fetch(request)
            .await?
            .ok_or_else(|| DomainError::InvalidResponse(format!("{} missing from response", what)))
    }
}

fn connection_error(base_url: &str, err: &reqwest::Error) -> DomainError {
    if err.is_connect() {
        DomainError::Network(format!("cannot connect to {}", base_url))
    } else if err.is_timeout() {
        DomainError::Network(format!("request to {} timed out", base_url))
    } else {
        DomainError::Network(err.to_string())
    }
}

#[async_trait]
impl GatewayClient for CloudflareGatewayClient {
    #[instrument(skip(self))]
    async fn list_lists(&self) -> Result<Vec<ManagedList>, DomainError> {
        let lists: Option<Vec<ListDto>> = self.fetch(self.request(Method::GET, "/lists")).await?;
        Ok(lists
            .unwrap_or_default()
            .into_iter()
            .map(ManagedList::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        let rules: Option<Vec<RuleDto>> = self.fetch(self.request(Method::GET, "/rules")).await?;
        Ok(rules
            .unwrap_or_default()
            .into_iter()
            .map(GatewayRule::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_items(&self, list_id: &str, limit: usize) -> Result<Vec<String>, DomainError> {
        let request = self
            .request(Method::GET, &format!("/lists/{}/items", list_id))
            .query(&[("limit", limit)]);
        let items: Option<Vec<ListItemDto>> = self.fetch(request).await?;
        Ok(items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.value)
            .collect())
    }

    async fn create_list(&self, name: &str) -> Result<ManagedList, DomainError> {
        let request = self
            .request(Method::POST, "/lists")
            .json(&CreateListRequest::domains(name));
        let list: ListDto = self.fetch_required(request, "created list").await?;
        Ok(list.into())
    }

    async fn append_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError> {
        let request = self
            .request(Method::PATCH, &format!("/lists/{}", list_id))
            .json(&PatchListRequest::append(domains));
        self.send(request).await.map(|_| ())
    }

    async fn remove_items(&self, list_id: &str, domains: &[String]) -> Result<(), DomainError> {
        let request = self
            .request(Method::PATCH, &format!("/lists/{}", list_id))
            .json(&PatchListRequest::remove(domains));
        self.send(request).await.map(|_| ())
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), DomainError> {
        let request = self.request(Method::DELETE, &format!("/lists/{}", list_id));
        self.send(request).await.map(|_| ())
    }

    async fn create_rule(&self, payload: &RulePayload) -> Result<GatewayRule, DomainError> {
        let request = self
            .request(Method::POST, "/rules")
            .json(&RuleRequest::from(payload));
        let rule: RuleDto = self.fetch_required(request, "created rule").await?;
        Ok(rule.into())
    }

    async fn update_rule(&self, rule_id: &str, payload: &RulePayload) -> Result<(), DomainError> {
        let request = self
            .request(Method::PUT, &format!("/rules/{}", rule_id))
            .json(&RuleRequest::from(payload));
        self.send(request).await.map(|_| ())
    }

    async fn delete_rule(&self, rule_id: &str) -> Result<(), DomainError> {
        let request = self.request(Method::DELETE, &format!("/rules/{}", rule_id));
        self.send(request).await.map(|_| ())
    }
}
