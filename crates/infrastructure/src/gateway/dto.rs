//! Wire shapes of the gateway lists/rules API.

use hostsync_domain::{GatewayRule, ManagedList, RuleAction, RulePayload};
use serde::{Deserialize, Serialize};

/// Success envelope around every response body. Error bodies are parsed
/// separately in `error_message`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

/// One entry of the `errors` array in a failed response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: usize,
}

impl From<ListDto> for ManagedList {
    fn from(dto: ListDto) -> Self {
        ManagedList::new(dto.id, dto.name, dto.count)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListItemDto {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct RuleDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub traffic: String,
    #[serde(default)]
    pub precedence: i64,
    #[serde(default)]
    pub rule_settings: Option<RuleSettingsDto>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RuleSettingsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_ips: Option<Vec<String>>,
}

impl From<RuleDto> for GatewayRule {
    fn from(dto: RuleDto) -> Self {
        GatewayRule {
            id: dto.id,
            name: dto.name,
            traffic: dto.traffic,
            precedence: dto.precedence,
            override_ips: dto
                .rule_settings
                .and_then(|s| s.override_ips)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateListRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl<'a> CreateListRequest<'a> {
    pub fn domains(name: &'a str) -> Self {
        Self {
            name,
            kind: "DOMAIN",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppendItem<'a> {
    pub value: &'a str,
}

/// `PATCH /lists/{id}` body; only the non-empty side is sent.
#[derive(Debug, Default, Serialize)]
pub struct PatchListRequest<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub append: Vec<AppendItem<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<&'a str>,
}

impl<'a> PatchListRequest<'a> {
    pub fn append(domains: &'a [String]) -> Self {
        Self {
            append: domains.iter().map(|d| AppendItem { value: d }).collect(),
            ..Default::default()
        }
    }

    pub fn remove(domains: &'a [String]) -> Self {
        Self {
            remove: domains.iter().map(String::as_str).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RuleRequest<'a> {
    pub name: &'a str,
    pub precedence: i64,
    pub action: RuleAction,
    pub traffic: &'a str,
    pub filters: &'a [String],
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_settings: Option<RuleSettingsDto>,
}

impl<'a> From<&'a RulePayload> for RuleRequest<'a> {
    fn from(payload: &'a RulePayload) -> Self {
        let rule_settings = (!payload.override_ips.is_empty()).then(|| RuleSettingsDto {
            override_ips: Some(payload.override_ips.clone()),
        });
        Self {
            name: &payload.name,
            precedence: payload.precedence,
            action: payload.action,
            traffic: &payload.traffic,
            filters: &payload.filters,
            enabled: payload.enabled,
            rule_settings,
        }
    }
}
