use regex::Regex;
use std::sync::LazyLock;

use super::dto::ApiErrorDetail;

static HTML_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").expect("static regex"));

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

/// Human-readable message for a non-2xx response.
///
/// Tries, in order: the first entry of the JSON `errors` array (with its
/// code), a top-level JSON `message`, the `<title>` of an HTML page, and
/// finally a generic message carrying only the status.
pub fn parse_api_error(status: u16, body: &str) -> String {
    let generic = format!("API error ({})", status);

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            if let Some(first) = parsed.errors.first() {
                let message = first.message.as_deref().unwrap_or("unknown error");
                return match &first.code {
                    Some(serde_json::Value::String(code)) => format!("{} (code: {})", message, code),
                    Some(code) if !code.is_null() => format!("{} (code: {})", message, code),
                    _ => message.to_string(),
                };
            }
            parsed.message.filter(|m| !m.is_empty()).unwrap_or(generic)
        }
        Err(_) => HTML_TITLE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or(generic),
    }
}
