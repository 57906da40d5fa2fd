use hostsync_infrastructure::gateway::parse_api_error;

#[test]
fn test_first_error_with_code() {
    let body = r#"{"success":false,"errors":[{"code":1003,"message":"Invalid list"},{"code":1,"message":"second"}]}"#;

    assert_eq!(parse_api_error(400, body), "Invalid list (code: 1003)");
}

#[test]
fn test_string_error_code() {
    let body = r#"{"errors":[{"code":"E42","message":"Nope"}]}"#;

    assert_eq!(parse_api_error(400, body), "Nope (code: E42)");
}

#[test]
fn test_top_level_message() {
    assert_eq!(
        parse_api_error(429, r#"{"message":"Rate limited"}"#),
        "Rate limited"
    );
}

#[test]
fn test_json_without_details_is_generic() {
    assert_eq!(parse_api_error(500, r#"{"errors":[]}"#), "API error (500)");
}

#[test]
fn test_html_title() {
    let body = "<!DOCTYPE html><html><head>\n<TITLE>Attention Required! | Cloudflare</TITLE></head></html>";

    assert_eq!(parse_api_error(403, body), "Attention Required! | Cloudflare");
}

#[test]
fn test_plain_text_is_generic() {
    assert_eq!(parse_api_error(503, "upstream connect error"), "API error (503)");
    assert_eq!(parse_api_error(503, ""), "API error (503)");
}
