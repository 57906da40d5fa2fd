use hostsync_domain::hosts::{clean_input_lines, parse_hosts_text};
use hostsync_domain::{DomainError, HostEntry, HostsInput};

#[test]
fn test_duplicate_block_line_and_override() {
    let input = HostsInput::parse(
        "0.0.0.0 ads.example.com\n0.0.0.0 ads.example.com\n1.2.3.4 api.example.com",
    )
    .unwrap();

    assert_eq!(input.block_domains, vec!["ads.example.com"]);
    assert_eq!(
        input.overrides,
        vec![HostEntry {
            ip: "1.2.3.4".to_string(),
            domain: "api.example.com".to_string(),
        }]
    );
}

#[test]
fn test_non_ascii_domains_dedupe_case_insensitively() {
    let entries = parse_hosts_text("0.0.0.0 BÜCHER.example\n0.0.0.0 bücher.example\n0.0.0.0 ΔΟΚΙΜΗ.test");

    let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
    assert_eq!(domains, vec!["bücher.example", "δοκιμη.test"]);
}

#[test]
fn test_invalid_lines_are_dropped() {
    let text = "# comment\n\nlocalhost 127.0.0.1\n0.0.0.0\n0.0.0.0 ok.example.com\n::1 v6.example.com";

    let lines = clean_input_lines(text);

    assert_eq!(lines, vec!["0.0.0.0 ok.example.com"]);
}

#[test]
fn test_whitespace_is_collapsed_and_trimmed() {
    let lines = clean_input_lines("   0.0.0.0 \t  spaced.example.com   extra  ");

    assert_eq!(lines, vec!["0.0.0.0 spaced.example.com extra"]);
}

#[test]
fn test_br_tags_split_lines() {
    let entries = parse_hosts_text("0.0.0.0 a.example.com<br>0.0.0.0 b.example.com<BR />10.0.0.1 c.lan");

    let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
    assert_eq!(domains, vec!["a.example.com", "b.example.com", "c.lan"]);
}

#[test]
fn test_crlf_input() {
    let input = HostsInput::parse("0.0.0.0 a.example.com\r\n0.0.0.0 b.example.com\r\n").unwrap();

    assert_eq!(input.block_domains, vec!["a.example.com", "b.example.com"]);
}

#[test]
fn test_first_occurrence_wins_case_insensitively() {
    let input = HostsInput::parse("10.0.0.1 NAS.lan\n0.0.0.0 nas.lan\n10.0.0.2 nas.LAN").unwrap();

    assert!(input.block_domains.is_empty());
    assert_eq!(input.overrides.len(), 1);
    assert_eq!(input.overrides[0].ip, "10.0.0.1");
    assert_eq!(input.overrides[0].domain, "nas.lan");
}

#[test]
fn test_only_exact_block_address_blocks() {
    let input = HostsInput::parse("0.0.0.0 a.com\n0.0.0.00 b.com\n127.0.0.1 c.com").unwrap();

    assert_eq!(input.block_domains, vec!["a.com"]);
    assert_eq!(input.overrides.len(), 2);
}

#[test]
fn test_order_is_preserved() {
    let input = HostsInput::parse("0.0.0.0 z.com\n0.0.0.0 a.com\n0.0.0.0 m.com").unwrap();

    assert_eq!(input.block_domains, vec!["z.com", "a.com", "m.com"]);
}

#[test]
fn test_no_valid_lines_is_an_error() {
    assert_eq!(
        HostsInput::parse("nothing here\n# 0.0.0.0 commented.com").unwrap_err(),
        DomainError::NoValidEntries
    );
    assert_eq!(HostsInput::parse("").unwrap_err(), DomainError::NoValidEntries);
}
