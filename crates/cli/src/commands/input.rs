use anyhow::Context;
use hostsync_domain::HostsInput;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Reads hosts text from a file, or from stdin when the path is `-`.
pub fn read_hosts(path: &Path) -> anyhow::Result<HostsInput> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read hosts from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let input = HostsInput::parse(&text)?;
    info!(
        block_domains = input.block_domains.len(),
        overrides = input.overrides.len(),
        "Parsed hosts input"
    );
    Ok(input)
}
