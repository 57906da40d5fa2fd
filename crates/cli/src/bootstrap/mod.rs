use hostsync_domain::{CliOverrides, Config};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: [&str; 4] = [
    "hostsync",
    "hostsync_domain",
    "hostsync_application",
    "hostsync_infrastructure",
];

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Ok(Config::load(path, overrides)?)
}

pub fn log_config_source(path: Option<&str>) {
    match path.map(str::to_string).or_else(Config::get_config_path) {
        Some(path) => info!(path = %path, "Loaded configuration"),
        None => info!("No configuration file found, using defaults"),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured
/// level; dependencies only log warnings unless named explicitly.
pub fn init_logging(config: &Config) {
    let level = if config.sync.debug && config.logging.level == "info" {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = "warn".to_string();
        for krate in CRATES {
            filter.push_str(&format!(",{}={}", krate, level));
        }
        EnvFilter::new(filter)
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.logging.json {
        registry
            .with(fmt::layer().json().flatten_event(true).with_target(true))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).compact())
            .init();
    }
}
