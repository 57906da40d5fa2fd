use clap::{Parser, Subcommand};
use hostsync_domain::CliOverrides;
use std::path::PathBuf;
use tracing::info;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "hostsync")]
#[command(version)]
#[command(about = "Sync a hosts file into Cloudflare Gateway block lists and override rules")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Account id (32 hex characters)
    #[arg(long, global = true)]
    account: Option<String>,

    /// Dashboard URL to take the account id from
    #[arg(long, global = true)]
    dashboard_url: Option<String>,

    /// API token (defaults to CLOUDFLARE_API_TOKEN)
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Lowest precedence for new override rules
    #[arg(long, global = true)]
    precedence_base: Option<i64>,

    /// Pause before each mutating call, in milliseconds
    #[arg(long, global = true)]
    throttle_ms: Option<u64>,

    /// Verbose logging and no post-sync convergence check
    #[arg(long, global = true)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile lists and override rules with a hosts file
    Sync {
        /// Hosts file, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Show what `sync` would change without changing it
    Plan {
        /// Hosts file, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Delete every managed list and every rule hostsync created
    Purge {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        account_id: cli.account.clone(),
        dashboard_url: cli.dashboard_url.clone(),
        api_token: cli.api_token.clone(),
        precedence_base: cli.precedence_base,
        throttle_ms: cli.throttle_ms,
        debug: cli.debug,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_config_source(cli.config.as_deref());

    info!("hostsync v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Sync { input } => commands::sync(&config, &input).await,
        Command::Plan { input } => commands::plan(&config, &input).await,
        Command::Purge { yes } => commands::purge(&config, yes).await,
    }
}
