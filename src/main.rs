//! Queue ACL CLI
//!
//! Prints the operations an identity may perform on each configured queue.

use clap::Parser;
use queue_acl::{
    Identity, QueueAclService, QueueAclsInfo,
    config::{LogFormat, LoggingConfig, load_config},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Queue ACL resolver - show which queue operations a user may perform
#[derive(Parser, Debug)]
#[command(name = "queue-acl")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "QUEUE_ACL_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides logging.level
    #[arg(long, env = "QUEUE_ACL_LOG_LEVEL")]
    log_level: Option<String>,

    /// User name to resolve ACLs for
    #[arg(short, long)]
    user: String,

    /// Group the user belongs to (repeatable)
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Override acls.enabled from the configuration
    #[arg(long)]
    acls_enabled: Option<bool>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(logging: &LoggingConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn render_text(acls: &[QueueAclsInfo]) -> String {
    acls.iter()
        .map(|info| format!("{}: {}", info.queue_name(), info.operation_names().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    // Pick up QUEUE_ACL__* variables from a local .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(enabled) = args.acls_enabled {
        config.acls.enabled = enabled;
    }

    init_logging(&config.logging, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        acls_enabled = config.acls.enabled,
        "Resolving queue ACLs"
    );

    let service = QueueAclService::from_config(&config)
        .inspect_err(|e| error!(error = %e, "Failed to build queue ACL store"))?;

    let identity = Identity::with_groups(args.user, args.groups);
    let acls = service.get_queue_acls(&identity);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&acls)?);
    } else if !acls.is_empty() {
        println!("{}", render_text(&acls));
    }

    Ok(())
}
