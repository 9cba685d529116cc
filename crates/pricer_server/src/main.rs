//! FX Web Pricer Server
//!
//! REST API for contract validation and FX option pricing.

use clap::Parser;
use pricer_server::config::{build_config, CliArgs as ConfigCliArgs};
use pricer_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// FX Web Pricer Server - REST API for FX option pricing
#[derive(Parser, Debug)]
#[command(name = "pricer_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Maximum number of batch items priced at once
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Per-item pricing timeout in milliseconds
    #[arg(long)]
    item_timeout_ms: Option<u64>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            max_concurrency: args.max_concurrency,
            item_timeout_ms: args.item_timeout_ms,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!("FX Web Pricer Server v{}", pricer_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        max_concurrency = config.bulk.max_concurrency,
        item_timeout_ms = config.bulk.item_timeout_ms,
        max_batch_size = config.bulk.max_batch_size,
        evaluation_date = ?config.evaluation_date,
        "Server configuration loaded"
    );
    if config.environment.is_production() && config.evaluation_date.is_some() {
        tracing::warn!("Evaluation date is pinned in production");
    }

    let server = Server::new(config)?;
    let address = server.socket_addr()?;
    tracing::info!(%address, "Starting server");

    server.run().await
}
