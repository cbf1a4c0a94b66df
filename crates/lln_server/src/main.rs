//! Law of Large Numbers dashboard server
//!
//! Serves the browser dashboard and the simulation API.

use clap::Parser;
use lln_server::config::{build_config, CliArgs as ConfigCliArgs};
use lln_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Law of Large Numbers dashboard - Bernoulli simulation in the browser
#[derive(Parser, Debug)]
#[command(name = "lln_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "LLN_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "LLN_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LLN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Largest sample size a request may ask for
    #[arg(long, env = "LLN_MAX_SAMPLE_SIZE")]
    max_sample_size: Option<u64>,

    /// Preset used when a request names none (classic, log-scale)
    #[arg(long, env = "LLN_DEFAULT_PRESET")]
    preset: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            max_sample_size: args.max_sample_size,
            preset: args.preset,
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

    tracing::info!("Law of Large Numbers server v{}", lln_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        max_sample_size = config.max_sample_size,
        default_preset = %config.default_preset,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    tracing::info!(address = %server.config().socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
