use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use insanity_meter::{
    build_service,
    config::{Config, DEFAULT_LOG_LEVEL, load_env_file},
    http::start_http_server,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "insanity-meter")]
#[command(about = "Rates how insane a historical event was, with three comparisons", long_about = None)]
struct Cli {
    /// Address to listen on (overrides config and INSANITY_HTTP_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Path to a TOML config file (overrides INSANITY_METER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Before the subscriber, so RUST_LOG may come from the env file.
    let env_file = load_env_file();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .init();

    match (&env_file, std::env::var("INSANITY_ENV_FILE")) {
        (Some(path), _) => info!("Loaded environment from {}", path.display()),
        (None, Ok(named)) => warn!("INSANITY_ENV_FILE {} could not be loaded", named),
        (None, Err(_)) => {}
    }

    let config = Config::load(cli.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let bind = cli.bind.unwrap_or(config.server.bind);
    info!(
        "Configuration loaded: model={}, max_tokens={}, api_base={}",
        config.model.name, config.model.max_tokens, config.model.api_base
    );

    let service = build_service(&config)?;
    start_http_server(bind, service).await?;

    Ok(())
}
