//! Service entry point: logging, configuration, schema, server, signals.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brightspot::api::server::start_server;
use brightspot::api::types::ApiContext;
use brightspot::config::{default_log_filter, AppConfig, APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!(name = APP_NAME, version = APP_VERSION, "starting");

    let config = AppConfig::from_env()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let bind_addr = config.bind_addr;
    let ctx = ApiContext::new(config);
    ctx.store.ensure_schema()?;

    let mut handle = start_server(ctx, bind_addr).await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, draining");
    handle.shutdown();

    Ok(())
}
