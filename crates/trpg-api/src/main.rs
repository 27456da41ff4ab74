//! TRPG session manager API entry point
//!
//! Run with:
//! ```bash
//! cargo run -p trpg-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use trpg_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let tracing_config = TracingConfig::from_log_config(&config.log, config.app.env);
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    trpg_api::run(config).await?;

    Ok(())
}
