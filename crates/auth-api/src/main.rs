//! Auth API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p auth-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use auth_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Pick the log format for the environment, even if the rest of the config is broken
    let tracing_config = config.as_ref().map_or_else(
        |_| TracingConfig::default(),
        |c| TracingConfig::for_environment(c.app.env),
    );
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = auth_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
