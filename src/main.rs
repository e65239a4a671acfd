mod config;
mod presence;
mod routes;
mod state;
mod ws;

use axum::http::header::HeaderValue;
use tokio::net::TcpListener;

use config::{generate_config_template, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config with layered precedence: defaults < TOML < env < CLI
    let config = Config::load()?;

    // Handle --generate-config: print template and exit
    if config.generate_config {
        print!("{}", generate_config_template());
        return Ok(());
    }

    // Initialize tracing/logging
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "chatroom_server=info".parse().unwrap()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "chatroom_server=info".parse().unwrap()),
            )
            .init();
    }

    tracing::info!("chatroom server v{} starting", env!("CARGO_PKG_VERSION"));

    let allowed_origin: HeaderValue = config.allowed_origin.parse()?;

    // All presence and relay state lives here; nothing survives a restart.
    let app_state = state::AppState::new();

    let app = routes::build_router(app_state, allowed_origin);

    // Bind and serve
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server is running on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
