use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use backend_api_signup::config::{self, AppConfig};
use backend_api_signup::store::MySqlUserStore;
use backend_api_signup::{AppState, create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    // Initialize tracing for structured logs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Friendly error for missing or bad settings before we attempt to connect
    let app_config = AppConfig::from_env().map_err(|e| {
        tracing::error!("{e}. Copy `.env.example` to `.env` or set it in your environment.");
        e
    })?;

    // Establish database connection (and run migrations)
    let db_pool = config::database::establish_connection(&app_config.database).await?;

    let state = AppState::new(Arc::new(MySqlUserStore::new(db_pool)), app_config.hashing.clone());
    let app = create_app(state, &app_config.cors);

    // Address to bind the server
    let addr: SocketAddr = format!("{}:{}", app_config.server.host, app_config.server.port).parse()?;

    tracing::info!("Listening on http://{}", addr);

    // Start the server and stop it on ctrl-c
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
