//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::Bootstrap;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // Schema first, then the seed rows the storefront expects
    let db = Arc::new(Database::connect(&config.database_url).await?);
    Bootstrap::new(Arc::new(Persistence::new(db.get_connection())))
        .seed(&config.admin_username, config.admin_password())
        .await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let addr = config.server_addr();
    let max_upload_bytes = config.max_upload_bytes;
    let app_state = AppState::from_config(db, config);
    let app = create_router(app_state, max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
