use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use ticket_panel_api::{app, config, middleware, services};

use storage::{DocumentStore, Documents, FileStore, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!("Starting Ticket Panel API v{}", env!("CARGO_PKG_VERSION"));

    // Construct the document store backend
    let store: Arc<dyn DocumentStore> = match config.storage.backend.as_str() {
        "sqlite" => Arc::new(SqliteStore::connect(&config.storage.database_url).await?),
        _ => Arc::new(FileStore::new(&config.storage.data_dir)),
    };
    info!(backend = %config.storage.backend, "Document store ready");

    let docs = Documents::new(store);

    // Seed the admin user before accepting requests
    services::seed::seed_admin_user(&docs, &config.auth).await?;

    // Build application
    let app = app::create_app(config.clone(), docs);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
