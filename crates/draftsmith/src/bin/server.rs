//! Content-operations server binary
//!
//! Run with: cargo run -p draftsmith --bin draftsmith-server

use draftsmith::{config::AppConfig, server::ContentServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftsmith=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (file path overridable via DRAFTSMITH_CONFIG)
    let config_path =
        std::env::var("DRAFTSMITH_CONFIG").unwrap_or_else(|_| "draftsmith.toml".to_string());
    let config = AppConfig::load(&config_path)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Text model: {}", config.llm.text_model);
    tracing::info!("  - Image model: {}", config.llm.image_model);
    tracing::info!("  - Business: {}", config.business.name);
    tracing::info!("  - Database: {}", config.storage.database_path.display());

    if config.llm.api_key.is_none() {
        tracing::error!(
            "No API key found in ${}; set it before starting",
            config.llm.api_key_env
        );
    }

    // Fails fast on a missing credential or unopenable database
    let server = ContentServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  GET  /api/knowledge       - List knowledge records");
    println!("  POST /api/knowledge       - Add and enrich one entry");
    println!("  POST /api/ingest          - Upload a JSON/CSV batch file");
    println!("  GET  /api/drafts          - List drafts");
    println!("  POST /api/drafts/generate - Generate social post drafts");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
