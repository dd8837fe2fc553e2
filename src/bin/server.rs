//! Recipebox HTTP server
//!
//! # Configuration
//!
//! Environment variables:
//! - `RECIPEBOX_DATA_DIR`: Directory holding `recipes.db` (default: ~/.local/share/recipebox)
//! - `RECIPEBOX_HOST` / `RECIPEBOX_PORT`: Listen address (default: 0.0.0.0:8080)
//! - `RECIPEBOX_JWT_SECRET`: Token signing secret (required)
//! - `RECIPEBOX_AI_BASE_URL`, `RECIPEBOX_AI_API_KEY`, `RECIPEBOX_AI_MODEL`,
//!   `RECIPEBOX_AI_TIMEOUT_SECS`: Text generation backend
//! - `RECIPEBOX_CONFIG`: Path to config file (default: ~/.config/recipebox/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! port: 8080
//! jwt_secret: "change-me"
//! ai:
//!   api_key: "sk-..."
//!   model: "gpt-4o-mini"
//! ```

use std::sync::Arc;

use recipebox::ai::{DisabledGenerator, Generator, OpenAiGenerator};
use recipebox::auth::TokenIssuer;
use recipebox::config::Config;
use recipebox::db::init_db;
use recipebox::server::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipebox=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;
    tracing::debug!(?config, "configuration loaded");

    let database_path = config.database_path();
    tracing::info!("Database: {}", database_path.display());
    let pool = init_db(&database_path).await?;

    let generator: Arc<dyn Generator> = match config.ai.api_key.clone() {
        Some(api_key) => {
            tracing::info!(model = %config.ai.model, "AI assist enabled");
            Arc::new(OpenAiGenerator::new(&config.ai, api_key)?)
        }
        None => {
            tracing::warn!("no AI API key configured, AI routes will fail");
            Arc::new(DisabledGenerator)
        }
    };

    let state = AppState::new(pool, TokenIssuer::new(&config.jwt_secret), generator);
    let app = router(state);

    // Start server
    let addr = config.listen_addr()?;
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
