mod config;
mod errors;
mod gateway;
mod insights;
mod models;
mod prompts;
mod routes;
mod service;
mod sse;

use tracing::{info, warn};

use crate::config::Config;
use crate::routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ncert_tutor=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────────
    let config = Config::from_env()?;
    if config.api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY is not set; /chat and /generate-quiz will fail until it is");
    }
    info!(gateway = %config.gateway_url, model = %config.model, "AI gateway configured");

    // ── Router ───────────────────────────────────────────────────────────────
    let app = router(AppState::new(&config));

    // ── Listen ───────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
