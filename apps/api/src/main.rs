mod analysis;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::{default_page_config, ReportFont};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting record analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation-service client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.analysis_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.analysis_api_url
    );

    // Load and validate the export font (must cover Hangul)
    let report_font = ReportFont::load(&config.report_font_path)?;
    let page_config = default_page_config();
    info!(
        "Report font: {} at {}pt, {} lines per page",
        report_font.name(),
        page_config.font_size_pt,
        page_config.lines_per_page()
    );

    // Build app state
    let state = AppState {
        analysis: Arc::new(llm),
        report_font: Arc::new(report_font),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
