mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod mailer;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::ColumnLayoutEngine;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::LlmClient;
use crate::mailer::SmtpMailer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging comes up first so configuration failures are reported.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().inspect_err(|e| error!("Configuration error: {e}"))?;
    info!(?config, "Configuration loaded");

    // Initialize LLM client
    let llm = LlmClient::new(config.genai_api_key.clone(), config.genai_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize SMTP transport
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.smtp_port,
        &config.sender_email,
        &config.sender_password,
    )?;
    info!(
        "SMTP transport initialized ({}:{})",
        config.smtp_host, config.smtp_port
    );

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        llm: Arc::new(llm),
        mailer: Arc::new(mailer),
        retry: RetryPolicy::default(),
        layout: ColumnLayoutEngine::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
