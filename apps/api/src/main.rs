mod config;
mod errors;
mod matching;
mod routes;
mod skills_client;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::extractor::EmsiSkillExtractor;
use crate::routes::build_router;
use crate::skills_client::token::{ClientCredentials, TokenManager};
use crate::skills_client::SkillsClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize skills API client
    let client = SkillsClient::new(&config.skills_auth_url, &config.skills_api_url)
        .context("Failed to build skills API client")?;
    info!("Skills API client initialized ({})", config.skills_api_url);

    // The token cache lives inside the extractor for the lifetime of the process
    let tokens = TokenManager::new(ClientCredentials {
        client_id: config.skills_client_id.clone(),
        client_secret: config.skills_client_secret.clone(),
        scope: config.skills_scope.clone(),
    });
    let extractor = Arc::new(EmsiSkillExtractor::new(client, tokens));

    let state = AppState { extractor };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
