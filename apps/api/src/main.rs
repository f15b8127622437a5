mod config;
mod db;
mod document;
mod errors;
mod llm_client;
mod models;
mod network;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::network::cache::{NoopProfileCache, PgProfileCache, ProfileCache};
use crate::network::{DisabledFetcher, ProfileFetcher, ScraperClient};
use crate::profile::pipeline::ProfileDeps;
use crate::profile::structured::{
    DisabledStructuredExtractor, LlmStructuredExtractor, StructuredExtractor,
};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));

    let extractor: Arc<dyn StructuredExtractor> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_model.clone())?;
            info!("Structured extraction enabled (model: {})", llm.model());
            Arc::new(LlmStructuredExtractor::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; résumés use the heuristic parser only");
            Arc::new(DisabledStructuredExtractor)
        }
    };

    let fetcher: Arc<dyn ProfileFetcher> = match &config.scraper {
        Some(scraper) => {
            info!("Network profile fetching enabled");
            Arc::new(ScraperClient::new(
                scraper.api_url.clone(),
                scraper.api_key.clone(),
            )?)
        }
        None => {
            warn!("SCRAPER_API_URL not set; network profiles are disabled");
            Arc::new(DisabledFetcher)
        }
    };

    let cache: Arc<dyn ProfileCache> = match &config.database_url {
        Some(url) => {
            let cache = PgProfileCache::new(create_pool(url).await?);
            cache.ensure_schema().await?;
            Arc::new(cache)
        }
        None => {
            info!("DATABASE_URL not set; network profiles are not cached");
            Arc::new(NoopProfileCache)
        }
    };

    let state = AppState {
        config: config.clone(),
        profile: ProfileDeps {
            extractor,
            fetcher,
            cache,
        },
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
