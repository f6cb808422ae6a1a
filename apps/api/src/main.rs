mod config;
mod errors;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::{MatchEngine, Vocabulary};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvmatch API v{}", env!("CARGO_PKG_VERSION"));

    // A broken vocabulary is fatal: no engine, no service.
    let vocabulary = load_vocabulary(&config)?;
    let engine = MatchEngine::new(vocabulary).context("Failed to build match engine")?;

    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_vocabulary(config: &Config) -> Result<Vocabulary> {
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => {
            info!("Loading skill vocabulary from {}", path.display());
            Vocabulary::from_path(path)
                .with_context(|| format!("Invalid skill vocabulary at {}", path.display()))?
        }
        None => {
            info!("Using built-in skill vocabulary");
            Vocabulary::builtin().context("Built-in skill vocabulary is invalid")?
        }
    };
    info!(
        "Skill vocabulary v{}: {} skills, {} synonyms",
        vocabulary.version(),
        vocabulary.skills().len(),
        vocabulary.synonym_count()
    );
    Ok(vocabulary)
}
