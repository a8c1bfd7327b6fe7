mod assessment;
mod config;
mod db;
mod errors;
mod models;
mod profile;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, MEMORY_STORE_PATH};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{
    InMemoryProfileStore, LocalFileProfileStore, PgProfileStore, ProfileStore, TieredProfileStore,
};

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

    let store = build_profile_store(&config).await?;
    info!("Profile store ready (backend: {})", store.backend());

    let state = AppState { store };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Local store as the primary tier, Postgres as the remote tier when
/// `DATABASE_URL` is set. An unreachable database leaves the service local-only.
async fn build_profile_store(config: &Config) -> Result<Arc<dyn ProfileStore>> {
    let local: Arc<dyn ProfileStore> = if config.profile_store_path == MEMORY_STORE_PATH {
        Arc::new(InMemoryProfileStore::new())
    } else {
        let file = LocalFileProfileStore::open(&config.profile_store_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to open local profile store at '{}'",
                    config.profile_store_path
                )
            })?;
        Arc::new(file)
    };

    let Some(database_url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set; profiles are stored locally only");
        return Ok(Arc::new(TieredProfileStore::local_only(local)));
    };

    let remote = match create_pool(database_url, config.db_max_connections).await {
        Ok(pool) => {
            let pg = PgProfileStore::new(pool);
            match pg.ensure_schema().await {
                Ok(()) => Some(Arc::new(pg) as Arc<dyn ProfileStore>),
                Err(e) => {
                    warn!("Could not prepare user_profiles table, continuing local-only: {e}");
                    None
                }
            }
        }
        Err(e) => {
            warn!("PostgreSQL unavailable, continuing local-only: {e}");
            None
        }
    };

    Ok(Arc::new(TieredProfileStore::new(local, remote)))
}
