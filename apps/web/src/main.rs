mod catalog;
mod config;
mod data;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod store;
mod view;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PostgrestStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; a missing store URL or key is fatal
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting VibeBuilder web v{}", env!("CARGO_PKG_VERSION"));

    let store = PostgrestStore::new(&config.supabase_url, &config.supabase_anon_key)?;
    info!("Remote store client initialized ({})", config.supabase_url);

    let state = AppState::new(config.clone(), Arc::new(store));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
