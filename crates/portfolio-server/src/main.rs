//! portfolio-server
//!
//! Axum server exposing the portfolio report, holding mutations and the
//! market pulse over a periodically refreshed quote snapshot.

mod config;
mod error;
mod handlers;
mod refresh;
mod routes;
mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_engine::market::{CoinGeckoProvider, MockQuoteProvider};
use portfolio_engine::store::JsonFileStore;
use portfolio_engine::QuoteProvider;

use crate::config::{QuoteSource, ServerConfig};
use crate::refresh::spawn_refresh;
use crate::routes::build_router;
use crate::state::{restore_holdings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    // Initialize quote provider
    let provider: Arc<dyn QuoteProvider> = match config.quote_source {
        QuoteSource::CoinGecko => Arc::new(CoinGeckoProvider::new(
            config.markets_url.clone(),
            config.request_timeout,
        )?),
        QuoteSource::Mock => Arc::new(MockQuoteProvider::new()),
    };

    if provider.health_check().await {
        tracing::info!("✓ Quote provider '{}' reachable", provider.name());
    } else {
        tracing::warn!("⚠ Quote provider '{}' not reachable", provider.name());
        tracing::warn!("  Reports will value unquoted holdings at zero until it recovers");
    }

    // Load holdings
    let store = Arc::new(JsonFileStore::new(config.portfolio_file.clone()));
    let holdings = restore_holdings(&*store);
    tracing::info!(
        "Loaded {} holdings from {}",
        holdings.len(),
        store.path().display()
    );

    let state = AppState::new(provider, store, holdings);

    // Periodic quote refresh (first fetch runs immediately)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = spawn_refresh(state.clone(), config.refresh_interval, shutdown_rx);

    let static_dir = config
        .static_dir
        .is_dir()
        .then_some(config.static_dir.as_path());
    if static_dir.is_none() {
        tracing::warn!(
            "⚠ Static directory {} not found - dashboard disabled",
            config.static_dir.display()
        );
    }
    let app = build_router(state, static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portfolio-server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Quotes: {} (every {}s)", config.quote_source.as_str(), config.refresh_interval.as_secs());
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health              - Health check");
    tracing::info!("  GET    /api/coins           - Market snapshot");
    tracing::info!("  GET    /api/portfolio       - Portfolio report");
    tracing::info!("  GET    /api/pulse           - Top movers and coverage");
    tracing::info!("  POST   /api/holdings        - Add (or merge) a holding");
    tracing::info!("  PATCH  /api/holdings/{{id}}   - Amend a holding");
    tracing::info!("  DELETE /api/holdings/{{id}}   - Remove a holding");
    tracing::info!("  DELETE /api/holdings        - Clear the portfolio");
    tracing::info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    refresher.await?;

    Ok(())
}
