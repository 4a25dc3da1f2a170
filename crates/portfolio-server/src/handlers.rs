//! HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portfolio_engine::{
    compute_report, market_pulse, EngineError, HoldingBook, MarketPulse, MarketQuote,
    PortfolioReport, Position, PositionAmendment,
};

use crate::error::ApiError;
use crate::state::{AppState, FeedStatus, FeedSummary};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub quote_source: String,
    pub feed: FeedSummary,
}

#[derive(Serialize)]
pub struct PortfolioResponse {
    pub report: PortfolioReport,
    pub feed: FeedSummary,
}

#[derive(Debug, Deserialize)]
pub struct AddHoldingRequest {
    pub id: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let feed = state.feed.read().await.summary();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        quote_source: state.provider.name().to_string(),
        feed,
    })
}

/// Latest market snapshot
pub async fn list_coins(State(state): State<AppState>) -> Result<Json<Vec<MarketQuote>>, ApiError> {
    let feed = state.feed.read().await;

    if feed.quotes.is_empty() && feed.status == FeedStatus::Error {
        return Err(ApiError::MarketUnavailable(
            feed.error.clone().unwrap_or_else(|| "Failed to fetch market data".into()),
        ));
    }

    Ok(Json(feed.quotes.clone()))
}

/// Full portfolio report against the latest snapshot
pub async fn portfolio_report(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let holdings = state.holdings.read().await;
    let feed = state.feed.read().await;

    Json(PortfolioResponse {
        report: compute_report(holdings.positions(), &feed.book),
        feed: feed.summary(),
    })
}

/// Top movers and per-holding coverage
pub async fn pulse(State(state): State<AppState>) -> Json<MarketPulse> {
    let holdings = state.holdings.read().await;
    let feed = state.feed.read().await;

    Json(market_pulse(&feed.quotes, holdings.positions()))
}

/// Add a holding, merging into an existing entry for the same asset
pub async fn add_holding(
    State(state): State<AppState>,
    Json(payload): Json<AddHoldingRequest>,
) -> Result<Json<Vec<Position>>, ApiError> {
    let position = {
        let feed = state.feed.read().await;
        let quote = feed.book.get(payload.id.trim());
        new_position(payload, quote)?
    };
    tracing::info!(id = %position.id, quantity = %position.quantity, "adding holding");

    update_holdings(&state, |book| book.add(position)).await
}

/// Replace quantity / price / note of an existing holding
pub async fn amend_holding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(amendment): Json<PositionAmendment>,
) -> Result<Json<Vec<Position>>, ApiError> {
    tracing::info!(%id, "amending holding");
    update_holdings(&state, |book| book.amend(&id, amendment).map(|_| ())).await
}

/// Remove one holding
pub async fn remove_holding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Position>>, ApiError> {
    tracing::info!(%id, "removing holding");
    update_holdings(&state, |book| {
        if book.remove(&id) {
            Ok(())
        } else {
            Err(EngineError::PositionNotFound(id.clone()))
        }
    })
    .await
}

/// Remove every holding
pub async fn clear_holdings(State(state): State<AppState>) -> Result<Json<Vec<Position>>, ApiError> {
    tracing::info!("clearing portfolio");
    update_holdings(&state, |book| {
        book.clear();
        Ok(())
    })
    .await
}

// ============================================================================
// Helpers
// ============================================================================

/// Apply a mutation to a copy of the book, persist it, then commit.
/// The write lock is held across the save so mutations persist in order.
async fn update_holdings(
    state: &AppState,
    mutate: impl FnOnce(&mut HoldingBook) -> portfolio_engine::Result<()>,
) -> Result<Json<Vec<Position>>, ApiError> {
    let mut holdings = state.holdings.write().await;

    let mut next = holdings.clone();
    mutate(&mut next)?;

    let store = state.store.clone();
    let snapshot = next.positions().to_vec();
    tokio::task::spawn_blocking(move || store.save(&snapshot))
        .await
        .map_err(|e| EngineError::Storage(format!("save task failed: {e}")))??;

    *holdings = next;

    Ok(Json(holdings.positions().to_vec()))
}

/// Build a position, filling descriptive fields from the quote when absent
fn new_position(
    payload: AddHoldingRequest,
    quote: Option<&MarketQuote>,
) -> portfolio_engine::Result<Position> {
    let id = payload.id.trim().to_string();
    let symbol = payload
        .symbol
        .or_else(|| quote.map(|q| q.symbol.clone()))
        .unwrap_or_else(|| id.clone());
    let name = payload
        .name
        .or_else(|| quote.map(|q| q.name.clone()))
        .unwrap_or_else(|| id.clone());
    let image = payload.image.or_else(|| quote.and_then(|q| q.image.clone()));

    let mut position = Position::new(id, symbol, name, payload.quantity, payload.purchase_price)?;
    if let Some(note) = payload.note {
        position = position.with_note(note);
    }
    if let Some(image) = image {
        position = position.with_image(image);
    }
    Ok(position)
}
