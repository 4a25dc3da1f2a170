//! Router

use std::path::Path;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    add_holding, amend_holding, clear_holdings, health_check, list_coins, portfolio_report,
    pulse, remove_holding,
};
use crate::state::AppState;

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        // Health & market data
        .route("/health", get(health_check))
        .route("/api/coins", get(list_coins))
        .route("/api/pulse", get(pulse))

        // Portfolio
        .route("/api/portfolio", get(portfolio_report))
        .route("/api/holdings", post(add_holding).delete(clear_holdings))
        .route("/api/holdings/{id}", delete(remove_holding).patch(amend_holding));

    // Static files (dashboard frontend)
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use portfolio_engine::market::MockQuoteProvider;
    use portfolio_engine::store::MemoryHoldingStore;
    use portfolio_engine::{HoldingBook, HoldingStore};

    use crate::refresh::refresh_once;

    async fn test_state(provider: MockQuoteProvider) -> (AppState, Arc<MemoryHoldingStore>) {
        let store = Arc::new(MemoryHoldingStore::new());
        let state = AppState::new(Arc::new(provider), store.clone(), HoldingBook::new());
        refresh_once(&state).await;
        (state, store)
    }

    async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = build_router(state.clone(), None).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state(MockQuoteProvider::new()).await;
        let (status, body) = send(&state, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["feed"]["status"], "idle");
    }

    #[tokio::test]
    async fn test_empty_portfolio_report() {
        let (state, _) = test_state(MockQuoteProvider::new()).await;
        let (status, body) = send(&state, "GET", "/api/portfolio", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["report"]["best_performer"].is_null());
        assert_eq!(body["report"]["risk_category"], "Conservative");
        assert_eq!(body["report"]["insights"][0]["tone"], "neutral");
    }

    #[tokio::test]
    async fn test_add_merges_and_persists() {
        let (state, store) = test_state(MockQuoteProvider::new()).await;

        let first = json!({"id": "bitcoin", "quantity": 1, "purchase_price": 20000});
        let second = json!({"id": "bitcoin", "quantity": 1, "purchase_price": 30000, "note": "dip buy"});
        assert_eq!(send(&state, "POST", "/api/holdings", Some(first)).await.0, StatusCode::OK);
        let (status, body) = send(&state, "POST", "/api/holdings", Some(second)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Bitcoin");
        assert_eq!(body[0]["note"], "dip buy");

        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, dec!(2));
        assert_eq!(stored[0].purchase_price, dec!(25000));
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive() {
        let (state, store) = test_state(MockQuoteProvider::new()).await;

        let bad = json!({"id": "bitcoin", "quantity": 0, "purchase_price": 20000});
        let (status, body) = send(&state, "POST", "/api/holdings", Some(bad)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_POSITION");
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_oversized_cost_basis() {
        let (state, store) = test_state(MockQuoteProvider::new()).await;

        let huge = json!({"id": "bitcoin", "quantity": "100000000000000000000", "purchase_price": 1_000_000_000});
        let (status, body) = send(&state, "POST", "/api/holdings", Some(huge)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_POSITION");
        assert!(store.load().unwrap().is_empty());

        let (status, body) = send(&state, "GET", "/api/portfolio", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["holding_count"], 0);
    }

    #[tokio::test]
    async fn test_amend_remove_and_clear() {
        let (state, _) = test_state(MockQuoteProvider::new()).await;

        let btc = json!({"id": "bitcoin", "quantity": 1, "purchase_price": 20000});
        let eth = json!({"id": "ethereum", "quantity": 2, "purchase_price": 3000});
        send(&state, "POST", "/api/holdings", Some(btc)).await;
        send(&state, "POST", "/api/holdings", Some(eth)).await;

        let amend = json!({"quantity": 3});
        let (status, _) = send(&state, "PATCH", "/api/holdings/bitcoin", Some(amend)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.holdings.read().await.get("bitcoin").unwrap().quantity, dec!(3));

        let (status, body) = send(&state, "DELETE", "/api/holdings/ethereum", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&state, "DELETE", "/api/holdings/ethereum", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&state, "DELETE", "/api/holdings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_reflects_quotes() {
        let (state, _) = test_state(MockQuoteProvider::new()).await;

        let btc = json!({"id": "bitcoin", "quantity": 1, "purchase_price": 50000});
        let unlisted = json!({"id": "not-listed", "quantity": 10, "purchase_price": 1, "symbol": "nl"});
        send(&state, "POST", "/api/holdings", Some(btc)).await;
        send(&state, "POST", "/api/holdings", Some(unlisted)).await;

        let (status, body) = send(&state, "GET", "/api/portfolio", None).await;
        assert_eq!(status, StatusCode::OK);

        let report = &body["report"];
        assert_eq!(report["holding_count"], 2);
        assert_eq!(report["allocation"].as_array().unwrap().len(), 1);
        assert_eq!(report["best_performer"]["symbol"], "BTC");
        assert_eq!(report["worst_performer"]["symbol"], "NL");
        let titles: Vec<&str> = report["insights"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["title"].as_str())
            .collect();
        assert!(titles.contains(&"Pricing gap"));
    }

    #[tokio::test]
    async fn test_coins_unavailable_without_snapshot() {
        let (state, _) = test_state(MockQuoteProvider::unavailable()).await;
        let (status, body) = send(&state, "GET", "/api/coins", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "MARKET_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_pulse_lists_movers() {
        let (state, _) = test_state(MockQuoteProvider::new()).await;
        let (status, body) = send(&state, "GET", "/api/pulse", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gainers"].as_array().unwrap().len(), 3);
        assert_eq!(body["gainers"][0]["id"], "dogecoin");
    }
}
