//! Application State

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use portfolio_engine::{HoldingBook, HoldingStore, MarketQuote, QuoteBook, QuoteProvider};

/// Market feed health, as shown next to the dashboard header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Idle,
    Loading,
    Error,
}

/// Latest successfully fetched snapshot plus refresh status
#[derive(Debug)]
pub struct MarketFeed {
    pub quotes: Vec<MarketQuote>,
    pub book: QuoteBook,
    pub status: FeedStatus,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for MarketFeed {
    fn default() -> Self {
        Self {
            quotes: Vec::new(),
            book: QuoteBook::new(),
            status: FeedStatus::Idle,
            error: None,
            updated_at: None,
        }
    }
}

impl MarketFeed {
    pub fn begin_refresh(&mut self) {
        self.status = FeedStatus::Loading;
        self.error = None;
    }

    pub fn apply_snapshot(&mut self, quotes: Vec<MarketQuote>) {
        self.book = quotes.iter().collect();
        self.quotes = quotes;
        self.status = FeedStatus::Idle;
        self.error = None;
        self.updated_at = Some(Utc::now());
    }

    /// Keep the previous snapshot and flag the failure
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.status = FeedStatus::Error;
        self.error = Some(message.into());
    }

    pub fn summary(&self) -> FeedSummary {
        FeedSummary {
            status: self.status,
            error: self.error.clone(),
            updated_at: self.updated_at,
            quote_count: self.quotes.len(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FeedSummary {
    pub status: FeedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub quote_count: usize,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Market quote provider (CoinGecko, mock)
    pub provider: Arc<dyn QuoteProvider>,

    /// Durable store for the holding list
    pub store: Arc<dyn HoldingStore>,

    /// In-memory holding list; mutations persist through `store` first
    pub holdings: Arc<RwLock<HoldingBook>>,

    /// Latest market snapshot
    pub feed: Arc<RwLock<MarketFeed>>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        store: Arc<dyn HoldingStore>,
        holdings: HoldingBook,
    ) -> Self {
        Self {
            provider,
            store,
            holdings: Arc::new(RwLock::new(holdings)),
            feed: Arc::new(RwLock::new(MarketFeed::default())),
        }
    }
}

/// Load the saved holdings, starting empty when the store cannot be read
pub fn restore_holdings(store: &dyn HoldingStore) -> HoldingBook {
    match store.load() {
        Ok(positions) => HoldingBook::from_positions(positions),
        Err(e) => {
            tracing::error!("Failed to restore portfolio from storage: {}", e);
            HoldingBook::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_engine::store::JsonFileStore;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_truncated_store_restores_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio.json");
        std::fs::write(&path, "[{\"id\": \"bitcoin\", \"quant").unwrap();

        let book = restore_holdings(&JsonFileStore::new(&path));
        assert!(book.is_empty());
    }

    #[test]
    fn test_restore_reads_saved_holdings() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("portfolio.json"));
        let btc = portfolio_engine::Position::new("bitcoin", "btc", "Bitcoin", dec!(1), dec!(20000)).unwrap();
        store.save(&[btc.clone(), btc]).unwrap();

        let book = restore_holdings(&store);
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("bitcoin").unwrap().quantity, dec!(2));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut feed = MarketFeed::default();
        feed.apply_snapshot(vec![MarketQuote::new("bitcoin", "btc", "Bitcoin", dec!(97500))]);

        feed.begin_refresh();
        assert_eq!(feed.status, FeedStatus::Loading);

        feed.record_failure("provider down");
        assert_eq!(feed.status, FeedStatus::Error);
        assert_eq!(feed.quotes.len(), 1);
        assert!(feed.book.get("bitcoin").is_some());
        assert_eq!(feed.summary().error.as_deref(), Some("provider down"));
    }
}
