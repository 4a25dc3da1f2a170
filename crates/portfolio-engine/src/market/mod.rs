//! Market Data Integration
//!
//! Abstractions and implementations for market quote providers. Providers
//! are collaborators of the report pipeline: the pipeline only ever sees the
//! snapshot they return, never their errors.

mod coingecko;
mod mock;

pub use coingecko::{CoinGeckoProvider, DEFAULT_MARKETS_URL};
pub use mock::MockQuoteProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{MarketQuote, QuoteBook};

/// Quote provider trait (Strategy pattern)
///
/// Implement this for each market data source: CoinGecko, an exchange, etc.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current market snapshot
    async fn fetch_quotes(&self) -> Result<Vec<MarketQuote>>;

    /// Fetch the snapshot as an identifier-keyed lookup
    async fn fetch_book(&self) -> Result<QuoteBook> {
        Ok(self.fetch_quotes().await?.into_iter().collect())
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}
