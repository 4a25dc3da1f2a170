//! Mock Quote Provider
//!
//! For testing and demo purposes. Returns a fixed market snapshot.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::QuoteProvider;
use crate::error::{EngineError, Result};
use crate::model::MarketQuote;

/// Mock provider with static quotes
pub struct MockQuoteProvider {
    quotes: Vec<MarketQuote>,
    fail: bool,
}

impl Default for MockQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self {
            quotes: default_snapshot(),
            fail: false,
        }
    }

    /// Serve a custom snapshot
    pub const fn with_quotes(quotes: Vec<MarketQuote>) -> Self {
        Self { quotes, fail: false }
    }

    /// A provider that always errors (for outage handling)
    pub const fn unavailable() -> Self {
        Self {
            quotes: Vec::new(),
            fail: true,
        }
    }
}

// (id, symbol, name, price, 24h change, 24h volume)
const SNAPSHOT: &[(&str, &str, &str, Decimal, Decimal, Decimal)] = &[
    ("bitcoin", "btc", "Bitcoin", dec!(97500), dec!(2.5), dec!(25_000_000_000)),
    ("ethereum", "eth", "Ethereum", dec!(3450), dec!(1.8), dec!(15_000_000_000)),
    ("solana", "sol", "Solana", dec!(195), dec!(4.2), dec!(3_000_000_000)),
    ("cardano", "ada", "Cardano", dec!(0.95), dec!(-1.2), dec!(650_000_000)),
    ("polkadot", "dot", "Polkadot", dec!(7.20), dec!(0.8), dec!(310_000_000)),
    ("chainlink", "link", "Chainlink", dec!(24.50), dec!(3.1), dec!(540_000_000)),
    ("avalanche-2", "avax", "Avalanche", dec!(42.00), dec!(5.5), dec!(480_000_000)),
    ("cosmos", "atom", "Cosmos", dec!(9.80), dec!(1.2), dec!(190_000_000)),
    ("ripple", "xrp", "XRP", dec!(2.35), dec!(0.9), dec!(4_100_000_000)),
    ("dogecoin", "doge", "Dogecoin", dec!(0.38), dec!(12.0), dec!(2_200_000_000)),
    ("shiba-inu", "shib", "Shiba Inu", dec!(0.000022), dec!(-8.0), dec!(700_000_000)),
    ("uniswap", "uni", "Uniswap", dec!(14.20), dec!(2.2), dec!(260_000_000)),
    ("litecoin", "ltc", "Litecoin", dec!(105), dec!(1.5), dec!(620_000_000)),
];

fn default_snapshot() -> Vec<MarketQuote> {
    SNAPSHOT
        .iter()
        .map(|&(id, symbol, name, price, change, volume)| {
            MarketQuote::new(id, symbol, name, price)
                .with_change_24h(change)
                .with_volume(volume)
        })
        .collect()
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn fetch_quotes(&self) -> Result<Vec<MarketQuote>> {
        if self.fail {
            return Err(EngineError::MarketData("mock provider unavailable".into()));
        }
        Ok(self.quotes.clone())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}
