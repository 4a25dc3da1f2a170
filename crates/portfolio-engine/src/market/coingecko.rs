//! CoinGecko Quote Provider
//!
//! Reads the public `/coins/markets` listing (USD, top 250 by market cap,
//! with 1h/24h/7d change percentages).

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::QuoteProvider;
use crate::error::{EngineError, Result};
use crate::model::MarketQuote;

pub const DEFAULT_MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=250&page=1&sparkline=false&price_change_percentage=1h,24h,7d";

/// Market row as served by CoinGecko. Numeric fields are nullable.
#[derive(Debug, Deserialize)]
struct CoinMarket {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    price_change_percentage_7d_in_currency: Option<f64>,
}

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

impl From<CoinMarket> for MarketQuote {
    fn from(row: CoinMarket) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            name: row.name,
            image: row.image,
            current_price: to_decimal(row.current_price).unwrap_or(Decimal::ZERO),
            price_change_24h: to_decimal(
                row.price_change_percentage_24h_in_currency
                    .or(row.price_change_percentage_24h),
            ),
            total_volume: to_decimal(row.total_volume),
            price_change_1h: to_decimal(row.price_change_percentage_1h_in_currency),
            price_change_7d: to_decimal(row.price_change_percentage_7d_in_currency),
        }
    }
}

/// CoinGecko markets client
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    url: String,
    ping_url: Option<String>,
}

/// `/ping` next to the markets endpoint (`.../api/v3/coins/markets` → `.../api/v3/ping`)
fn ping_url_for(markets_url: &str) -> Option<String> {
    markets_url
        .split_once("/coins/markets")
        .map(|(base, _)| format!("{base}/ping"))
}

impl CoinGeckoProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        let url = url.into();
        Ok(Self {
            client,
            ping_url: ping_url_for(&url),
            url,
        })
    }
}

#[async_trait]
impl QuoteProvider for CoinGeckoProvider {
    async fn fetch_quotes(&self) -> Result<Vec<MarketQuote>> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::MarketData(format!(
                "market data provider responded with {status}"
            )));
        }

        let rows: Vec<CoinMarket> = response.json().await?;
        tracing::debug!(count = rows.len(), "fetched CoinGecko markets");

        Ok(rows.into_iter().map(MarketQuote::from).collect())
    }

    async fn health_check(&self) -> bool {
        let Some(ping_url) = &self.ping_url else {
            return self.fetch_quotes().await.is_ok();
        };

        match self.client.get(ping_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("CoinGecko ping failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}
