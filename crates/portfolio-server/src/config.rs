//! Server Configuration
//!
//! Read from the environment (a `.env` file is loaded first by `main`).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use portfolio_engine::market::DEFAULT_MARKETS_URL;
use portfolio_engine::EngineError;

/// Where market quotes come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteSource {
    CoinGecko,
    Mock,
}

impl QuoteSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoinGecko => "coingecko",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for QuoteSource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coingecko" => Ok(Self::CoinGecko),
            "mock" => Ok(Self::Mock),
            other => Err(EngineError::Config(format!(
                "unknown QUOTE_SOURCE '{other}' (expected 'coingecko' or 'mock')"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// JSON file holding the position list
    pub portfolio_file: PathBuf,

    pub quote_source: QuoteSource,

    /// CoinGecko markets endpoint
    pub markets_url: String,

    /// Delay between quote refreshes
    pub refresh_interval: Duration,

    /// HTTP timeout for the market provider
    pub request_timeout: Duration,

    /// Frontend bundle served at `/`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            portfolio_file: PathBuf::from("data/portfolio.json"),
            quote_source: QuoteSource::CoinGecko,
            markets_url: DEFAULT_MARKETS_URL.into(),
            refresh_interval: Duration::from_secs(120),
            request_timeout: Duration::from_secs(15),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let defaults = Self::default();

        let quote_source = match lookup("QUOTE_SOURCE") {
            Some(value) => value.parse()?,
            None => defaults.quote_source,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            portfolio_file: lookup("PORTFOLIO_FILE")
                .map_or(defaults.portfolio_file, PathBuf::from),
            quote_source,
            markets_url: lookup("COINGECKO_URL").unwrap_or(defaults.markets_url),
            refresh_interval: seconds(&lookup, "QUOTE_REFRESH_SECS")?
                .unwrap_or(defaults.refresh_interval),
            request_timeout: seconds(&lookup, "QUOTE_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout),
            static_dir: lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        })
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>, EngineError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(EngineError::Config(format!(
            "{key} must be a positive number of seconds, got '{raw}'"
        ))),
    }
}
