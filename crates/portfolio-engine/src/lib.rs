//! # portfolio-engine
//!
//! Metrics engine for a crypto holdings tracker. Turns the user's recorded
//! positions plus a live market snapshot into one consolidated report.
//!
//! ## Pipeline
//!
//! - **Consolidate** - one entry per asset, quantity-weighted average cost
//! - **Value** - join each position with its quote; unquoted assets value at zero
//! - **Rank** - best / worst ROI and largest exposure
//! - **Classify risk** - value-weighted mean |24h change| bucketed into
//!   Conservative / Balanced / Aggressive
//! - **Allocate** - value per asset for the allocation chart
//! - **Advise** - rule-based insights with a positive / neutral / warning tone
//!
//! ## Example Report
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Equity $12,480.00   P/L +$2,480.00 (+24.8%)   24h +$311.90 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BTC  ██████████████████████████  $7,800  (62.5%)           │
//! │  ETH  ██████████                  $3,450  (27.6%)           │
//! │  SOL  ████                        $1,230  (9.9%)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Risk: Balanced (2.5% avg 24h volatility)                   │
//! │  ! Concentration risk - BTC makes up 62.5% of value         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The report functions are pure: no I/O, no clock, no shared state.
//! Quote providers and holding stores are separate seams for the caller.

pub mod analytics;
pub mod error;
pub mod holdings;
pub mod market;
pub mod model;
pub mod store;

pub use analytics::{
    compute_report, compute_report_with, market_pulse, InsightPolicy, MarketPulse, ReportPolicy,
    RiskPolicy,
};
pub use error::{EngineError, Result};
pub use holdings::{consolidate, merge, HoldingBook, PositionAmendment};
pub use market::QuoteProvider;
pub use model::{
    AllocationEntry, Insight, InsightTone, MarketQuote, PerformanceEntry, PortfolioReport,
    Position, QuoteBook, RiskCategory, ValuedPosition,
};
pub use store::HoldingStore;
