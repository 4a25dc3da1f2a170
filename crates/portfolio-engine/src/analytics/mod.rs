//! Portfolio Analytics
//!
//! The report pipeline: valuation, ranking, risk, allocation and insights,
//! plus the market pulse view over the raw quote snapshot.

mod allocation;
mod insights;
mod policy;
mod pulse;
mod ranking;
mod report;
mod risk;
mod valuation;

pub use allocation::build_allocation;
pub use insights::generate_insights;
pub use policy::{InsightPolicy, ReportPolicy, RiskPolicy};
pub use pulse::{market_pulse, CoverageEntry, MarketPulse};
pub use ranking::{rank_performance, Rankings};
pub use report::{compute_report, compute_report_with};
pub use risk::{classify_risk, volatility_score};
pub use valuation::{value_position, value_positions};
