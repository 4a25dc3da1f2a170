//! Report assembly
//!
//! ```text
//! positions ─► consolidate ─► value ─┬─► rank ──────┐
//!                                    ├─► risk ──────┼─► insights ─► PortfolioReport
//!                                    └─► allocate ──┘
//! ```
//!
//! Pure and deterministic: same inputs, same report.

use rust_decimal::Decimal;

use super::allocation::build_allocation;
use super::insights::generate_insights;
use super::policy::ReportPolicy;
use super::ranking::rank_performance;
use super::risk::classify_risk;
use super::valuation::value_positions;
use crate::holdings::consolidate;
use crate::model::{percent_of, PortfolioReport, Position, QuoteBook};

/// Compute the report with the default policy
pub fn compute_report(positions: &[Position], quotes: &QuoteBook) -> PortfolioReport {
    compute_report_with(positions, quotes, &ReportPolicy::default())
}

pub fn compute_report_with(
    positions: &[Position],
    quotes: &QuoteBook,
    policy: &ReportPolicy,
) -> PortfolioReport {
    let consolidated = consolidate(positions);
    let valued = value_positions(&consolidated, quotes);

    let mut total_value = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    let mut daily_change_value = Decimal::ZERO;
    for p in &valued {
        total_value = total_value.saturating_add(p.current_value);
        total_cost = total_cost.saturating_add(p.cost_basis);
        daily_change_value = daily_change_value.saturating_add(p.daily_change_value);
    }
    let total_profit = total_value - total_cost;

    let rankings = rank_performance(&valued);
    let (volatility_score, risk_category) = classify_risk(&valued, &policy.risk);
    let allocation = build_allocation(&valued);

    let mut report = PortfolioReport {
        total_value,
        total_cost,
        total_profit,
        total_profit_pct: percent_of(total_profit, total_cost),
        daily_change_value,
        daily_change_pct: percent_of(daily_change_value, total_value),
        volatility_score,
        risk_category,
        best_performer: rankings.best_performer,
        worst_performer: rankings.worst_performer,
        highest_exposure: rankings.highest_exposure,
        allocation,
        insights: Vec::new(),
        holding_count: valued.len(),
        positions: valued,
    };
    report.insights = generate_insights(&report, &policy.insights);

    tracing::debug!(
        holdings = report.holding_count,
        quotes = quotes.len(),
        total_value = %report.total_value,
        risk = %report.risk_category,
        insights = report.insights.len(),
        "computed portfolio report"
    );

    report
}
