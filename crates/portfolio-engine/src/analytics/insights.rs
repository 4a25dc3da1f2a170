//! Insight Generator
//!
//! Ordered, independent rules over a finished report. Any rule may fire; a
//! rule whose input is absent is skipped. Evaluation order is display order.

use rust_decimal::Decimal;

use super::policy::InsightPolicy;
use crate::model::{percent_of, Insight, InsightTone, PortfolioReport, RiskCategory};

type Rule = fn(&PortfolioReport, &InsightPolicy) -> Option<Insight>;

const RULES: &[Rule] = &[
    onboarding,
    overall_gain,
    overall_drawdown,
    elevated_volatility,
    concentration,
    momentum_leader,
    laggard,
    pricing_gap,
];

pub fn generate_insights(report: &PortfolioReport, policy: &InsightPolicy) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(report, policy)).collect()
}

fn onboarding(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    (report.holding_count == 0).then(|| {
        Insight::new(
            "Start your portfolio",
            "Add a position with its quantity and cost basis to unlock performance, risk and allocation analytics.",
            InsightTone::Neutral,
        )
    })
}

fn overall_gain(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    (report.total_profit_pct > Decimal::ZERO).then(|| {
        Insight::new(
            "Portfolio in profit",
            format!(
                "Holdings are up {:.2}% overall, an unrealised gain of ${:.2} on a ${:.2} cost basis.",
                report.total_profit_pct, report.total_profit, report.total_cost
            ),
            InsightTone::Positive,
        )
    })
}

fn overall_drawdown(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    (report.total_profit_pct < Decimal::ZERO).then(|| {
        Insight::new(
            "Drawdown detected",
            format!(
                "Holdings are down {:.2}% overall, ${:.2} below cost. Review each position against its thesis.",
                report.total_profit_pct.abs(),
                report.total_profit.abs()
            ),
            InsightTone::Warning,
        )
    })
}

fn elevated_volatility(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    (report.risk_category == RiskCategory::Aggressive).then(|| {
        Insight::new(
            "Elevated volatility",
            format!(
                "Value-weighted 24h volatility is {:.1}%, placing the portfolio in the Aggressive bucket.",
                report.volatility_score
            ),
            InsightTone::Warning,
        )
    })
}

fn concentration(report: &PortfolioReport, policy: &InsightPolicy) -> Option<Insight> {
    let exposure = report.highest_exposure.as_ref()?;
    let share = percent_of(exposure.value, report.total_value);

    (share > policy.concentration_threshold).then(|| {
        Insight::new(
            "Concentration risk",
            format!(
                "{} makes up {:.1}% of portfolio value, above the {}% guideline. Consider spreading exposure.",
                exposure.symbol, share, policy.concentration_threshold
            ),
            InsightTone::Warning,
        )
    })
}

fn momentum_leader(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    let best = report.best_performer.as_ref()?;

    (best.roi > Decimal::ZERO).then(|| {
        Insight::new(
            "Momentum leader",
            format!("{} ({}) leads the portfolio at +{:.2}% ROI.", best.label, best.symbol, best.roi),
            InsightTone::Positive,
        )
    })
}

fn laggard(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    let worst = report.worst_performer.as_ref()?;

    (worst.roi < Decimal::ZERO).then(|| {
        Insight::new(
            "Laggard watch",
            format!("{} ({}) trails at {:.2}% ROI.", worst.label, worst.symbol, worst.roi),
            InsightTone::Warning,
        )
    })
}

fn pricing_gap(report: &PortfolioReport, _: &InsightPolicy) -> Option<Insight> {
    let unpriced: Vec<String> = report
        .positions
        .iter()
        .filter(|p| !p.has_quote)
        .map(|p| p.position.symbol.to_uppercase())
        .collect();

    (!unpriced.is_empty()).then(|| {
        Insight::new(
            "Pricing gap",
            format!(
                "No live quote for {}; valued at zero until market data returns.",
                unpriced.join(", ")
            ),
            InsightTone::Neutral,
        )
    })
}
