//! Risk Classifier
//!
//! Volatility score is the value-weighted mean absolute 24h change:
//!
//! ```text
//! score = Σ |Δ24h_i| · value_i / Σ value_i     (positions with value > 0)
//! ```

use rust_decimal::Decimal;

use super::policy::RiskPolicy;
use crate::model::{RiskCategory, ValuedPosition};

/// Value-weighted mean of |24h change|; zero when nothing holds value
pub fn volatility_score(positions: &[ValuedPosition]) -> Decimal {
    let (weighted, total) = positions
        .iter()
        .filter(|p| p.current_value > Decimal::ZERO)
        .fold((Decimal::ZERO, Decimal::ZERO), |(weighted, total), p| {
            (
                weighted.saturating_add(p.change_24h_percent.abs().saturating_mul(p.current_value)),
                total.saturating_add(p.current_value),
            )
        });

    if total.is_zero() {
        Decimal::ZERO
    } else {
        weighted / total
    }
}

pub fn classify_risk(positions: &[ValuedPosition], policy: &RiskPolicy) -> (Decimal, RiskCategory) {
    let score = volatility_score(positions);
    (score, policy.categorize(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::value_position;
    use crate::model::{MarketQuote, Position};
    use rust_decimal_macros::dec;

    fn valued(id: &str, value: Decimal, change: Decimal) -> ValuedPosition {
        let pos = Position::new(id, id, id, dec!(1), dec!(1)).unwrap();
        let quote = MarketQuote::new(id, id, id, value).with_change_24h(change);
        value_position(&pos, Some(&quote))
    }

    #[test]
    fn test_single_position_score() {
        let (score, category) = classify_risk(&[valued("btc", dec!(1200), dec!(10))], &RiskPolicy::default());
        assert_eq!(score, dec!(10));
        assert_eq!(category, RiskCategory::Aggressive);
    }

    #[test]
    fn test_weighted_by_value_and_absolute() {
        let positions = vec![
            valued("btc", dec!(3000), dec!(-2)),
            valued("doge", dec!(1000), dec!(10)),
        ];
        // (2*3000 + 10*1000) / 4000
        assert_eq!(volatility_score(&positions), dec!(4));
        let (_, category) = classify_risk(&positions, &RiskPolicy::default());
        assert_eq!(category, RiskCategory::Balanced);
    }

    #[test]
    fn test_zero_value_positions_ignored() {
        let unquoted = value_position(&Position::new("x", "x", "x", dec!(1), dec!(1)).unwrap(), None);
        let positions = vec![unquoted, valued("btc", dec!(500), dec!(1.5))];
        assert_eq!(volatility_score(&positions), dec!(1.5));
    }

    #[test]
    fn test_empty_is_conservative() {
        let (score, category) = classify_risk(&[], &RiskPolicy::default());
        assert_eq!(score, Decimal::ZERO);
        assert_eq!(category, RiskCategory::Conservative);
    }
}
