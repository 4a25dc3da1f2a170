//! Performance Ranker
//!
//! Picks the best and worst ROI performers and the largest single exposure.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{PerformanceEntry, ValuedPosition};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rankings {
    pub best_performer: Option<PerformanceEntry>,
    pub worst_performer: Option<PerformanceEntry>,
    pub highest_exposure: Option<PerformanceEntry>,
}

/// Rank valued positions. Every field is `None` for an empty portfolio.
///
/// ROI ties go to the larger current value; remaining ties (and exposure
/// ties) go to the lexicographically smaller identifier.
pub fn rank_performance(positions: &[ValuedPosition]) -> Rankings {
    let eligible = || positions.iter().filter(|p| p.cost_basis > Decimal::ZERO);

    let best = eligible().max_by(|a, b| {
        a.roi_percent
            .cmp(&b.roi_percent)
            .then_with(|| a.current_value.cmp(&b.current_value))
            .then_with(|| by_identifier(a, b))
    });

    let worst = eligible().max_by(|a, b| {
        b.roi_percent
            .cmp(&a.roi_percent)
            .then_with(|| a.current_value.cmp(&b.current_value))
            .then_with(|| by_identifier(a, b))
    });

    let exposure = positions.iter().max_by(|a, b| {
        a.current_value
            .cmp(&b.current_value)
            .then_with(|| by_identifier(a, b))
    });

    Rankings {
        best_performer: best.map(PerformanceEntry::from),
        worst_performer: worst.map(PerformanceEntry::from),
        highest_exposure: exposure.map(PerformanceEntry::from),
    }
}

// Smaller identifier ranks higher
fn by_identifier(a: &ValuedPosition, b: &ValuedPosition) -> Ordering {
    b.id().cmp(a.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::value_position;
    use crate::model::{MarketQuote, Position};
    use rust_decimal_macros::dec;

    fn valued(id: &str, quantity: Decimal, cost: Decimal, price: Decimal) -> ValuedPosition {
        let pos = Position::new(id, id, id.to_uppercase(), quantity, cost).unwrap();
        let quote = MarketQuote::new(id, id, id.to_uppercase(), price);
        value_position(&pos, Some(&quote))
    }

    #[test]
    fn test_empty_portfolio_has_no_rankings() {
        let rankings = rank_performance(&[]);
        assert_eq!(rankings, Rankings::default());
        assert!(rankings.best_performer.is_none());
        assert!(rankings.highest_exposure.is_none());
    }

    #[test]
    fn test_best_worst_and_exposure() {
        let positions = vec![
            valued("btc", dec!(1), dec!(20000), dec!(30000)), // +50%, 30000
            valued("eth", dec!(10), dec!(3000), dec!(2400)),  // -20%, 24000
            valued("sol", dec!(100), dec!(100), dec!(110)),   // +10%, 11000
        ];

        let rankings = rank_performance(&positions);
        let best = rankings.best_performer.unwrap();
        assert_eq!(best.symbol, "BTC");
        assert_eq!(best.roi, dec!(50));

        let worst = rankings.worst_performer.unwrap();
        assert_eq!(worst.symbol, "ETH");
        assert_eq!(worst.roi, dec!(-20));

        assert_eq!(rankings.highest_exposure.unwrap().value, dec!(30000));
    }

    #[test]
    fn test_roi_tie_prefers_larger_value() {
        let positions = vec![
            valued("aaa", dec!(1), dec!(100), dec!(110)),  // +10%, 110
            valued("bbb", dec!(10), dec!(100), dec!(110)), // +10%, 1100
        ];

        let rankings = rank_performance(&positions);
        assert_eq!(rankings.best_performer.unwrap().symbol, "BBB");
        assert_eq!(rankings.worst_performer.unwrap().symbol, "BBB");
    }

    #[test]
    fn test_exposure_tie_prefers_smaller_identifier() {
        let positions = vec![
            valued("zec", dec!(1), dec!(100), dec!(500)),
            valued("ada", dec!(1), dec!(100), dec!(500)),
        ];

        let rankings = rank_performance(&positions);
        assert_eq!(rankings.highest_exposure.unwrap().symbol, "ADA");
    }

    #[test]
    fn test_zero_value_holding_still_ranked() {
        let pos = Position::new("gone", "gone", "Delisted", dec!(5), dec!(2)).unwrap();
        let positions = vec![value_position(&pos, None)];

        let rankings = rank_performance(&positions);
        let exposure = rankings.highest_exposure.unwrap();
        assert_eq!(exposure.value, Decimal::ZERO);
        assert_eq!(rankings.worst_performer.unwrap().roi, dec!(-100));
    }
}
