//! Valuation Engine
//!
//! Joins each position with its market quote. A position without a quote is
//! kept and valued at zero. Products saturate at the `Decimal` bounds.

use rust_decimal::Decimal;

use crate::model::{percent_of, MarketQuote, Position, QuoteBook, ValuedPosition};

/// Value one position against an optional quote
pub fn value_position(position: &Position, quote: Option<&MarketQuote>) -> ValuedPosition {
    let current_price = quote.map_or(Decimal::ZERO, |q| q.current_price);
    let change_24h_percent = quote.map_or(Decimal::ZERO, MarketQuote::change_24h_or_zero);

    let cost_basis = position.cost_basis();
    let current_value = position.quantity.saturating_mul(current_price);
    let profit = current_value - cost_basis;

    ValuedPosition {
        position: position.clone(),
        has_quote: quote.is_some(),
        current_price,
        cost_basis,
        current_value,
        profit,
        roi_percent: percent_of(profit, cost_basis),
        change_24h_percent,
        daily_change_value: current_value.saturating_mul(change_24h_percent) / Decimal::ONE_HUNDRED,
    }
}

/// Value every position against the quote lookup, preserving order
pub fn value_positions(positions: &[Position], quotes: &QuoteBook) -> Vec<ValuedPosition> {
    positions
        .iter()
        .map(|position| {
            let quote = quotes.get(&position.id);
            if quote.is_none() {
                tracing::debug!(id = %position.id, "no market quote; valuing at zero");
            }
            value_position(position, quote)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_value_with_quote() {
        let pos = Position::new("bitcoin", "btc", "Bitcoin", dec!(0.5), dec!(40000)).unwrap();
        let quote = MarketQuote::new("bitcoin", "btc", "Bitcoin", dec!(50000)).with_change_24h(dec!(-2));

        let valued = value_position(&pos, Some(&quote));
        assert!(valued.has_quote);
        assert_eq!(valued.cost_basis, dec!(20000));
        assert_eq!(valued.current_value, dec!(25000));
        assert_eq!(valued.profit, dec!(5000));
        assert_eq!(valued.roi_percent, dec!(25));
        assert_eq!(valued.daily_change_value, dec!(-500));
    }

    #[test]
    fn test_missing_quote_values_at_zero() {
        let pos = Position::new("bitcoin", "btc", "Bitcoin", dec!(1), dec!(20000)).unwrap();
        let valued = value_positions(&[pos], &QuoteBook::new());

        assert_eq!(valued.len(), 1);
        let btc = &valued[0];
        assert!(!btc.has_quote);
        assert_eq!(btc.current_price, Decimal::ZERO);
        assert_eq!(btc.current_value, Decimal::ZERO);
        assert_eq!(btc.daily_change_value, Decimal::ZERO);
        assert_eq!(btc.profit, dec!(-20000));
        assert_eq!(btc.roi_percent, dec!(-100));
    }

    #[test]
    fn test_unbounded_row_saturates() {
        let mut pos = Position::new("bitcoin", "btc", "Bitcoin", dec!(1), dec!(1)).unwrap();
        pos.quantity = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        pos.purchase_price = dec!(1_000_000_000);
        let quote = MarketQuote::new("bitcoin", "btc", "Bitcoin", dec!(1_000_000_000)).with_change_24h(dec!(10));

        let valued = value_position(&pos, Some(&quote));
        assert_eq!(valued.cost_basis, Decimal::MAX);
        assert_eq!(valued.current_value, Decimal::MAX);
        assert_eq!(valued.profit, Decimal::ZERO);
        assert_eq!(valued.daily_change_value, Decimal::MAX / Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_missing_24h_change_is_flat() {
        let pos = Position::new("ethereum", "eth", "Ethereum", dec!(2), dec!(3000)).unwrap();
        let quote = MarketQuote::new("ethereum", "eth", "Ethereum", dec!(3500));

        let valued = value_position(&pos, Some(&quote));
        assert_eq!(valued.change_24h_percent, Decimal::ZERO);
        assert_eq!(valued.daily_change_value, Decimal::ZERO);
    }
}
