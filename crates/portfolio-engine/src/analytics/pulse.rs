//! Market Pulse
//!
//! Top movers and liquidity leaders across the quote snapshot, and a 24h
//! coverage row for every held asset.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{MarketQuote, Position, QuoteBook};

const PULSE_LIST_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoverageEntry {
    pub id: String,
    pub symbol: String,
    pub change_24h: Decimal,
    pub price: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MarketPulse {
    pub gainers: Vec<MarketQuote>,
    pub decliners: Vec<MarketQuote>,
    pub volume_leaders: Vec<MarketQuote>,
    pub coverage: Vec<CoverageEntry>,
}

pub fn market_pulse(quotes: &[MarketQuote], positions: &[Position]) -> MarketPulse {
    let gainers = top_by(quotes, |q| q.price_change_24h, |a, b| b.cmp(a));
    let decliners = top_by(quotes, |q| q.price_change_24h, |a, b| a.cmp(b));
    let volume_leaders = top_by(quotes, |q| q.total_volume, |a, b| b.cmp(a));

    let book: QuoteBook = quotes.iter().collect();
    let coverage = positions
        .iter()
        .map(|p| {
            let quote = book.get(&p.id);
            CoverageEntry {
                id: p.id.clone(),
                symbol: p.symbol.to_uppercase(),
                change_24h: quote.map_or(Decimal::ZERO, MarketQuote::change_24h_or_zero),
                price: quote.map_or(Decimal::ZERO, |q| q.current_price),
            }
        })
        .collect();

    MarketPulse {
        gainers,
        decliners,
        volume_leaders,
        coverage,
    }
}

/// Quotes carrying `field`, sorted by it (stable), first three kept
fn top_by(
    quotes: &[MarketQuote],
    field: impl Fn(&MarketQuote) -> Option<Decimal>,
    order: impl Fn(&Decimal, &Decimal) -> Ordering,
) -> Vec<MarketQuote> {
    let mut ranked: Vec<(Decimal, &MarketQuote)> = quotes
        .iter()
        .filter_map(|q| field(q).map(|value| (value, q)))
        .collect();
    ranked.sort_by(|a, b| order(&a.0, &b.0));
    ranked
        .into_iter()
        .take(PULSE_LIST_LEN)
        .map(|(_, q)| q.clone())
        .collect()
}
