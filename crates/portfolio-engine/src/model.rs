//! Domain Models
//!
//! Core data types for the portfolio metrics pipeline.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{EngineError, Result};

/// Decimal places kept for quantities
pub const QUANTITY_SCALE: u32 = 8;

/// Decimal places kept for per-unit cost basis
pub const PRICE_SCALE: u32 = 4;

pub(crate) fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Largest cost basis (quantity * unit cost, USD) admitted for one position
pub const MAX_COST_BASIS: Decimal = dec!(1_000_000_000_000_000);

/// `numerator / denominator * 100`, or zero when the denominator is zero.
/// Saturates at the `Decimal` bounds instead of overflowing.
pub(crate) fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    numerator.checked_div(denominator).map_or_else(
        || saturated(numerator.is_sign_negative() != denominator.is_sign_negative()),
        |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED),
    )
}

const fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// A user-recorded holding of one asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Market identifier (e.g., "bitcoin"); joins against `MarketQuote::id`
    pub id: String,

    /// Ticker symbol as supplied by the market feed (e.g., "btc")
    pub symbol: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Units held
    pub quantity: Decimal,

    /// Average cost basis per unit in USD
    pub purchase_price: Decimal,

    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// When the position was recorded or last merged
    pub added_at: DateTime<Utc>,
}

impl Position {
    /// Admit a new position. Quantity and price must be strictly positive.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
    ) -> Result<Self> {
        let position = Self {
            id: id.into().trim().to_string(),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            quantity: round_quantity(quantity),
            purchase_price: round_price(purchase_price),
            note: None,
            added_at: Utc::now(),
        };
        position.validate()?;
        Ok(position)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(note.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub const fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Check the admission invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(EngineError::InvalidPosition("identifier must not be empty".into()));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(EngineError::InvalidPosition(format!(
                "quantity for {} must be positive, got {}",
                self.id, self.quantity
            )));
        }
        if self.purchase_price <= Decimal::ZERO {
            return Err(EngineError::InvalidPosition(format!(
                "purchase price for {} must be positive, got {}",
                self.id, self.purchase_price
            )));
        }
        match self.quantity.checked_mul(self.purchase_price) {
            Some(cost) if cost <= MAX_COST_BASIS => Ok(()),
            _ => Err(EngineError::InvalidPosition(format!(
                "cost basis for {} exceeds the {} limit",
                self.id, MAX_COST_BASIS
            ))),
        }
    }

    /// Round quantity and unit cost to the stored precision
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.quantity = round_quantity(self.quantity);
        self.purchase_price = round_price(self.purchase_price);
        self
    }

    /// Total cost of position (saturating for rows that skipped validation)
    pub fn cost_basis(&self) -> Decimal {
        self.quantity.saturating_mul(self.purchase_price)
    }
}

pub(crate) fn normalize_note(note: String) -> Option<String> {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A point-in-time market snapshot for one asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market identifier (e.g., "bitcoin")
    pub id: String,

    /// Ticker symbol (e.g., "btc")
    pub symbol: String,

    /// Full name (e.g., "Bitcoin")
    pub name: String,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Current price in USD
    pub current_price: Decimal,

    /// 24-hour price change percentage
    #[serde(default)]
    pub price_change_24h: Option<Decimal>,

    /// 24-hour traded volume in USD
    #[serde(default)]
    pub total_volume: Option<Decimal>,

    /// 1-hour price change percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_1h: Option<Decimal>,

    /// 7-day price change percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_7d: Option<Decimal>,
}

impl MarketQuote {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        current_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price,
            price_change_24h: None,
            total_volume: None,
            price_change_1h: None,
            price_change_7d: None,
        }
    }

    pub const fn with_change_24h(mut self, change: Decimal) -> Self {
        self.price_change_24h = Some(change);
        self
    }

    pub const fn with_volume(mut self, volume: Decimal) -> Self {
        self.total_volume = Some(volume);
        self
    }

    /// 24h change, treating a missing figure as flat
    pub fn change_24h_or_zero(&self) -> Decimal {
        self.price_change_24h.unwrap_or(Decimal::ZERO)
    }
}

/// Quote lookup keyed by market identifier
#[derive(Clone, Debug, Default)]
pub struct QuoteBook {
    quotes: HashMap<String, MarketQuote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&MarketQuote> {
        self.quotes.get(id)
    }

    pub fn insert(&mut self, quote: MarketQuote) {
        self.quotes.insert(quote.id.clone(), quote);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<MarketQuote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = MarketQuote>>(iter: I) -> Self {
        let mut book = Self::new();
        for quote in iter {
            book.insert(quote);
        }
        book
    }
}

impl<'a> FromIterator<&'a MarketQuote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = &'a MarketQuote>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}

/// A position joined with its market quote
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValuedPosition {
    #[serde(flatten)]
    pub position: Position,

    /// Whether a quote was found for this position
    pub has_quote: bool,

    /// Current unit price (zero without a quote)
    pub current_price: Decimal,

    /// quantity * purchase price
    pub cost_basis: Decimal,

    /// quantity * current price
    pub current_value: Decimal,

    /// current value - cost basis
    pub profit: Decimal,

    /// profit / cost basis * 100
    pub roi_percent: Decimal,

    /// 24h change percentage from the quote
    pub change_24h_percent: Decimal,

    /// current value * 24h change / 100
    pub daily_change_value: Decimal,
}

impl ValuedPosition {
    pub fn id(&self) -> &str {
        &self.position.id
    }
}

/// One ranked position (best, worst or largest exposure)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PerformanceEntry {
    pub label: String,
    pub symbol: String,
    pub roi: Decimal,
    pub value: Decimal,
    pub cost: Decimal,
}

impl From<&ValuedPosition> for PerformanceEntry {
    fn from(valued: &ValuedPosition) -> Self {
        Self {
            label: valued.position.name.clone(),
            symbol: valued.position.symbol.to_uppercase(),
            roi: valued.roi_percent,
            value: valued.current_value,
            cost: valued.cost_basis,
        }
    }
}

/// One slice of the allocation chart
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocationEntry {
    pub symbol: String,
    pub label: String,
    pub value: Decimal,
}

impl AllocationEntry {
    /// Percentage of `total_value` held in this entry
    pub fn share_of(&self, total_value: Decimal) -> Decimal {
        percent_of(self.value, total_value)
    }
}

/// Discrete risk label derived from the volatility score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of an insight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Positive,
    Neutral,
    Warning,
}

/// A short rule-derived advisory statement
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
    pub tone: InsightTone,
}

impl Insight {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, tone: InsightTone) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            tone,
        }
    }
}

/// The consolidated report consumed by every display surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioReport {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub total_profit_pct: Decimal,
    pub daily_change_value: Decimal,
    pub daily_change_pct: Decimal,
    pub volatility_score: Decimal,
    pub risk_category: RiskCategory,
    pub best_performer: Option<PerformanceEntry>,
    pub worst_performer: Option<PerformanceEntry>,
    pub highest_exposure: Option<PerformanceEntry>,
    pub allocation: Vec<AllocationEntry>,
    pub insights: Vec<Insight>,
    pub holding_count: usize,
    pub positions: Vec<ValuedPosition>,
}
