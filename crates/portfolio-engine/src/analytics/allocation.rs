//! Allocation Builder

use rust_decimal::Decimal;

use crate::model::{AllocationEntry, ValuedPosition};

/// One entry per position holding value; zero-value positions are omitted.
/// Percentages are left to the consumer (`AllocationEntry::share_of`).
pub fn build_allocation(positions: &[ValuedPosition]) -> Vec<AllocationEntry> {
    positions
        .iter()
        .filter(|p| p.current_value > Decimal::ZERO)
        .map(|p| AllocationEntry {
            symbol: p.position.symbol.to_uppercase(),
            label: p.position.name.clone(),
            value: p.current_value,
        })
        .collect()
}
