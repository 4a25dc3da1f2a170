//! Holding Consolidator
//!
//! Merges repeated entries for the same asset into one position with a
//! quantity-weighted average cost, and implements the add / amend / remove
//! actions on the caller-owned holding list.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{normalize_note, round_price, round_quantity, Position};

/// Merge `incoming` into `existing` (same identifier).
///
/// Quantities add; the unit cost becomes the quantity-weighted mean of both
/// costs. A non-empty incoming note replaces the old one and the incoming
/// timestamp wins. Sums saturate at the `Decimal` bounds.
pub fn merge(existing: &Position, incoming: &Position) -> Position {
    let total_quantity = existing.quantity.saturating_add(incoming.quantity);
    let averaged_price = if total_quantity > Decimal::ZERO {
        existing.cost_basis().saturating_add(incoming.cost_basis()) / total_quantity
    } else {
        Decimal::ZERO
    };

    Position {
        quantity: round_quantity(total_quantity),
        purchase_price: round_price(averaged_price),
        note: incoming
            .note
            .clone()
            .and_then(normalize_note)
            .or_else(|| existing.note.clone()),
        added_at: incoming.added_at,
        ..existing.clone()
    }
}

/// Collapse a position list to at most one entry per identifier.
///
/// Output order follows the first occurrence of each identifier.
pub fn consolidate(positions: &[Position]) -> Vec<Position> {
    let mut merged: Vec<Position> = Vec::with_capacity(positions.len());
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(positions.len());

    for position in positions {
        if let Some(&slot) = slots.get(position.id.as_str()) {
            tracing::debug!(id = %position.id, "merging duplicate holding");
            let combined = merge(&merged[slot], position);
            merged[slot] = combined;
        } else {
            slots.insert(position.id.as_str(), merged.len());
            merged.push(position.clone());
        }
    }

    merged
}

/// Direct edit of an existing position (no merging)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PositionAmendment {
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

/// The user's holding list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingBook {
    positions: Vec<Position>,
}

impl HoldingBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted positions: rounds to the stored precision, drops
    /// entries that fail validation and merges duplicates.
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let admitted: Vec<Position> = positions
            .into_iter()
            .map(Position::normalized)
            .filter(|p| match p.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping stored holding: {}", e);
                    false
                }
            })
            .collect();

        Self {
            positions: consolidate(&admitted),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    pub fn get(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Add a position, merging into an existing entry with the same identifier.
    /// The merged entry must also pass validation.
    pub fn add(&mut self, position: Position) -> Result<()> {
        position.validate()?;

        if let Some(existing) = self.positions.iter_mut().find(|p| p.id == position.id) {
            let merged = merge(existing, &position);
            merged.validate()?;
            *existing = merged;
        } else {
            self.positions.push(position);
        }
        Ok(())
    }

    /// Replace quantity / price / note of an existing position
    pub fn amend(&mut self, id: &str, amendment: PositionAmendment) -> Result<&Position> {
        let position = self
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PositionNotFound(id.to_string()))?;

        let mut updated = position.clone();
        if let Some(quantity) = amendment.quantity {
            updated.quantity = round_quantity(quantity);
        }
        if let Some(price) = amendment.purchase_price {
            updated.purchase_price = round_price(price);
        }
        if let Some(note) = amendment.note {
            updated.note = normalize_note(note);
        }
        updated.validate()?;

        *position = updated;
        Ok(&*position)
    }

    /// Remove a position; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.positions.len();
        self.positions.retain(|p| p.id != id);
        self.positions.len() != before
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}
