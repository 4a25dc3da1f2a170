//! In-memory holding store (for development and tests)

use std::sync::RwLock;

use super::HoldingStore;
use crate::error::{EngineError, Result};
use crate::model::Position;

#[derive(Debug, Default)]
pub struct MemoryHoldingStore {
    positions: RwLock<Vec<Position>>,
}

impl MemoryHoldingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing positions
    pub const fn with_positions(positions: Vec<Position>) -> Self {
        Self {
            positions: RwLock::new(positions),
        }
    }
}

impl HoldingStore for MemoryHoldingStore {
    fn load(&self) -> Result<Vec<Position>> {
        let positions = self
            .positions
            .read()
            .map_err(|_| EngineError::Storage("holding store lock poisoned".into()))?;
        Ok(positions.clone())
    }

    fn save(&self, positions: &[Position]) -> Result<()> {
        let mut stored = self
            .positions
            .write()
            .map_err(|_| EngineError::Storage("holding store lock poisoned".into()))?;
        *stored = positions.to_vec();
        Ok(())
    }
}
