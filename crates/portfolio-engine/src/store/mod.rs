//! Holding Persistence
//!
//! Storage for the user's position list. The report pipeline never touches
//! a store; callers load, mutate a `HoldingBook`, and save.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryHoldingStore;

use crate::error::Result;
use crate::model::Position;

/// Durable slot for the position list
pub trait HoldingStore: Send + Sync {
    /// Load the stored positions (empty when nothing was saved yet)
    fn load(&self) -> Result<Vec<Position>>;

    /// Replace the stored positions
    fn save(&self, positions: &[Position]) -> Result<()>;
}
