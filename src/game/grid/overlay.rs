//! Cell overlay store.
//!
//! Sparse record of every change the player made to the procedural field.
//! A cell holds at most one entry; entries are overwritten, never pruned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::types::{CellIndex, Token};

/// Player-caused deviation of a single cell from its base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOverlay {
    /// A crafted token now sits in the cell.
    Merged(Token),
    /// The cell's token was picked up and nothing was crafted there since.
    Removed,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStore {
    entries: HashMap<CellIndex, CellOverlay>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: CellIndex) -> Option<CellOverlay> {
        self.entries.get(&cell).copied()
    }

    /// Place a merged token, replacing any removed marker.
    pub fn set_merged(&mut self, cell: CellIndex, value: Token) {
        self.entries.insert(cell, CellOverlay::Merged(value));
    }

    pub fn mark_removed(&mut self, cell: CellIndex) {
        self.entries.insert(cell, CellOverlay::Removed);
    }

    /// Drop a removed marker so the cell defers to its base value again.
    /// Merged entries are left untouched.
    pub fn clear_removed(&mut self, cell: CellIndex) {
        if self.entries.get(&cell) == Some(&CellOverlay::Removed) {
            self.entries.remove(&cell);
        }
    }

    pub fn merged_values(&self) -> impl Iterator<Item = Token> + '_ {
        self.entries.values().filter_map(|entry| match entry {
            CellOverlay::Merged(value) => Some(*value),
            CellOverlay::Removed => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
