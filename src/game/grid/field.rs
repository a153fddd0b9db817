//! Token field.
//!
//! Composes the procedural generator with the overlay store into the single
//! "what is in cell (i, j) right now" query used by the rules and renderers.

use serde::Serialize;

use crate::config::game::PALETTE;
use crate::game::grid::{CellOverlay, OverlayStore, TokenGenerator};
use crate::game::types::{CellIndex, Token};

/// Where the effective value of a cell comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenSource {
    Base,
    Merged,
}

/// Visual class of a token value, for adapters to style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplaySymbol {
    pub name: &'static str,
    pub glyph: char,
}

/// Palette entry for `value`: `round(log2(value))` wrapped over the palette.
pub fn display_of(value: Token) -> DisplaySymbol {
    let tier = (value.max(1) as f64).log2().round() as usize;
    let (name, glyph) = PALETTE[tier % PALETTE.len()];
    DisplaySymbol { name, glyph }
}

#[derive(Debug, Clone)]
pub struct TokenField {
    generator: TokenGenerator,
    overlay: OverlayStore,
}

impl TokenField {
    pub fn new(generator: TokenGenerator) -> Self {
        Self {
            generator,
            overlay: OverlayStore::new(),
        }
    }

    pub fn generator(&self) -> &TokenGenerator {
        &self.generator
    }

    pub fn overlay(&self) -> &OverlayStore {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayStore {
        &mut self.overlay
    }

    /// Effective value together with its origin. Merged beats removed beats base.
    pub fn source_at(&self, cell: CellIndex) -> Option<(Token, TokenSource)> {
        match self.overlay.get(cell) {
            Some(CellOverlay::Merged(value)) => Some((value, TokenSource::Merged)),
            Some(CellOverlay::Removed) => None,
            None => self.generator.base_value(cell).map(|v| (v, TokenSource::Base)),
        }
    }

    pub fn value_at(&self, cell: CellIndex) -> Option<Token> {
        self.source_at(cell).map(|(value, _)| value)
    }

    pub fn display_at(&self, cell: CellIndex) -> Option<DisplaySymbol> {
        self.value_at(cell).map(display_of)
    }
}
