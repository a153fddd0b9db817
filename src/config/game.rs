//! Game configuration constants.
//!
//! This module defines the main gameplay parameters such as the grid geometry,
//! the token spawn bands, the interaction radius and the win threshold.

use crate::game::types::{LatLng, Token};

/// Side length of one grid cell, in degrees (both axes).
pub const TILE_DEGREES: f64 = 1e-4;

/// World position of the south-west corner of cell (0, 0).
pub const ORIGIN: LatLng = LatLng {
    lat: 36.997936938057016,
    lng: -122.05703507501151,
};

/// Interaction radius, in cells. Converted to degrees with `TILE_DEGREES`.
pub const INTERACTION_RADIUS_CELLS: f64 = 3.0;

/// Linear approximation used to turn degrees into metres at play latitude.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Default world seed when the client does not pick one.
pub const DEFAULT_SEED: u64 = 0x6d65_7267_6567_7264;

/// Token value at which the session is won.
pub const WIN_THRESHOLD: Token = 2048;

/// Spawn bands: a roll below `upper` (and above the previous band) yields `value`.
/// Rolls past the last band leave the cell empty.
pub const SPAWN_BANDS: [(f64, Token); 3] = [(0.02, 4), (0.06, 2), (0.12, 1)];

/// Display classes, indexed by `round(log2(value))` and wrapped.
pub const PALETTE: [(&str, char); 8] = [
    ("copper", 'c'),
    ("bronze", 'b'),
    ("silver", 's'),
    ("gold", 'g'),
    ("platinum", 'p'),
    ("ruby", 'r'),
    ("sapphire", 'S'),
    ("emerald", 'E'),
];

/// Per-session game parameters.
///
/// `Default` is built from the constants above; callers override single
/// fields (usually the seed) with struct update syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub seed: u64,
    pub origin: LatLng,
    pub tile_degrees: f64,
    pub interaction_radius_cells: f64,
    pub win_threshold: Token,
}

impl GameConfig {
    /// Interaction radius expressed in degrees, the unit positions use.
    pub fn interaction_radius_degrees(&self) -> f64 {
        self.interaction_radius_cells * self.tile_degrees
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            origin: ORIGIN,
            tile_degrees: TILE_DEGREES,
            interaction_radius_cells: INTERACTION_RADIUS_CELLS,
            win_threshold: WIN_THRESHOLD,
        }
    }
}
