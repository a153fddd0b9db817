//! Interaction evaluator.
//!
//! Decides whether a cell is within the player's reach. Distances are turned
//! into metres with a flat degrees-to-metres factor, which only holds at the
//! fixed latitude and zoom the game is played at.

use crate::config::game::METERS_PER_DEGREE;
use crate::game::grid::Grid;
use crate::game::state::GameState;
use crate::game::types::{CellIndex, LatLng};

/// Approximate ground distance between two positions, in metres.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng) * METERS_PER_DEGREE
}

/// True iff the centre of `cell` lies within `radius_degrees` of `player_pos`.
pub fn is_reachable(grid: &Grid, player_pos: LatLng, radius_degrees: f64, cell: CellIndex) -> bool {
    distance_meters(player_pos, grid.cell_center(cell)) <= radius_degrees * METERS_PER_DEGREE
}

/// Reachability of `cell` for the session's player.
pub fn is_cell_reachable(game_state: &GameState, cell: CellIndex) -> bool {
    let player = &game_state.player;
    is_reachable(&game_state.grid, player.pos, player.radius, cell)
}
