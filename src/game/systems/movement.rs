//! Player movement system.
//!
//! This module handles moving the player across the grid, one cell per step.

use crate::game::types::{CellIndex, Direction, LatLng};
use crate::game::state::GameState;

/// Move the player one cell in the given direction.
/// The player lands on the centre of the destination cell. Returns the new position.
pub fn move_player(game_state: &mut GameState, direction: Direction) -> LatLng {
    if direction == Direction::Stay {
        return game_state.player.pos;
    }
    let current = game_state.grid.cell_index_of(game_state.player.pos);
    let (di, dj) = direction.offset();
    let target = CellIndex::new(current.i.saturating_add(di), current.j.saturating_add(dj));

    let new_pos = game_state.grid.cell_center(target);
    game_state.player.pos = new_pos;
    new_pos
}
