//! Viewport projection.
//!
//! Turns the session into what an adapter draws: one view per visible cell
//! plus the player's status. Frames are rebuilt from scratch on every change.

use serde::Serialize;

use crate::game::grid::DisplaySymbol;
use crate::game::state::GameState;
use crate::game::systems::interaction::is_cell_reachable;
use crate::game::systems::rules::{check_score, is_actionable};
use crate::game::types::{CellBounds, CellIndex, LatLng, Token};

/// Everything an adapter needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub cell: CellIndex,
    pub region: CellBounds,
    pub value: Option<Token>,
    pub symbol: Option<DisplaySymbol>,
    pub reachable: bool,
    pub actionable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: LatLng,
    pub cell: CellIndex,
    pub held_token: Option<Token>,
    pub score: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub cells: Vec<CellView>,
    pub player: PlayerView,
}

pub fn cell_view(game_state: &GameState, cell: CellIndex) -> CellView {
    let value = game_state.field.value_at(cell);
    CellView {
        cell,
        region: game_state.grid.cell_bounds(cell),
        value,
        symbol: game_state.field.display_at(cell),
        reachable: is_cell_reachable(game_state, cell),
        actionable: is_actionable(game_state, cell),
    }
}

pub fn player_view(game_state: &GameState) -> PlayerView {
    PlayerView {
        position: game_state.player.pos,
        cell: game_state.player_cell(),
        held_token: game_state.player.held_token,
        score: check_score(game_state),
    }
}

/// Views of every cell intersecting `viewport`, plus the player status.
pub fn build_frame(game_state: &GameState, viewport: &CellBounds) -> Frame {
    let cells = game_state
        .grid
        .cells_in(viewport)
        .map(|cell| cell_view(game_state, cell))
        .collect();
    Frame {
        cells,
        player: player_view(game_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::GameConfig;

    #[test]
    fn frame_covers_viewport_and_flags_reach() {
        let state = GameState::new(GameConfig::default());
        let around = state.viewport_around_player(5);
        let frame = build_frame(&state, &around);

        assert_eq!(frame.cells.len(), 11 * 11);
        assert!(frame.cells.iter().any(|c| c.reachable));
        assert!(frame.cells.iter().any(|c| !c.reachable));
        for view in &frame.cells {
            assert_eq!(view.symbol.is_some(), view.value.is_some());
            assert!(!view.actionable || (view.reachable && view.value.is_some()));
        }
        assert_eq!(frame.player.score, 0);
        assert_eq!(frame.player.held_token, None);
    }

    #[test]
    fn actionable_while_holding_means_equal_value() {
        let mut state = GameState::new(GameConfig::default());
        let cell = CellIndex::new(0, 0);
        state.field.overlay_mut().set_merged(cell, 8);
        state.player.held_token = Some(8);
        assert!(cell_view(&state, cell).actionable);

        state.player.held_token = Some(4);
        let view = cell_view(&state, cell);
        assert!(view.reachable);
        assert!(!view.actionable);
    }
}
