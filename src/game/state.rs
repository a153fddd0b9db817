use log::debug;

use crate::config::game::GameConfig;
use crate::game::grid::{Grid, TokenField, TokenGenerator};
use crate::game::systems::{
    build_frame, check_score, check_win_condition, handle_cell_click, move_player, ClickOutcome, Frame,
};
use crate::game::types::{CellBounds, CellIndex, Player, PlayerAction, Token, WinEvent};

/// What a single player action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Something visible changed and the adapter should redraw.
    pub changed: bool,
    /// Set exactly once per session, on the action that first reaches the win threshold.
    pub win: Option<WinEvent>,
}

/// One game session: the token field, the player and the win flag.
///
/// Owned by whoever drives the session (the session actor or the terminal
/// loop) and passed explicitly to the systems.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    pub field: TokenField,
    pub player: Player,
    pub win_notified: bool,
}

impl GameState {
    // Player starts on the grid origin with empty hands.
    pub fn new(config: GameConfig) -> Self {
        GameState {
            config,
            grid: Grid::new(config.origin, config.tile_degrees),
            field: TokenField::new(TokenGenerator::new(config.seed)),
            player: Player::new(config.origin, config.interaction_radius_degrees()),
            win_notified: false,
        }
    }

    pub fn player_cell(&self) -> CellIndex {
        self.grid.cell_index_of(self.player.pos)
    }

    pub fn score(&self) -> Token {
        check_score(self)
    }

    pub fn apply_player_action(&mut self, action: PlayerAction) -> ActionOutcome {
        let changed = match action {
            PlayerAction::Move(direction) => {
                let before = self.player.pos;
                move_player(self, direction) != before
            }
            PlayerAction::ClickCell(cell) => {
                let outcome = handle_cell_click(self, cell);
                debug!("[GameState] Click on ({}, {}) -> {:?}", cell.i, cell.j, outcome);
                outcome != ClickOutcome::Ignored
            }
        };

        let win = if changed { check_win_condition(self) } else { None };
        ActionOutcome { changed, win }
    }

    pub fn frame(&self, viewport: &CellBounds) -> Frame {
        build_frame(self, viewport)
    }

    /// Square viewport spanning `cells` cells on each side of the player.
    pub fn viewport_around_player(&self, cells: i32) -> CellBounds {
        let here = self.player_cell();
        let south_west = self
            .grid
            .cell_center(CellIndex::new(here.i.saturating_sub(cells), here.j.saturating_sub(cells)));
        let north_east = self
            .grid
            .cell_center(CellIndex::new(here.i.saturating_add(cells), here.j.saturating_add(cells)));
        CellBounds {
            south: south_west.lat,
            west: south_west.lng,
            north: north_east.lat,
            east: north_east.lng,
        }
    }
}
