//! Game rules system.
//!
//! Pickup, craft, score and win checks. These are the only functions that
//! mutate the overlay or the held token. Every rule checks all of its
//! preconditions before writing, so a rejected action leaves the state as it
//! was.

use log::{debug, info};

use crate::game::state::GameState;
use crate::game::systems::interaction::is_cell_reachable;
use crate::game::types::{CellIndex, Token, WinEvent};

/// Result of a click on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    PickedUp(Token),
    Crafted(Token),
    Ignored,
}

/// Take the token of `cell` into the empty hand.
///
/// The cell is marked removed whether the token came from the generator or
/// from an earlier craft, so a picked-up merged token never uncovers the
/// base token that used to sit there.
pub fn pick_up_token(game_state: &mut GameState, cell: CellIndex) -> bool {
    if game_state.player.is_holding() || !is_cell_reachable(game_state, cell) {
        return false;
    }
    let Some((value, source)) = game_state.field.source_at(cell) else {
        return false;
    };

    game_state.field.overlay_mut().mark_removed(cell);
    game_state.player.held_token = Some(value);
    debug!("[Rules] Picked up {} ({:?}) at ({}, {})", value, source, cell.i, cell.j);
    true
}

/// Merge the held token into an equal token at `cell`, doubling it.
pub fn craft_token(game_state: &mut GameState, cell: CellIndex) -> bool {
    let Some(held) = game_state.player.held_token else {
        return false;
    };
    if !is_cell_reachable(game_state, cell) || game_state.field.value_at(cell) != Some(held) {
        return false;
    }
    let Some(merged) = held.checked_mul(2) else {
        return false;
    };

    game_state.field.overlay_mut().set_merged(cell, merged);
    game_state.player.held_token = None;
    debug!("[Rules] Crafted {} at ({}, {})", merged, cell.i, cell.j);
    true
}

/// Highest token in play: the held token or any crafted token, 0 if none.
pub fn check_score(game_state: &GameState) -> Token {
    game_state
        .field
        .overlay()
        .merged_values()
        .chain(game_state.player.held_token)
        .max()
        .unwrap_or(0)
}

/// Emit the win event the first time the score reaches the threshold.
/// Later calls return `None` for the rest of the session.
pub fn check_win_condition(game_state: &mut GameState) -> Option<WinEvent> {
    if game_state.win_notified {
        return None;
    }
    let score = check_score(game_state);
    if score < game_state.config.win_threshold {
        return None;
    }
    game_state.win_notified = true;
    info!("[Rules] Win threshold {} reached with {}", game_state.config.win_threshold, score);
    Some(WinEvent { value: score })
}

/// Whether clicking `cell` right now would do something.
pub fn is_actionable(game_state: &GameState, cell: CellIndex) -> bool {
    if !is_cell_reachable(game_state, cell) {
        return false;
    }
    match (game_state.player.held_token, game_state.field.value_at(cell)) {
        (None, Some(_)) => true,
        (Some(held), Some(value)) => held == value && held.checked_mul(2).is_some(),
        (_, None) => false,
    }
}

/// Route a click to pickup (empty hand) or craft (holding a token).
pub fn handle_cell_click(game_state: &mut GameState, cell: CellIndex) -> ClickOutcome {
    match game_state.player.held_token {
        None => {
            if pick_up_token(game_state, cell) {
                ClickOutcome::PickedUp(game_state.player.held_token.unwrap_or_default())
            } else {
                ClickOutcome::Ignored
            }
        }
        Some(held) => {
            if craft_token(game_state, cell) {
                ClickOutcome::Crafted(held * 2)
            } else {
                ClickOutcome::Ignored
            }
        }
    }
}
