//! Game rendering system (terminal).
//!
//! This module prints a frame as a grid of cells, north at the top.

use std::fmt::Write;

use crate::game::systems::{CellView, Frame, PlayerView};

/// Text for a single cell: palette glyph and value, `·` for an empty cell in reach.
/// Actionable cells are bracketed, the player's cell is prefixed with `@`.
fn cell_symbol(view: &CellView, player: &PlayerView) -> String {
    let glyph = view.symbol.map(|s| s.glyph).unwrap_or(' ');
    let mut symbol = match view.value {
        Some(value) if view.actionable => format!("[{glyph}{value}]"),
        Some(value) => format!("{glyph}{value}"),
        None if view.reachable => "·".to_string(),
        None => " ".to_string(),
    };
    if view.cell == player.cell {
        symbol = format!("@{symbol}");
    }
    symbol
}

/// Format the frame's cells, rows from north to south.
pub fn format_grid(frame: &Frame) -> String {
    let mut rows: Vec<Vec<&CellView>> = Vec::new();
    for view in &frame.cells {
        match rows.last_mut() {
            Some(row) if row[0].cell.i == view.cell.i => row.push(view),
            _ => rows.push(vec![view]),
        }
    }

    let mut out = String::new();
    for row in rows.iter().rev() {
        for view in row {
            let _ = write!(out, "{:<8}", cell_symbol(view, &frame.player));
        }
        out.push('\n');
    }
    out
}

/// Print the frame's cells to the terminal.
pub fn print_grid(frame: &Frame) {
    println!("{}", format_grid(frame));
}

/// Print the state of the player.
pub fn print_player_state(player: &PlayerView) {
    println!("--- Player ---");
    println!("Cell: ({}, {})", player.cell.i, player.cell.j);
    match player.held_token {
        Some(token) => println!("Holding: {}", token),
        None => println!("Holding: nothing"),
    }
    println!("Score: {}", player.score);
    println!();
}
