//! Standalone game loop for local testing/demo.
//!
//! This module provides an interactive loop for playing the game in the terminal.

use std::io::{self, BufRead, Write};

use log::info;

use crate::config::game::GameConfig;
use crate::game::demo::render::{print_grid, print_player_state};
use crate::game::state::GameState;
use crate::game::types::{CellIndex, Direction, PlayerAction};

/// Cells drawn on each side of the player.
const VIEW_RADIUS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Act(PlayerAction),
    Quit,
}

/// Parse one input line. Clicks take an offset from the player's cell:
/// `c 1 -2` clicks one cell north and two cells west.
fn parse_command(line: &str, here: CellIndex) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "w" | "up" => Command::Act(PlayerAction::Move(Direction::Up)),
        "s" | "down" => Command::Act(PlayerAction::Move(Direction::Down)),
        "a" | "left" => Command::Act(PlayerAction::Move(Direction::Left)),
        "d" | "right" => Command::Act(PlayerAction::Move(Direction::Right)),
        "c" | "click" => {
            let di: i32 = parts.next()?.parse().ok()?;
            let dj: i32 = parts.next()?.parse().ok()?;
            Command::Act(PlayerAction::ClickCell(CellIndex::new(here.i + di, here.j + dj)))
        }
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn redraw(game_state: &GameState) {
    let frame = game_state.frame(&game_state.viewport_around_player(VIEW_RADIUS));
    print_player_state(&frame.player);
    print_grid(&frame);
}

/// Run the main game loop for a single player.
pub fn run_game_loop(config: GameConfig) -> io::Result<()> {
    let mut game_state = GameState::new(config);
    info!("[Demo] Starting terminal session with seed {}", config.seed);

    println!("Game start! Reach {} to win.", config.win_threshold);
    redraw(&game_state);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Move (w/a/s/d), click (c <north> <east>) or quit (q): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(line.trim(), game_state.player_cell()) {
            Some(Command::Quit) => break,
            Some(Command::Act(action)) => {
                let outcome = game_state.apply_player_action(action);
                if !outcome.changed {
                    println!("Nothing happens.");
                }
                redraw(&game_state);
                if let Some(win) = outcome.win {
                    println!("*** You crafted a {} token. You win! ***", win.value);
                }
            }
            None => println!("Unknown command."),
        }
    }

    println!("Final score: {}", game_state.score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_relative_clicks() {
        let here = CellIndex::new(10, -3);
        assert_eq!(
            parse_command("w", here),
            Some(Command::Act(PlayerAction::Move(Direction::Up)))
        );
        assert_eq!(
            parse_command("c 1 -2", here),
            Some(Command::Act(PlayerAction::ClickCell(CellIndex::new(11, -5))))
        );
        assert_eq!(parse_command("q", here), Some(Command::Quit));
        assert_eq!(parse_command("c 1", here), None);
        assert_eq!(parse_command("jump", here), None);
        assert_eq!(parse_command("", here), None);
    }
}
