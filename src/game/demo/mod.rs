// Demo module for the game. A terminal adapter: renders a window of cells
// around the player and reads moves and clicks from stdin.
pub mod game_loop;
pub mod render;
