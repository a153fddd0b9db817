pub mod types;
pub mod state;

pub mod grid;
pub mod systems;
pub mod demo;
