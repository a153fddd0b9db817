//! Tile-merge game on an unbounded map grid.
//!
//! - [`game`]: the core. Procedural token field, sparse overlay of player
//!   changes, reachability, and the pickup/craft/score/win rules.
//! - [`server`]: actix WebSocket server where a map client acts as the
//!   render adapter of a game session.
//! - [`config`]: gameplay and server constants.

pub mod config;
pub mod game;
pub mod server;
