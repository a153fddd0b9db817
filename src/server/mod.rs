// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Game session orchestration (one actor per game, one per socket)
//! - Anti-spam and error reporting helpers for sockets

pub mod state;
pub mod router;
pub mod game_session;
pub mod anti_spam;
pub mod ws_actor_utils;
pub mod ws_error;
