use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::systems::Frame;
use crate::game::types::{CellBounds, Direction, WinEvent};

/// A client message forwarded by the socket actor to its game session.
/// `addr` identifies the sender and must be the registered adapter.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessClientMessage {
    pub msg: ClientAction,
    pub addr: Recipient<ServerMessage>,
}

/// Attach the actor that renders this game (the WebSocket actor in production).
#[derive(Message)]
#[rtype(result = "()")]
pub struct RegisterAdapter {
    pub addr: Recipient<ServerMessage>,
}

/// The socket went away; the game session ends with it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct UnregisterAdapter {
    pub addr: Recipient<ServerMessage>,
}

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    /// The map's visible rectangle changed.
    Viewport(CellBounds),
    ClickCell { i: i32, j: i32 },
    Move(Direction),
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerMessage {
    Frame(Frame),
    Win(WinEvent),
    Error {
        code: String,
        message: String,
        context: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, message: &str, context: Option<&str>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context: context.unwrap_or("").to_string(),
        }
    }
}
