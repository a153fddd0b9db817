use actix::{Addr, Actor, ActorContext, StreamHandler, AsyncContext, Handler};
use actix_web::{HttpRequest, HttpResponse, web, Error, error, http::StatusCode};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::server::anti_spam::{AntiSpamState, Verdict};
use crate::server::game_session::server::{CreateGame, GameSession};
use crate::server::game_session::messages::{
    ClientAction, ProcessClientMessage, RegisterAdapter, ServerMessage, UnregisterAdapter,
};
use crate::server::state::AppState;
use crate::server::ws_actor_utils::WsActorUtils;
use crate::server::ws_error::http_error_response;

/// WebSocket side of a game: forwards client actions to the game session and
/// writes whatever the session pushes back.
pub struct GameSessionActor {
    pub game_id: Uuid,
    pub session_addr: Addr<GameSession>,
    anti_spam: AntiSpamState,
}

impl GameSessionActor {
    pub fn new(game_id: Uuid, session_addr: Addr<GameSession>) -> Self {
        Self {
            game_id,
            session_addr,
            anti_spam: AntiSpamState::new(game_id.to_string()),
        }
    }
}

impl WsActorUtils for GameSessionActor {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn session_label(&self) -> String {
        self.game_id.to_string()
    }
}

impl Actor for GameSessionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(RegisterAdapter { addr: ctx.address().recipient() });
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        info!("[GameSessionActor] Client left game_id={}", self.game_id);
        self.session_addr.do_send(UnregisterAdapter { addr: ctx.address().recipient() });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameSessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                if self.anti_spam.on_request() != Verdict::Pass {
                    self.send_ban_and_close(ctx);
                    return;
                }
                // Deserialize the client message.
                let msg: ClientAction = match serde_json::from_str(&text) {
                    Ok(m) => m,
                    Err(e) => {
                        warn!("[GameSessionActor] Invalid message for game_id={}: {}", self.game_id, e);
                        let label = self.session_label();
                        self.push_error(ctx, "INVALID_ACTION", "Invalid client message", Some(label.as_str()));
                        return;
                    }
                };
                self.anti_spam.clear_error();
                self.session_addr.do_send(ProcessClientMessage {
                    msg,
                    addr: ctx.address().recipient(),
                });
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[GameSessionActor] Protocol error on game_id={}: {}", self.game_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

// Handler for messages pushed by the game session.
impl Handler<ServerMessage> for GameSessionActor {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, ctx: &mut Self::Context) -> Self::Result {
        if let ServerMessage::Error { code, .. } = &msg {
            if !self.anti_spam.admit_error(code) {
                return;
            }
        }
        match serde_json::to_string(&msg) {
            Ok(text) => self.push_text(ctx, text),
            Err(e) => {
                warn!("[GameSessionActor] Failed to serialize server message: {}", e);
                let label = self.session_label();
                self.push_error(ctx, "INTERNAL", "Failed to serialize game update", Some(label.as_str()));
            }
        }
    }
}

/// Build the game configuration from the query string.
/// Only `seed` is recognised; unknown parameters are ignored.
pub fn parse_game_config(query: &str) -> Result<GameConfig, String> {
    let mut config = GameConfig::default();
    for kv in query.split('&') {
        let mut split = kv.splitn(2, '=');
        if let (Some("seed"), Some(raw)) = (split.next(), split.next()) {
            let raw = urlencoding::decode(raw).map_err(|e| e.to_string())?;
            config.seed = raw
                .trim()
                .parse()
                .map_err(|_| format!("Invalid seed '{}'", raw))?;
        }
    }
    Ok(config)
}

/// WebSocket endpoint for a new game.
///
/// Accepts an optional `seed` query parameter (unsigned 64-bit integer).
pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let config = match parse_game_config(req.query_string()) {
        Ok(config) => config,
        Err(message) => {
            return Ok(http_error_response(
                "INVALID_SEED",
                &message,
                Some(req.query_string()),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let (game_id, session_addr) = data
        .game_session_manager
        .send(CreateGame { config })
        .await
        .map_err(error::ErrorInternalServerError)?;
    info!("[GameSessionActor] Client joined game_id={} seed={}", game_id, config.seed);

    ws::start(GameSessionActor::new(game_id, session_addr), &req, stream)
}
