//! HTTP and WebSocket routing configuration.
//!
//! Each game is played over its own WebSocket connection.

use actix_web::{error, web, Error, HttpResponse};
use serde_json::json;

use crate::server::game_session::server::ActiveGames;
use crate::server::game_session::session::ws_game;
use crate::server::state::AppState;

/// Configure the application's HTTP/WebSocket routes.
///
/// `/ws/game` opens a fresh game session; the optional `seed` query
/// parameter picks the world. `/health` reports the number of running games.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/game")
            .to(ws_game)
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health))
    );
}

async fn health(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let active_games = data
        .game_session_manager
        .send(ActiveGames)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(json!({ "status": "ok", "active_games": active_games })))
}
