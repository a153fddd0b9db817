//! Main entry point.
//!
//! `merge-grid` launches the HTTP server with the game WebSocket endpoint.
//! `merge-grid demo [seed]` plays a session in the terminal instead.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use merge_grid::config::game::GameConfig;
use merge_grid::config::server::{BIND_HOST, BIND_PORT};
use merge_grid::game::demo::game_loop::run_game_loop;
use merge_grid::server;
use merge_grid::server::game_session::server::GameSessionManager;

async fn run_server() -> std::io::Result<()> {
    // Start the GameSessionManager actor (creates and tracks game sessions).
    let game_session_manager = GameSessionManager::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(game_session_manager));

    info!("[Main] Listening on {}:{}", BIND_HOST, BIND_PORT);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(server::router::config)
    })
    .bind((BIND_HOST, BIND_PORT))?
    .run()
    .await
}

fn main() -> std::io::Result<()> {
    // Initialize logger from the RUST_LOG environment variable.
    env_logger::init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("demo") => {
            let mut config = GameConfig::default();
            if let Some(raw) = args.next() {
                config.seed = raw.parse().map_err(|_| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("invalid seed '{raw}'"))
                })?;
            }
            run_game_loop(config)
        }
        _ => actix_web::rt::System::new().block_on(run_server()),
    }
}
