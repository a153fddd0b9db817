use actix::prelude::*;
use std::collections::HashMap;
use actix::MessageResult;
use uuid::Uuid;
use log::{debug, info, warn};
use std::time::Duration;

use crate::config::game::GameConfig;
use crate::config::server::{
    ADAPTER_JOIN_TIMEOUT_SECS, DEFAULT_VIEW_CELLS, MAX_CELL_INDEX, MAX_VIEWPORT_CELLS,
    WIN_NOTICE_DELAY_MS,
};
use crate::game::state::GameState;
use crate::game::types::{CellBounds, CellIndex, LatLng, PlayerAction, WinEvent};
use crate::server::game_session::messages::{
    ClientAction, ProcessClientMessage, RegisterAdapter, ServerMessage, UnregisterAdapter,
};

/// One running game: its state, the socket that renders it and the viewport
/// that socket last reported.
pub struct GameSession {
    pub game_id: Uuid,
    pub game_state: GameState,

    manager: Addr<GameSessionManager>,
    adapter: Option<Recipient<ServerMessage>>,
    viewport: CellBounds,
    win_notice: Option<SpawnHandle>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[GameSession] Started game_id={} seed={}", self.game_id, self.game_state.config.seed);
        // A game nobody connects to is dropped.
        ctx.run_later(Duration::from_secs(ADAPTER_JOIN_TIMEOUT_SECS), |act, ctx| {
            if act.adapter.is_none() {
                warn!("[GameSession] No client joined game_id={}, stopping", act.game_id);
                ctx.stop();
            }
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            "[GameSession] Stopped game_id={} final_score={}",
            self.game_id,
            self.game_state.score()
        );
        self.manager.do_send(GameEnded { game_id: self.game_id });
    }
}

impl GameSession {
    pub fn new(game_id: Uuid, config: GameConfig, manager: Addr<GameSessionManager>) -> Self {
        let game_state = GameState::new(config);
        let viewport = game_state.viewport_around_player(DEFAULT_VIEW_CELLS);
        Self {
            game_id,
            game_state,
            manager,
            adapter: None,
            viewport,
            win_notice: None,
        }
    }

    fn send(&self, msg: ServerMessage) {
        if let Some(addr) = &self.adapter {
            addr.do_send(msg);
        }
    }

    /// Recompute the whole visible window and push it to the client.
    pub fn send_frame(&self) {
        let frame = self.game_state.frame(&self.viewport);
        debug!(
            "[GameSession] Frame game_id={} cells={} held={:?} score={}",
            self.game_id,
            frame.cells.len(),
            frame.player.held_token,
            frame.player.score
        );
        self.send(ServerMessage::Frame(frame));
    }

    fn reject(&self, code: &str, message: &str, context: String) {
        warn!("[GameSession] {} for game_id={}: {}", code, self.game_id, context);
        self.send(ServerMessage::error(code, message, Some(context.as_str())));
    }

    fn viewport_in_range(&self, viewport: &CellBounds) -> bool {
        [
            LatLng::new(viewport.south, viewport.west),
            LatLng::new(viewport.north, viewport.east),
        ]
        .into_iter()
        .all(|corner| {
            corner.lat.is_finite()
                && corner.lng.is_finite()
                && cell_in_range(self.game_state.grid.cell_index_of(corner))
        })
    }

    fn set_viewport(&mut self, viewport: CellBounds) {
        if !self.viewport_in_range(&viewport) {
            self.reject("OUT_OF_RANGE", "Viewport lies outside the playable grid", format!("{:?}", viewport));
            return;
        }
        let cells = self.game_state.grid.cell_count(&viewport);
        if cells > MAX_VIEWPORT_CELLS {
            self.reject("VIEWPORT_TOO_LARGE", "Requested viewport covers too many cells", cells.to_string());
            return;
        }
        self.viewport = viewport;
        self.send_frame();
    }

    fn apply_action(&mut self, action: PlayerAction, ctx: &mut Context<Self>) {
        let outcome = self.game_state.apply_player_action(action);
        if outcome.changed {
            self.send_frame();
        }
        if let Some(win) = outcome.win {
            self.schedule_win_notice(win, ctx);
        }
    }

    /// Deliver the win notice shortly after the frame that produced it.
    /// A pending notice is replaced, never duplicated.
    fn schedule_win_notice(&mut self, win: WinEvent, ctx: &mut Context<Self>) {
        if let Some(handle) = self.win_notice.take() {
            ctx.cancel_future(handle);
        }
        let handle = ctx.run_later(Duration::from_millis(WIN_NOTICE_DELAY_MS), move |act, _ctx| {
            act.win_notice = None;
            info!("[GameSession] Win game_id={} value={}", act.game_id, win.value);
            act.send(ServerMessage::Win(win));
        });
        self.win_notice = Some(handle);
    }
}

impl Handler<RegisterAdapter> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: RegisterAdapter, _: &mut Context<Self>) -> Self::Result {
        if self.adapter.is_some() {
            warn!("[GameSession] Replacing client of game_id={}", self.game_id);
        }
        self.adapter = Some(msg.addr);
        self.send_frame();
    }
}

impl Handler<UnregisterAdapter> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: UnregisterAdapter, ctx: &mut Context<Self>) -> Self::Result {
        if self.adapter.as_ref() == Some(&msg.addr) {
            self.adapter = None;
            ctx.stop();
        }
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        // Only the registered client may drive the game.
        if self.adapter.as_ref() != Some(&msg.addr) {
            warn!("[GameSession] Message from unregistered client ignored, game_id={}", self.game_id);
            return;
        }

        match msg.msg {
            ClientAction::Viewport(viewport) => self.set_viewport(viewport),
            ClientAction::ClickCell { i, j } => {
                let cell = CellIndex::new(i, j);
                if cell_in_range(cell) {
                    self.apply_action(PlayerAction::ClickCell(cell), ctx);
                } else {
                    self.reject("OUT_OF_RANGE", "Cell lies outside the playable grid", format!("({}, {})", i, j));
                }
            }
            ClientAction::Move(direction) => self.apply_action(PlayerAction::Move(direction), ctx),
            ClientAction::Ping => self.send_frame(),
        }
    }
}

fn cell_in_range(cell: CellIndex) -> bool {
    let max = MAX_CELL_INDEX.unsigned_abs();
    cell.i.unsigned_abs() <= max && cell.j.unsigned_abs() <= max
}

/// Creates game sessions and keeps track of the running ones.
pub struct GameSessionManager {
    sessions: HashMap<Uuid, Addr<GameSession>>,
}

impl GameSessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "(Uuid, Addr<GameSession>)")]
pub struct CreateGame {
    pub config: GameConfig,
}

impl Handler<CreateGame> for GameSessionManager {
    type Result = MessageResult<CreateGame>;

    fn handle(&mut self, msg: CreateGame, ctx: &mut Context<Self>) -> Self::Result {
        let game_id = Uuid::new_v4();
        let session = GameSession::new(game_id, msg.config, ctx.address()).start();
        self.sessions.insert(game_id, session.clone());
        debug!("[GameSessionManager] Created game_id={} active={}", game_id, self.sessions.len());
        MessageResult((game_id, session))
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct GameEnded {
    pub game_id: Uuid,
}

impl Handler<GameEnded> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: GameEnded, _: &mut Context<Self>) -> Self::Result {
        self.sessions.remove(&msg.game_id);
        debug!("[GameSessionManager] Removed game_id={} active={}", msg.game_id, self.sessions.len());
    }
}

#[derive(Message)]
#[rtype(result = "usize")]
pub struct ActiveGames;

impl Handler<ActiveGames> for GameSessionManager {
    type Result = usize;

    fn handle(&mut self, _: ActiveGames, _: &mut Context<Self>) -> Self::Result {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::game::systems::is_cell_reachable;
    use crate::game::types::Direction;

    /// Stands in for the socket actor and keeps everything pushed to it.
    struct Recorder {
        seen: Arc<Mutex<Vec<ServerMessage>>>,
    }

    impl Actor for Recorder {
        type Context = Context<Self>;
    }

    impl Handler<ServerMessage> for Recorder {
        type Result = ();

        fn handle(&mut self, msg: ServerMessage, _: &mut Context<Self>) -> Self::Result {
            self.seen.lock().unwrap().push(msg);
        }
    }

    /// A config where any pickup wins, and a cell holding a token in reach of the start.
    fn instant_win_setup() -> (GameConfig, CellIndex) {
        (0..10_000u64)
            .find_map(|seed| {
                let config = GameConfig { seed, win_threshold: 1, ..GameConfig::default() };
                let state = GameState::new(config);
                state
                    .grid
                    .cells_in(&state.viewport_around_player(3))
                    .find(|&cell| state.field.value_at(cell).is_some() && is_cell_reachable(&state, cell))
                    .map(|cell| (config, cell))
            })
            .expect("a seed with a token in reach")
    }

    async fn attached_session(
        config: GameConfig,
    ) -> (Addr<GameSession>, Recipient<ServerMessage>, Arc<Mutex<Vec<ServerMessage>>>) {
        let manager = GameSessionManager::new().start();
        let (_, session) = manager.send(CreateGame { config }).await.unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let adapter = Recorder { seen: seen.clone() }.start().recipient();
        session.send(RegisterAdapter { addr: adapter.clone() }).await.unwrap();
        (session, adapter, seen)
    }

    async fn drive(
        session: &Addr<GameSession>,
        adapter: &Recipient<ServerMessage>,
        actions: Vec<ClientAction>,
    ) {
        for msg in actions {
            session
                .send(ProcessClientMessage { msg, addr: adapter.clone() })
                .await
                .unwrap();
        }
    }

    #[actix_web::test]
    async fn win_notice_is_delivered_once() {
        let (config, cell) = instant_win_setup();
        let view = GameState::new(config).viewport_around_player(2);
        let (session, adapter, seen) = attached_session(config).await;

        drive(
            &session,
            &adapter,
            vec![
                ClientAction::ClickCell { i: cell.i, j: cell.j },
                ClientAction::Move(Direction::Up),
                ClientAction::Viewport(view),
                ClientAction::Ping,
                ClientAction::Move(Direction::Down),
                ClientAction::Viewport(view),
            ],
        )
        .await;
        actix_web::rt::time::sleep(Duration::from_millis(WIN_NOTICE_DELAY_MS * 3)).await;

        let seen = seen.lock().unwrap();
        let wins: Vec<_> = seen
            .iter()
            .filter_map(|m| match m {
                ServerMessage::Win(win) => Some(*win),
                _ => None,
            })
            .collect();
        assert_eq!(wins.len(), 1);
        assert!(wins[0].value >= 1);
        // Registration, click, two moves, two viewports and the ping each push a frame.
        let frames = seen.iter().filter(|m| matches!(m, ServerMessage::Frame(_))).count();
        assert_eq!(frames, 7);
    }

    #[actix_web::test]
    async fn out_of_range_requests_are_rejected_and_session_survives() {
        let (session, adapter, seen) = attached_session(GameConfig::default()).await;

        drive(
            &session,
            &adapter,
            vec![
                ClientAction::ClickCell { i: i32::MAX, j: 0 },
                ClientAction::ClickCell { i: 0, j: i32::MIN },
                ClientAction::Viewport(CellBounds { south: 1e10, west: 0.0, north: 1e10, east: 0.0 }),
                ClientAction::Ping,
            ],
        )
        .await;
        actix_web::rt::time::sleep(Duration::from_millis(50)).await;

        let seen = seen.lock().unwrap();
        let rejected = seen
            .iter()
            .filter(|m| matches!(m, ServerMessage::Error { code, .. } if code == "OUT_OF_RANGE"))
            .count();
        assert_eq!(rejected, 3);
        // Registration frame plus the ping reply.
        let frames = seen.iter().filter(|m| matches!(m, ServerMessage::Frame(_))).count();
        assert_eq!(frames, 2);
    }

    #[actix_web::test]
    async fn manager_tracks_created_games() {
        let manager = GameSessionManager::new().start();
        let (first, _) = manager.send(CreateGame { config: GameConfig::default() }).await.unwrap();
        let (second, _) = manager
            .send(CreateGame { config: GameConfig { seed: 1, ..GameConfig::default() } })
            .await
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.send(ActiveGames).await.unwrap(), 2);

        manager.send(GameEnded { game_id: first }).await.unwrap();
        assert_eq!(manager.send(ActiveGames).await.unwrap(), 1);
    }
}
