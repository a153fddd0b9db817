/// Server configuration constants.
///
/// Bind address and limits applied to what a single client may ask for.
pub const BIND_HOST: &str = "127.0.0.1";

/// Port the HTTP/WebSocket server listens on.
pub const BIND_PORT: u16 = 8080;

/// Largest viewport (in cells) a client may request in one frame.
/// At zoom 19 a full-screen map covers a few thousand cells.
pub const MAX_VIEWPORT_CELLS: usize = 10_000;

/// Delay (in milliseconds) before the win notice is pushed to the client.
pub const WIN_NOTICE_DELAY_MS: u64 = 250;

/// Cells on each side of the player drawn before the client reports a viewport.
pub const DEFAULT_VIEW_CELLS: i32 = 8;

/// Time (in seconds) a freshly created game waits for its socket before stopping.
pub const ADAPTER_JOIN_TIMEOUT_SECS: u64 = 10;

/// Largest cell index, on either axis, a client may click or view.
/// Far beyond the globe at the default tile size.
pub const MAX_CELL_INDEX: i32 = 10_000_000;
