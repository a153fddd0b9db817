/// Configuration for anti-spam and anti-flood protection on game sockets.
/// All values are in seconds or counts per second.
pub const MAX_REQUESTS_PER_SECOND: u32 = 30;

/// Pushes (frames, win notices, errors) a socket may receive per second.
/// Each request yields at most one frame, so this only trips on floods.
pub const MAX_PUSHES_PER_SECOND: u32 = 60;

pub const BAN_DURATION_SECONDS: u64 = 60;
