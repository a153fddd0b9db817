use serde::{Serialize, Deserialize};

/// Numeric token value. Always a power-of-two multiple of a base denomination.
pub type Token = u32;

/// Continuous world position, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Integer grid index. `i` grows northwards (latitude), `j` eastwards (longitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub i: i32,
    pub j: i32,
}

impl CellIndex {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

/// Axis-aligned coordinate rectangle. Used both for a single cell's region
/// (half-open on the north and east edges) and for a client viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl CellBounds {
    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }

    /// Half-open containment: south/west edges are inside, north/east are not.
    pub fn contains(&self, pos: LatLng) -> bool {
        pos.lat >= self.south && pos.lat < self.north && pos.lng >= self.west && pos.lng < self.east
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stay,
}

impl Direction {
    /// Cell offset `(di, dj)` for one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Stay => (0, 0),
        }
    }
}

/// The single player of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: LatLng,
    pub held_token: Option<Token>,
    /// Interaction radius in degrees.
    pub radius: f64,
}

impl Player {
    pub fn new(pos: LatLng, radius: f64) -> Self {
        Self {
            pos,
            held_token: None,
            radius,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.held_token.is_some()
    }
}

/// Input the game session reacts to, whatever adapter produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Move(Direction),
    ClickCell(CellIndex),
}

/// One-shot notification that the session reached the win threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinEvent {
    pub value: Token,
}
