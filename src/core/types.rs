//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulation tick counter
pub type Tick = u64;

/// Side length of one tile in world units (pixels)
pub const TILE_SIZE: f32 = 20.0;

/// Unique identifier for rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// Index of an exit / shortcut node within a room's exit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitIndex(pub usize);

/// Unique identifier for host-side objects (food items, creatures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer grid cell within a room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

/// The four cardinal directions
pub const FOUR_DIRECTIONS: [TileCoord; 4] = [
    TileCoord { x: 1, y: 0 },
    TileCoord { x: -1, y: 0 },
    TileCoord { x: 0, y: 1 },
    TileCoord { x: 0, y: -1 },
];

/// The eight compass directions
pub const EIGHT_DIRECTIONS: [TileCoord; 8] = [
    TileCoord { x: 1, y: 0 },
    TileCoord { x: 1, y: 1 },
    TileCoord { x: 0, y: 1 },
    TileCoord { x: -1, y: 1 },
    TileCoord { x: -1, y: 0 },
    TileCoord { x: -1, y: -1 },
    TileCoord { x: 0, y: -1 },
    TileCoord { x: 1, y: -1 },
];

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another tile
    pub fn manhattan_dist(&self, other: TileCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Euclidean distance to another tile
    pub fn float_dist(&self, other: TileCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Center of this tile in world units
    pub fn to_world(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            self.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// Tile containing the given world position
    pub fn from_world(pos: Vec2) -> Self {
        Self {
            x: (pos.x / TILE_SIZE).floor() as i32,
            y: (pos.y / TILE_SIZE).floor() as i32,
        }
    }

    pub fn scaled(&self, factor: i32) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

impl std::ops::Add for TileCoord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2D position in world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// A concrete navigation target
///
/// Either a specific tile, or an exit node whose tile is resolved through the
/// room's exit table. "No destination" is `Option::<Destination>::None` at
/// every consumer; there are no sentinel ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Tile { room: RoomId, tile: TileCoord },
    Exit { room: RoomId, exit: ExitIndex },
}

impl Destination {
    pub fn room(&self) -> RoomId {
        match self {
            Destination::Tile { room, .. } => *room,
            Destination::Exit { room, .. } => *room,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_world_round_trip() {
        let tile = TileCoord::new(7, 3);
        assert_eq!(TileCoord::from_world(tile.to_world()), tile);
    }

    #[test]
    fn manhattan_and_euclidean_distances() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(3, 4);
        assert_eq!(a.manhattan_dist(b), 7);
        assert!((a.float_dist(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn destination_room_extraction() {
        let d = Destination::Exit { room: RoomId(4), exit: ExitIndex(1) };
        assert_eq!(d.room(), RoomId(4));
    }
}
