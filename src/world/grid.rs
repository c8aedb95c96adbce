//! In-memory grid world implementing the host-adapter traits
//!
//! Used by the integration tests and the demo binary; a real host would
//! adapt its own level data instead.

use ahash::AHashMap;

use crate::core::types::{RoomId, TileCoord};
use crate::world::map::{Exit, RoomGeometry, WorldMap};
use crate::world::terrain::Terrain;

/// Rectangular tile grid with per-tile terrain
#[derive(Debug, Clone)]
pub struct GridRoom {
    width: i32,
    height: i32,
    tiles: Vec<Terrain>,
}

impl GridRoom {
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Terrain::Air)
    }

    pub fn filled(width: i32, height: i32, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            tiles: vec![terrain; (width * height) as usize],
        }
    }

    pub fn set(&mut self, tile: TileCoord, terrain: Terrain) {
        if self.in_bounds(tile) {
            self.tiles[(tile.y * self.width + tile.x) as usize] = terrain;
        }
    }

    /// Sets every tile of row `y` to the given terrain
    pub fn fill_row(&mut self, y: i32, terrain: Terrain) {
        for x in 0..self.width {
            self.set(TileCoord::new(x, y), terrain);
        }
    }
}

impl RoomGeometry for GridRoom {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn terrain(&self, tile: TileCoord) -> Terrain {
        if !self.in_bounds(tile) {
            return Terrain::OffScreen;
        }
        self.tiles[(tile.y * self.width + tile.x) as usize]
    }
}

/// A set of grid rooms joined by exit nodes
#[derive(Debug, Clone, Default)]
pub struct GridWorld {
    rooms: AHashMap<RoomId, GridRoom>,
    exits: AHashMap<RoomId, Vec<Exit>>,
    shelters: Vec<RoomId>,
}

impl GridWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, id: RoomId, room: GridRoom) {
        self.rooms.insert(id, room);
        self.exits.entry(id).or_default();
    }

    /// Joins two rooms with a bidirectional pair of exit nodes
    pub fn connect(&mut self, a: RoomId, tile_a: TileCoord, b: RoomId, tile_b: TileCoord) {
        self.exits
            .entry(a)
            .or_default()
            .push(Exit { tile: tile_a, leads_to: b });
        self.exits
            .entry(b)
            .or_default()
            .push(Exit { tile: tile_b, leads_to: a });
    }

    pub fn add_shelter(&mut self, id: RoomId) {
        self.shelters.push(id);
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut GridRoom> {
        self.rooms.get_mut(&id)
    }
}

impl WorldMap for GridWorld {
    fn room(&self, id: RoomId) -> Option<&dyn RoomGeometry> {
        self.rooms.get(&id).map(|r| r as &dyn RoomGeometry)
    }

    fn exits(&self, id: RoomId) -> Option<&[Exit]> {
        self.exits.get(&id).map(|e| e.as_slice())
    }

    fn shelters(&self) -> &[RoomId] {
        &self.shelters
    }
}
