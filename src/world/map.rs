//! Host-adapter boundary: room geometry and world topology
//!
//! The core never owns level data. The host satisfies these traits with a
//! thin adapter; [`crate::world::grid`] provides an in-memory implementation
//! for tests and the demo binary.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::{ExitIndex, RoomId, TileCoord};
use crate::world::terrain::Terrain;

/// Tile-level queries against one room
pub trait RoomGeometry {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Terrain classification of a tile; `OffScreen` outside the bounds
    fn terrain(&self, tile: TileCoord) -> Terrain;

    fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width() && tile.y < self.height()
    }
}

/// One connection point between two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// Tile of the exit node inside the owning room
    pub tile: TileCoord,
    /// Room the exit leads to
    pub leads_to: RoomId,
}

/// Room-graph queries against the whole world
///
/// `exits` may return `None` while the host has not finished loading a
/// room's shortcut table; callers treat that as "retry next tick".
pub trait WorldMap {
    fn room(&self, id: RoomId) -> Option<&dyn RoomGeometry>;

    /// Exit table of a room, or `None` while topology is still loading
    fn exits(&self, id: RoomId) -> Option<&[Exit]>;

    /// Rooms that are shelters
    fn shelters(&self) -> &[RoomId];

    fn connections(&self, id: RoomId) -> Vec<RoomId> {
        self.exits(id)
            .map(|exits| exits.iter().map(|e| e.leads_to).collect())
            .unwrap_or_default()
    }

    fn exit_tile(&self, id: RoomId, exit: ExitIndex) -> Option<TileCoord> {
        self.exits(id)?.get(exit.0).map(|e| e.tile)
    }
}

/// Finds the exit of `from` that starts the shortest room-hop route to
/// `target`
///
/// Breadth-first over the room graph, so it terminates even on cyclic
/// topologies. `None` when no route exists or the exit table is not ready.
pub fn exit_toward_room(world: &dyn WorldMap, from: RoomId, target: RoomId) -> Option<ExitIndex> {
    let exits = world.exits(from)?;

    let mut visited: AHashSet<RoomId> = AHashSet::new();
    visited.insert(from);

    // each frontier entry remembers the first hop that reached it
    let mut frontier: VecDeque<(RoomId, ExitIndex)> = VecDeque::new();
    for (i, exit) in exits.iter().enumerate() {
        if exit.leads_to == target {
            return Some(ExitIndex(i));
        }
        if visited.insert(exit.leads_to) {
            frontier.push_back((exit.leads_to, ExitIndex(i)));
        }
    }

    while let Some((room, first_hop)) = frontier.pop_front() {
        for next in world.connections(room) {
            if next == target {
                return Some(first_hop);
            }
            if visited.insert(next) {
                frontier.push_back((next, first_hop));
            }
        }
    }

    None
}

/// Room-hop distance from `from` to the nearest shelter, with the exit that
/// starts the route
///
/// `None` when no shelter is reachable.
pub fn route_to_nearest_shelter(world: &dyn WorldMap, from: RoomId) -> Option<(ExitIndex, u32)> {
    let shelters = world.shelters();
    if shelters.contains(&from) {
        return None;
    }

    let exits = world.exits(from)?;

    let mut visited: AHashSet<RoomId> = AHashSet::new();
    visited.insert(from);

    let mut frontier: VecDeque<(RoomId, ExitIndex, u32)> = VecDeque::new();
    for (i, exit) in exits.iter().enumerate() {
        if shelters.contains(&exit.leads_to) {
            return Some((ExitIndex(i), 1));
        }
        if visited.insert(exit.leads_to) {
            frontier.push_back((exit.leads_to, ExitIndex(i), 1));
        }
    }

    while let Some((room, first_hop, hops)) = frontier.pop_front() {
        for next in world.connections(room) {
            if shelters.contains(&next) {
                return Some((first_hop, hops + 1));
            }
            if visited.insert(next) {
                frontier.push_back((next, first_hop, hops + 1));
            }
        }
    }

    None
}
