//! Movement graph construction
//!
//! A tile's outgoing edges are its traversable cardinal neighbors plus every
//! tile reachable by a simulated jump arc launched there.

use crate::core::config::BrainConfig;
use crate::core::types::{TileCoord, FOUR_DIRECTIONS};
use crate::nav::jump::{simulate, JumpTable};
use crate::nav::movement::MovementEdge;
use crate::world::map::RoomGeometry;

/// In bounds and occupiable while walking or climbing
pub fn is_tile_traversable(room: &dyn RoomGeometry, tile: TileCoord) -> bool {
    room.in_bounds(tile) && room.terrain(tile).is_traversable()
}

/// Traversable cardinal neighbors, cost 1.0 each
pub fn walk_neighbors(room: &dyn RoomGeometry, tile: TileCoord) -> Vec<MovementEdge> {
    FOUR_DIRECTIONS
        .iter()
        .map(|&d| tile + d)
        .filter(|&n| is_tile_traversable(room, n))
        .map(|n| MovementEdge::walk(tile, n))
        .collect()
}

/// Jump edges from every profile launchable at `tile`
pub fn jump_edges(
    room: &dyn RoomGeometry,
    jumps: &JumpTable,
    tile: TileCoord,
    jump_cost: f32,
) -> Vec<MovementEdge> {
    let mut edges = Vec::new();
    for profile in jumps.profiles() {
        if profile.launch_valid(room, tile) {
            edges.extend(simulate(room, tile, profile, jump_cost));
        }
    }
    edges
}

/// All outgoing edges of a tile, walk edges first
pub fn neighbors(
    room: &dyn RoomGeometry,
    jumps: &JumpTable,
    tile: TileCoord,
    config: &BrainConfig,
) -> Vec<MovementEdge> {
    let mut edges = walk_neighbors(room, tile);
    edges.extend(jump_edges(room, jumps, tile, config.jump_cost));
    edges
}
