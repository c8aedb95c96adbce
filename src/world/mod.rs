//! Rooms, terrain, and the agent's accumulated knowledge of them

pub mod explorer;
pub mod grid;
pub mod map;
pub mod memory;
pub mod terrain;

pub use explorer::Explorer;
pub use grid::{GridRoom, GridWorld};
pub use map::{exit_toward_room, Exit, RoomGeometry, WorldMap};
pub use memory::{RoomMemory, RoomRepresentation};
pub use terrain::Terrain;
