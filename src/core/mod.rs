pub mod config;
pub mod error;
pub mod types;

pub use config::BrainConfig;
pub use error::{BrainError, Result};
pub use types::{Destination, ExitIndex, ObjectId, RoomId, Tick, TileCoord, Vec2};
