use thiserror::Error;

use crate::core::types::RoomId;

/// Recoverable failures of the navigation core
///
/// None of these are fatal: an unreachable goal degrades to exploration and
/// unresolved topology is retried on the next tick.
#[derive(Error, Debug)]
pub enum BrainError {
    #[error("room not loaded: {0:?}")]
    RoomNotLoaded(RoomId),

    #[error("exit table not ready for room {0:?}")]
    TopologyNotReady(RoomId),

    #[error("no route from {from:?} to {to:?}")]
    NoRoute { from: RoomId, to: RoomId },

    #[error("invalid jump table: {0}")]
    InvalidJumpTable(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrainError>;
