//! Movement edges - one traversal step between two tiles

use serde::{Deserialize, Serialize};

use crate::core::types::TileCoord;
use crate::nav::jump::JumpKind;

/// How an edge is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    Walk,
    Jump(JumpKind),
}

/// One step of a path: from one tile to another, tagged with how to get
/// there and what it costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementEdge {
    pub from: TileCoord,
    pub to: TileCoord,
    pub kind: MovementKind,
    pub cost: f32,
}

impl MovementEdge {
    pub fn walk(from: TileCoord, to: TileCoord) -> Self {
        Self { from, to, kind: MovementKind::Walk, cost: 1.0 }
    }

    /// The "no movement" edge emitted when there is nothing to do this tick
    pub fn hold(tile: TileCoord) -> Self {
        Self { from: tile, to: tile, kind: MovementKind::Walk, cost: 0.0 }
    }

    pub fn is_hold(&self) -> bool {
        self.from == self.to
    }
}
