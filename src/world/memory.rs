//! Per-room statistics accumulated as rooms are visited

use ahash::AHashMap;

use crate::core::types::{RoomId, Tick};

/// What the agent remembers about one room
///
/// Created lazily the first time the room is visited; lives for the rest of
/// the agent session.
#[derive(Debug, Clone)]
pub struct RoomRepresentation {
    pub room: RoomId,
    /// Known food items in the room
    pub food: u32,
    /// Remembered threats in the room
    pub threats: u32,
    /// Room hops to the nearest known shelter; `None` until computed
    pub dist_to_shelter: Option<u32>,
    pub last_visited: Tick,
}

impl RoomRepresentation {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            food: 0,
            threats: 0,
            dist_to_shelter: None,
            last_visited: 0,
        }
    }

    /// How much the agent wants to revisit this room
    ///
    /// Hungry agents weigh food against threats; sated agents rate rooms by
    /// how threatening they remember them to be (useful when hunting for a
    /// fight is off the table and the explorer wants familiar danger maps).
    pub fn desire_to_go_back(&self, hungry: bool, threat_limit: u32) -> f32 {
        if hungry {
            let total = self.food + self.threats;
            if total == 0 {
                0.0
            } else {
                self.food as f32 / total as f32
            }
        } else {
            (self.threats as f32 / threat_limit.max(1) as f32).clamp(0.0, 1.0)
        }
    }
}

/// The agent's room-knowledge table
#[derive(Debug, Clone, Default)]
pub struct RoomMemory {
    rooms: AHashMap<RoomId, RoomRepresentation>,
    /// Room the agent most recently departed
    pub previous_room: Option<RoomId>,
}

impl RoomMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches or lazily creates the representation of a room
    pub fn representation_mut(&mut self, room: RoomId) -> &mut RoomRepresentation {
        self.rooms
            .entry(room)
            .or_insert_with(|| RoomRepresentation::new(room))
    }

    pub fn get(&self, room: RoomId) -> Option<&RoomRepresentation> {
        self.rooms.get(&room)
    }

    pub fn visited(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    pub fn note_room_change(&mut self, departed: RoomId) {
        self.previous_room = Some(departed);
    }
}
