//! Shelter lookup
//!
//! Not arbitrated itself: caches the route to the nearest shelter whenever
//! the agent changes rooms and hands the EscapeRain module its destination.

use crate::core::types::{Destination, ExitIndex, RoomId, TileCoord};
use crate::world::map::{route_to_nearest_shelter, WorldMap};
use crate::world::memory::RoomRepresentation;

#[derive(Debug, Default)]
pub struct ShelterFinder {
    /// Exit of the current room starting the route to the nearest shelter
    exit_to_shelter: Option<ExitIndex>,
    /// Room hops to that shelter from the current room
    distance: Option<u32>,
    current_room: Option<RoomId>,
}

impl ShelterFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the cached route; called on every room change
    pub fn on_new_room(&mut self, world: &dyn WorldMap, room: RoomId) {
        self.current_room = Some(room);
        match route_to_nearest_shelter(world, room) {
            Some((exit, hops)) => {
                self.exit_to_shelter = Some(exit);
                self.distance = Some(hops);
                tracing::debug!(room = room.0, exit = exit.0, hops, "shelter route cached");
            }
            None => {
                self.exit_to_shelter = None;
                self.distance = if world.shelters().contains(&room) {
                    Some(0)
                } else {
                    None
                };
                if self.distance.is_none() {
                    tracing::debug!(room = room.0, "no shelter reachable");
                }
            }
        }
    }

    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    /// Where to go to reach shelter from the current room
    ///
    /// Inside a shelter room this is the room's own safe spot (its center
    /// tile); otherwise the cached exit leading shelter-ward.
    pub fn shelter_target(&self, world: &dyn WorldMap, room: RoomId) -> Option<Destination> {
        if world.shelters().contains(&room) {
            let geometry = world.room(room)?;
            let tile = TileCoord::new(geometry.width() / 2, geometry.height() / 2);
            return Some(Destination::Tile { room, tile });
        }

        self.exit_to_shelter
            .filter(|_| self.current_room == Some(room))
            .map(|exit| Destination::Exit { room, exit })
    }

    pub fn update_room_representation(&self, rep: &mut RoomRepresentation) {
        if self.current_room == Some(rep.room) {
            rep.dist_to_shelter = self.distance;
        }
    }
}
