//! Threat tracking and flee destinations

use ahash::AHashMap;

use crate::ai::arbiter::{Behavior, UtilityModule};
use crate::ai::ModuleContext;
use crate::core::types::{Destination, ObjectId, RoomId, Tick, TileCoord};
use crate::world::memory::RoomRepresentation;

#[derive(Debug, Clone, Copy)]
struct RememberedThreat {
    room: RoomId,
    tile: TileCoord,
    last_seen: Tick,
}

/// Remembers threat sightings for a bounded time and scores the urge to get
/// away from them
#[derive(Debug, Default)]
pub struct ThreatTracker {
    threats: AHashMap<ObjectId, RememberedThreat>,
}

impl ThreatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn threats_in_room(&self, room: RoomId) -> impl Iterator<Item = TileCoord> + '_ {
        self.threats
            .values()
            .filter(move |t| t.room == room)
            .map(|t| t.tile)
    }
}

impl UtilityModule for ThreatTracker {
    fn behavior(&self) -> Behavior {
        Behavior::Flee
    }

    /// Proximity falloff of the nearest remembered threat in the current
    /// room: 1.0 on top of a threat, 0.0 at the threat radius
    fn utility(&self, ctx: &ModuleContext) -> f32 {
        let agent = ctx.snapshot.tile();
        let nearest = self
            .threats_in_room(ctx.snapshot.room)
            .map(|tile| tile.float_dist(agent))
            .fold(f32::INFINITY, f32::min);

        if nearest.is_finite() {
            (1.0 - nearest / ctx.config.threat_radius).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Flee toward the exit whose node is farthest from every remembered
    /// threat in the room
    fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination> {
        let room = ctx.snapshot.room;
        let threats: Vec<TileCoord> = self.threats_in_room(room).collect();
        if threats.is_empty() {
            return None;
        }

        let exits = ctx.world.exits(room)?;
        let mut best: Option<(usize, f32)> = None;
        for (i, exit) in exits.iter().enumerate() {
            let clearance = threats
                .iter()
                .map(|t| t.float_dist(exit.tile))
                .fold(f32::INFINITY, f32::min);
            if best.map_or(true, |(_, c)| clearance > c) {
                best = Some((i, clearance));
            }
        }

        best.map(|(i, _)| Destination::Exit {
            room,
            exit: crate::core::types::ExitIndex(i),
        })
    }

    fn on_tick(&mut self, ctx: &ModuleContext) {
        for sighting in &ctx.snapshot.threats {
            self.threats.insert(
                sighting.id,
                RememberedThreat {
                    room: sighting.room,
                    tile: sighting.tile,
                    last_seen: ctx.tick,
                },
            );
        }

        let horizon = ctx.tick.saturating_sub(ctx.config.threat_memory_ticks);
        self.threats.retain(|_, t| t.last_seen >= horizon);
    }

    fn update_room_representation(&mut self, rep: &mut RoomRepresentation) {
        rep.threats = self.threats_in_room(rep.room).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{AgentSnapshot, ThreatSighting};
    use crate::core::config::BrainConfig;
    use crate::world::grid::{GridRoom, GridWorld};
    use crate::world::terrain::Terrain;

    fn ctx_with<'a>(
        snapshot: &'a AgentSnapshot,
        world: &'a GridWorld,
        config: &'a BrainConfig,
        shelter: &'a crate::ai::ShelterFinder,
        tick: Tick,
    ) -> ModuleContext<'a> {
        ModuleContext { snapshot, world, config, shelter, tick }
    }

    #[test]
    fn utility_falls_off_with_distance() {
        let world = GridWorld::new();
        let config = BrainConfig::default();
        let shelter = crate::ai::ShelterFinder::new();

        let mut tracker = ThreatTracker::new();
        let mut snapshot = AgentSnapshot::stationary(RoomId(0));
        snapshot.threats.push(ThreatSighting {
            id: ObjectId::new(),
            room: RoomId(0),
            tile: TileCoord::new(6, 0),
        });

        tracker.on_tick(&ctx_with(&snapshot, &world, &config, &shelter, 0));

        // agent at (0,0), threat at (6,0), radius 12 -> utility 0.5
        let u = tracker.utility(&ctx_with(&snapshot, &world, &config, &shelter, 0));
        assert!((u - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stale_threats_are_forgotten() {
        let world = GridWorld::new();
        let config = BrainConfig::default();
        let shelter = crate::ai::ShelterFinder::new();

        let mut tracker = ThreatTracker::new();
        let mut snapshot = AgentSnapshot::stationary(RoomId(0));
        snapshot.threats.push(ThreatSighting {
            id: ObjectId::new(),
            room: RoomId(0),
            tile: TileCoord::new(1, 0),
        });
        tracker.on_tick(&ctx_with(&snapshot, &world, &config, &shelter, 0));

        // much later, with no fresh sighting
        snapshot.threats.clear();
        let late = config.threat_memory_ticks + 1;
        tracker.on_tick(&ctx_with(&snapshot, &world, &config, &shelter, late));

        let u = tracker.utility(&ctx_with(&snapshot, &world, &config, &shelter, late));
        assert_eq!(u, 0.0);
    }

    #[test]
    fn flees_toward_clearest_exit() {
        let mut world = GridWorld::new();
        world.add_room(RoomId(0), GridRoom::filled(20, 5, Terrain::Floor));
        world.add_room(RoomId(1), GridRoom::filled(5, 5, Terrain::Floor));
        world.add_room(RoomId(2), GridRoom::filled(5, 5, Terrain::Floor));
        // exit 0 at the left edge, exit 1 at the right edge
        world.connect(RoomId(0), TileCoord::new(0, 0), RoomId(1), TileCoord::new(4, 0));
        world.connect(RoomId(0), TileCoord::new(19, 0), RoomId(2), TileCoord::new(0, 0));

        let config = BrainConfig::default();
        let shelter = crate::ai::ShelterFinder::new();
        let mut tracker = ThreatTracker::new();
        let mut snapshot = AgentSnapshot::stationary(RoomId(0));
        snapshot.threats.push(ThreatSighting {
            id: ObjectId::new(),
            room: RoomId(0),
            tile: TileCoord::new(2, 0),
        });
        tracker.on_tick(&ctx_with(&snapshot, &world, &config, &shelter, 0));

        let dest = tracker
            .destination(&ctx_with(&snapshot, &world, &config, &shelter, 0))
            .unwrap();
        // the right-edge exit is farther from the threat at (2,0)
        assert_eq!(
            dest,
            Destination::Exit { room: RoomId(0), exit: crate::core::types::ExitIndex(1) }
        );
    }
}
