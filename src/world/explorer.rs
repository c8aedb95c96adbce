//! Exploration heuristic used when no behavior has an explicit goal

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::BrainConfig;
use crate::core::types::{Destination, ExitIndex, RoomId};
use crate::world::map::WorldMap;
use crate::world::memory::RoomMemory;

/// Picks an exit worth wandering through
///
/// Scored candidates come from room memory; when nothing remembered looks
/// attractive the explorer falls back to a uniformly random exit, cached so
/// the choice stays stable until the agent actually changes rooms.
#[derive(Debug)]
pub struct Explorer {
    rng: ChaCha8Rng,
    cached_random_exit: Option<(RoomId, ExitIndex)>,
}

impl Explorer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cached_random_exit: None,
        }
    }

    /// Forget the cached random exit; called when the agent changes rooms
    pub fn on_room_changed(&mut self) {
        self.cached_random_exit = None;
    }

    /// Exit node to wander toward, or `None` if the room has no connections
    pub fn explore(
        &mut self,
        world: &dyn WorldMap,
        memory: &RoomMemory,
        current: RoomId,
        hungry: bool,
        config: &BrainConfig,
    ) -> Option<Destination> {
        let exits = world.exits(current)?;
        if exits.is_empty() {
            return None;
        }

        // the candidate closest to a known shelter gets a scoring bonus
        let closest_to_shelter: Option<RoomId> = exits
            .iter()
            .filter_map(|e| {
                memory
                    .get(e.leads_to)
                    .and_then(|rep| rep.dist_to_shelter.map(|d| (e.leads_to, d)))
            })
            .min_by_key(|&(_, d)| d)
            .map(|(room, _)| room);

        let mut best: Option<(ExitIndex, f32)> = None;
        for (i, exit) in exits.iter().enumerate() {
            let Some(rep) = memory.get(exit.leads_to) else {
                continue;
            };

            let mut score = rep.desire_to_go_back(hungry, config.threat_limit);
            if closest_to_shelter == Some(exit.leads_to) {
                score *= config.shelter_bias;
            }
            if memory.previous_room == Some(exit.leads_to) {
                score *= config.backtrack_damping;
            }

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((ExitIndex(i), score));
            }
        }

        if let Some((exit, score)) = best {
            if score >= config.explore_floor {
                tracing::debug!(room = current.0, exit = exit.0, score, "explorer picked scored exit");
                return Some(Destination::Exit { room: current, exit });
            }
        }

        // nothing remembered is attractive enough; wander somewhere random,
        // but keep the same pick until the room actually changes
        let exit = match self.cached_random_exit {
            Some((room, exit)) if room == current => exit,
            _ => {
                let exit = ExitIndex(self.rng.gen_range(0..exits.len()));
                self.cached_random_exit = Some((current, exit));
                tracing::debug!(room = current.0, exit = exit.0, "explorer cached random exit");
                exit
            }
        };

        Some(Destination::Exit { room: current, exit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TileCoord;
    use crate::world::grid::{GridRoom, GridWorld};
    use crate::world::terrain::Terrain;

    fn fork_world() -> GridWorld {
        // room 0 connects to rooms 1 and 2
        let mut world = GridWorld::new();
        for i in 0..3 {
            world.add_room(RoomId(i), GridRoom::filled(10, 5, Terrain::Floor));
        }
        world.connect(RoomId(0), TileCoord::new(0, 0), RoomId(1), TileCoord::new(9, 0));
        world.connect(RoomId(0), TileCoord::new(9, 0), RoomId(2), TileCoord::new(0, 0));
        world
    }

    #[test]
    fn hungry_agent_prefers_food_rich_room() {
        let world = fork_world();
        let mut memory = RoomMemory::new();
        {
            let a = memory.representation_mut(RoomId(1));
            a.food = 3;
            a.threats = 0;
        }
        {
            let b = memory.representation_mut(RoomId(2));
            b.food = 0;
            b.threats = 2;
        }

        let mut explorer = Explorer::new(1);
        let dest = explorer
            .explore(&world, &memory, RoomId(0), true, &BrainConfig::default())
            .unwrap();
        assert_eq!(dest, Destination::Exit { room: RoomId(0), exit: ExitIndex(0) });
    }

    #[test]
    fn random_exit_is_cached_until_room_change() {
        let world = fork_world();
        let memory = RoomMemory::new(); // nothing visited: all scores below floor
        let mut explorer = Explorer::new(42);
        let config = BrainConfig::default();

        let first = explorer.explore(&world, &memory, RoomId(0), false, &config);
        for _ in 0..20 {
            assert_eq!(explorer.explore(&world, &memory, RoomId(0), false, &config), first);
        }

        explorer.on_room_changed();
        // a fresh draw may coincide, but the cache itself must be cleared
        assert!(explorer.cached_random_exit.is_none());
    }

    #[test]
    fn isolated_room_yields_no_destination() {
        let mut world = GridWorld::new();
        world.add_room(RoomId(0), GridRoom::filled(5, 5, Terrain::Floor));
        let memory = RoomMemory::new();
        let mut explorer = Explorer::new(7);
        assert_eq!(
            explorer.explore(&world, &memory, RoomId(0), false, &BrainConfig::default()),
            None
        );
    }
}
