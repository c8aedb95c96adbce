//! The decision core
//!
//! One [`Brain`] per agent. Each tick the host hands it a fresh
//! [`AgentSnapshot`] of what the agent currently perceives; the brain runs
//! arbitration, picks a destination, advances the time-sliced path search,
//! and returns the behavior plus the next movement edge to execute.

use serde::{Deserialize, Serialize};

use crate::ai::{
    Behavior, IdleModule, ModuleContext, ModuleTuning, RainTracker, ShelterFinder, StuckTracker,
    ThreatTracker, TreatTracker, UtilityArbiter,
};
use crate::core::config::BrainConfig;
use crate::core::error::{BrainError, Result};
use crate::core::types::{Destination, ObjectId, RoomId, Tick, TileCoord, Vec2};
use crate::diagnostics::{Diagnostics, NoopDiagnostics, Subject};
use crate::nav::follower::follow_path;
use crate::nav::jump::JumpTable;
use crate::nav::movement::MovementEdge;
use crate::nav::planner::{PathResult, Pathfinder};
use crate::world::explorer::Explorer;
use crate::world::map::{exit_toward_room, WorldMap};
use crate::world::memory::RoomMemory;

/// A creature the agent currently perceives as dangerous
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThreatSighting {
    pub id: ObjectId,
    pub room: RoomId,
    pub tile: TileCoord,
}

/// An edible object the agent currently perceives
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoodSighting {
    pub id: ObjectId,
    pub room: RoomId,
    pub tile: TileCoord,
    pub preferred: bool,
}

/// Everything the brain reads from the host this tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub room: RoomId,
    /// Continuous position within the room, world units
    pub position: Vec2,
    pub food: f32,
    pub max_food: f32,
    /// Food level below which hunger becomes urgent
    pub food_to_hibernate: f32,
    /// Progress through the rain cycle, 0 at cycle start and 1 at the storm
    pub rain_fraction: f32,
    /// Whether the brain was driving toward a destination last tick; the
    /// brain overwrites this from its own state before modules see it
    pub has_destination: bool,
    pub threats: Vec<ThreatSighting>,
    pub foods: Vec<FoodSighting>,
}

impl AgentSnapshot {
    /// A sated, unbothered agent standing still at the room origin
    pub fn stationary(room: RoomId) -> Self {
        Self {
            room,
            position: Vec2::default(),
            food: 7.0,
            max_food: 7.0,
            food_to_hibernate: 4.0,
            rain_fraction: 0.0,
            has_destination: false,
            threats: Vec::new(),
            foods: Vec::new(),
        }
    }

    pub fn tile(&self) -> TileCoord {
        TileCoord::from_world(self.position)
    }
}

/// One tick's output: what the agent is doing and how it should move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub behavior: Behavior,
    pub movement: MovementEdge,
}

/// Decision core for one agent
pub struct Brain {
    config: BrainConfig,
    jumps: JumpTable,
    planner: Pathfinder,
    arbiter: UtilityArbiter,
    memory: RoomMemory,
    explorer: Explorer,
    shelter: ShelterFinder,
    destination: Option<Destination>,
    goal_override: Option<Destination>,
    current_room: Option<RoomId>,
    tick: Tick,
    diagnostics: Box<dyn Diagnostics>,
}

impl Brain {
    pub fn new(config: BrainConfig, jumps: JumpTable, seed: u64) -> Self {
        let mut arbiter = UtilityArbiter::new();
        arbiter.register(
            Box::new(ThreatTracker::new()),
            ModuleTuning { base_weight: 0.9, rising_multiplier: 1.1 },
        );
        arbiter.register(
            Box::new(TreatTracker::new()),
            ModuleTuning { base_weight: 0.5, rising_multiplier: 1.1 },
        );
        arbiter.register(
            Box::new(RainTracker::new()),
            ModuleTuning { base_weight: 0.9, rising_multiplier: 1.1 },
        );
        arbiter.register(
            Box::new(StuckTracker::new()),
            ModuleTuning { base_weight: 1.0, rising_multiplier: 1.1 },
        );
        arbiter.register(
            Box::new(IdleModule::new()),
            ModuleTuning { base_weight: 1.0, rising_multiplier: 1.0 },
        );

        Self {
            config,
            jumps,
            planner: Pathfinder::new(),
            arbiter,
            memory: RoomMemory::new(),
            explorer: Explorer::new(seed),
            shelter: ShelterFinder::new(),
            destination: None,
            goal_override: None,
            current_room: None,
            tick: 0,
            diagnostics: Box::new(NoopDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn behavior(&self) -> Behavior {
        self.arbiter.current()
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination
    }

    pub fn memory(&self) -> &RoomMemory {
        &self.memory
    }

    /// Force a destination, bypassing arbitration until cleared
    pub fn set_goal_override(&mut self, destination: Option<Destination>) {
        self.goal_override = destination;
        self.planner.clear();
    }

    /// The host reports that the agent's room changed or was reloaded
    ///
    /// Room changes are also detected from the snapshot, so calling this is
    /// only required when the room id stays the same but its geometry or
    /// exit table was replaced.
    pub fn on_room_changed(&mut self) {
        self.current_room = None;
        self.planner.clear();
    }

    /// The host reports that a food item was eaten or despawned
    pub fn on_food_consumed(&mut self, id: ObjectId) {
        self.arbiter.on_food_consumed(id);
        if matches!(self.destination, Some(Destination::Tile { .. })) {
            self.destination = None;
            self.planner.clear();
        }
    }

    /// Run one decision tick
    pub fn tick(&mut self, world: &dyn WorldMap, snapshot: &AgentSnapshot) -> Result<Decision> {
        let room = world
            .room(snapshot.room)
            .ok_or(BrainError::RoomNotLoaded(snapshot.room))?;

        let mut snapshot = snapshot.clone();
        snapshot.has_destination = self.destination.is_some();
        let agent = snapshot.tile();

        if self.current_room != Some(snapshot.room) {
            self.enter_room(world, &snapshot);
        }

        {
            let ctx = ModuleContext {
                snapshot: &snapshot,
                world,
                config: &self.config,
                shelter: &self.shelter,
                tick: self.tick,
            };
            self.arbiter.on_tick(&ctx);
        }

        let rep = self.memory.representation_mut(snapshot.room);
        rep.last_visited = self.tick;
        self.arbiter.update_room_representation(rep);
        self.shelter.update_room_representation(rep);

        let behavior;
        let mut destination;
        {
            let ctx = ModuleContext {
                snapshot: &snapshot,
                world,
                config: &self.config,
                shelter: &self.shelter,
                tick: self.tick,
            };
            behavior = self.arbiter.evaluate(&ctx);
            destination = match self.goal_override {
                Some(dest) => Some(dest),
                None => self.arbiter.destination(&ctx),
            };
        }

        if destination.is_none() {
            let hungry = snapshot.food < snapshot.food_to_hibernate;
            destination = self.explorer.explore(
                world,
                &self.memory,
                snapshot.room,
                hungry,
                &self.config,
            );
        }

        let mut goal = destination.and_then(|d| self.resolve(world, snapshot.room, d));
        if let Some(tile) = goal {
            self.planner.set_goal(agent, tile, &self.config);
            self.planner.step(room, &self.jumps, &self.config);

            // a dead-end target falls back to wandering
            if self.planner.result() == PathResult::Unreachable {
                tracing::debug!(?tile, "destination unreachable, falling back to explorer");
                let hungry = snapshot.food < snapshot.food_to_hibernate;
                destination = self.explorer.explore(
                    world,
                    &self.memory,
                    snapshot.room,
                    hungry,
                    &self.config,
                );
                goal = destination.and_then(|d| self.resolve(world, snapshot.room, d));
                if let Some(tile) = goal {
                    self.planner.set_goal(agent, tile, &self.config);
                    self.planner.step(room, &self.jumps, &self.config);
                }
            }
        }

        let movement = follow_path(&mut self.planner, agent, &self.config);

        self.destination = destination;
        self.emit_diagnostics(behavior, destination);
        self.tick += 1;

        Ok(Decision { behavior, movement })
    }

    /// Room-change bookkeeping, run once per boundary crossing
    fn enter_room(&mut self, world: &dyn WorldMap, snapshot: &AgentSnapshot) {
        if let Some(departed) = self.current_room {
            self.memory.note_room_change(departed);
        }
        self.current_room = Some(snapshot.room);
        self.explorer.on_room_changed();
        self.shelter.on_new_room(world, snapshot.room);
        self.planner.clear();

        let ctx = ModuleContext {
            snapshot,
            world,
            config: &self.config,
            shelter: &self.shelter,
            tick: self.tick,
        };
        self.arbiter.on_new_room(&ctx);
        tracing::info!(room = snapshot.room.0, "entered room");
    }

    /// Map a destination onto a tile inside the agent's current room
    ///
    /// Targets in other rooms resolve to the exit leading toward them; `None`
    /// means the destination cannot be acted on this tick.
    fn resolve(
        &self,
        world: &dyn WorldMap,
        current: RoomId,
        destination: Destination,
    ) -> Option<TileCoord> {
        if destination.room() == current {
            return match destination {
                Destination::Tile { tile, .. } => Some(tile),
                Destination::Exit { exit, .. } => world.exit_tile(current, exit),
            };
        }

        let exit = exit_toward_room(world, current, destination.room())?;
        world.exit_tile(current, exit)
    }

    fn emit_diagnostics(&mut self, behavior: Behavior, destination: Option<Destination>) {
        self.diagnostics.label(
            "behavior",
            &format!("{behavior:?}"),
            Subject::Behavior.color(),
        );
        if let Some(dest) = destination {
            if let Destination::Tile { room, tile } = dest {
                self.diagnostics
                    .marker("destination", Subject::Destination.color(), room, tile);
            }
        }
    }
}
