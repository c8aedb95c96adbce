//! Food tracking
//!
//! Not to be confused with the threat tracker. Keeps a bounded list of known
//! edibles, scores how badly the agent wants one, and points the Hunt
//! behavior at the most attractive item.

use crate::ai::arbiter::{Behavior, UtilityModule};
use crate::ai::ModuleContext;
use crate::core::types::{Destination, ObjectId, RoomId, Tick, TileCoord};
use crate::world::memory::RoomRepresentation;

#[derive(Debug, Clone, Copy)]
struct FoodRepresentation {
    id: ObjectId,
    room: RoomId,
    tile: TileCoord,
    /// Preferred kinds (fruit and the like) score 1.2x
    preferred: bool,
    last_seen: Tick,
}

#[derive(Debug, Default)]
pub struct TreatTracker {
    foods: Vec<FoodRepresentation>,
    last_refresh: Tick,
    /// Sticky pick: the previous target keeps a persistence bonus so the
    /// hunt does not flap between two similar items
    last_best: Option<ObjectId>,
}

impl TreatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated tile distance from the agent, charging a flat penalty per
    /// room boundary
    fn estimated_distance(food: &FoodRepresentation, ctx: &ModuleContext) -> f32 {
        let direct = food.tile.float_dist(ctx.snapshot.tile());
        if food.room == ctx.snapshot.room {
            direct
        } else {
            direct + ctx.config.room_hop_penalty
        }
    }

    fn attractiveness(food: &FoodRepresentation, ctx: &ModuleContext) -> f32 {
        let dist = Self::estimated_distance(food, ctx);
        let score = (1.0 - dist / ctx.config.discourage_distance).clamp(0.0, 1.0);
        if food.preferred {
            score * 1.2
        } else {
            score
        }
    }

    fn most_attractive(&mut self, ctx: &ModuleContext) -> Option<FoodRepresentation> {
        let mut best: Option<(FoodRepresentation, f32)> = None;
        for food in &self.foods {
            let mut score = Self::attractiveness(food, ctx);
            if self.last_best == Some(food.id) {
                score *= ctx.config.food_persistence;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*food, score));
            }
        }

        let best = best.map(|(food, _)| food);
        self.last_best = best.map(|f| f.id);
        best
    }

    /// Drop entries that vanished or stopped being worth chasing
    fn refresh(&mut self, ctx: &ModuleContext) {
        let seen_horizon = ctx.tick.saturating_sub(ctx.config.food_refresh_interval * 2);
        self.foods
            .retain(|f| f.last_seen >= seen_horizon && Self::attractiveness(f, ctx) > 0.0);
    }

    fn evict_least_attractive(&mut self, ctx: &ModuleContext) {
        let mut worst: Option<(usize, f32)> = None;
        for (i, food) in self.foods.iter().enumerate() {
            let score = Self::attractiveness(food, ctx);
            if worst.map_or(true, |(_, s)| score < s) {
                worst = Some((i, score));
            }
        }
        if let Some((i, _)) = worst {
            self.foods.swap_remove(i);
        }
    }
}

impl UtilityModule for TreatTracker {
    fn behavior(&self) -> Behavior {
        Behavior::Hunt
    }

    /// Urgent (0.9) below the hibernation threshold, otherwise a gentle
    /// pull capped at 0.5
    fn utility(&self, ctx: &ModuleContext) -> f32 {
        let s = ctx.snapshot;
        if s.max_food <= 0.0 {
            return 0.0;
        }
        if s.food < s.food_to_hibernate {
            return 0.9;
        }
        (1.0 - s.food / s.max_food).clamp(0.0, 0.5)
    }

    fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination> {
        self.most_attractive(ctx)
            .map(|food| Destination::Tile { room: food.room, tile: food.tile })
    }

    fn on_tick(&mut self, ctx: &ModuleContext) {
        for sighting in &ctx.snapshot.foods {
            if let Some(existing) = self.foods.iter_mut().find(|f| f.id == sighting.id) {
                existing.room = sighting.room;
                existing.tile = sighting.tile;
                existing.last_seen = ctx.tick;
                continue;
            }

            self.foods.push(FoodRepresentation {
                id: sighting.id,
                room: sighting.room,
                tile: sighting.tile,
                preferred: sighting.preferred,
                last_seen: ctx.tick,
            });
            if self.foods.len() > ctx.config.max_food_count {
                self.evict_least_attractive(ctx);
            }
        }

        if ctx.tick.saturating_sub(self.last_refresh) >= ctx.config.food_refresh_interval {
            self.last_refresh = ctx.tick;
            self.refresh(ctx);
        }
    }

    fn update_room_representation(&mut self, rep: &mut RoomRepresentation) {
        rep.food = self.foods.iter().filter(|f| f.room == rep.room).count() as u32;
    }

    fn on_food_consumed(&mut self, id: ObjectId) {
        self.foods.retain(|f| f.id != id);
        if self.last_best == Some(id) {
            self.last_best = None;
        }
    }
}
