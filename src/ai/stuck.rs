//! Stuck detection and recovery
//!
//! Watches a sliding window of recent positions. When the agent has a
//! destination but has not left a small radius for the whole window, this
//! module takes over and nudges it toward a nearby traversable tile to
//! break the deadlock.

use std::collections::VecDeque;

use crate::ai::arbiter::{Behavior, UtilityModule};
use crate::ai::ModuleContext;
use crate::core::types::{Destination, TileCoord, Vec2};
use crate::nav::graph::is_tile_traversable;

#[derive(Debug, Default)]
pub struct StuckTracker {
    history: VecDeque<Vec2>,
}

impl StuckTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_stuck(&self, ctx: &ModuleContext) -> bool {
        if self.history.len() < ctx.config.stuck_window {
            return false;
        }
        let radius_px = ctx.config.stuck_radius * crate::core::types::TILE_SIZE;
        let newest = ctx.snapshot.position;
        self.history.iter().all(|p| p.distance(&newest) < radius_px)
    }

    /// First traversable tile on a ring two to four tiles out, scanned in a
    /// fixed order so recovery is deterministic
    fn escape_tile(ctx: &ModuleContext) -> Option<TileCoord> {
        let room = ctx.world.room(ctx.snapshot.room)?;
        let center = ctx.snapshot.tile();
        for radius in 2..=4i32 {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs().max(dy.abs()) != radius {
                        continue;
                    }
                    let tile = TileCoord::new(center.x + dx, center.y + dy);
                    if is_tile_traversable(room, tile) {
                        return Some(tile);
                    }
                }
            }
        }
        None
    }
}

impl UtilityModule for StuckTracker {
    fn behavior(&self) -> Behavior {
        Behavior::GetUnstuck
    }

    fn utility(&self, ctx: &ModuleContext) -> f32 {
        if !ctx.snapshot.has_destination {
            return 0.0;
        }
        if self.is_stuck(ctx) {
            1.0
        } else {
            0.0
        }
    }

    fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination> {
        Self::escape_tile(ctx).map(|tile| Destination::Tile {
            room: ctx.snapshot.room,
            tile,
        })
    }

    fn on_tick(&mut self, ctx: &ModuleContext) {
        self.history.push_back(ctx.snapshot.position);
        while self.history.len() > ctx.config.stuck_window {
            self.history.pop_front();
        }
    }

    fn on_new_room(&mut self, _ctx: &ModuleContext) {
        // crossing a room boundary is movement by definition
        self.history.clear();
    }
}
